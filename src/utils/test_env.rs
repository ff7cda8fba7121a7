//! Process environment helpers for tests.

use std::env;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serializes tests that touch the process environment.
static ENV_TEST_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the environment lock and restores every variable it changed on drop.
pub(crate) struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
    vars: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub(crate) fn new() -> Self {
        let lock = ENV_TEST_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            _lock: lock,
            vars: Vec::new(),
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        env::set_var(key, value);
    }

    pub(crate) fn remove(&mut self, key: &str) {
        self.vars.push((key.to_string(), env::var(key).ok()));
        env::remove_var(key);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in self.vars.drain(..).rev() {
            match original {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}
