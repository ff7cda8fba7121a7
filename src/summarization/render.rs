//! Markdown rendering of summary and history documents.

use std::fmt::Write;

use crate::git::{CommitInfo, FileChange, Revision};

/// Renders the summary document for a diff.
pub fn render_summary(revision: &Revision, changes: &[FileChange]) -> String {
    let mut out = format!("# Summary of `{revision}`\n\n");

    if changes.is_empty() {
        out.push_str("No changes.\n");
        return out;
    }

    out.push_str(&diff_stat_line(changes));
    out.push_str("\n\n");
    push_file_list(&mut out, changes);
    out
}

/// Renders the history document for a set of commits, plus the pending
/// changes for the working tree and index sentinels.
pub fn render_history(
    revision: &Revision,
    commits: &[CommitInfo],
    pending: Option<&[FileChange]>,
) -> String {
    let mut out = format!("# History for `{revision}`\n");

    if commits.is_empty() && pending.is_none() {
        out.push_str("\nNo commits.\n");
        return out;
    }

    for commit in commits {
        let _ = write!(
            out,
            "\n## {} {}\n\n- Author: {}\n- Date: {}\n",
            commit.short_hash(),
            commit.subject(),
            commit.author,
            commit.date.to_rfc3339()
        );

        let body = commit.body();
        if !body.is_empty() {
            let _ = write!(out, "\n{body}\n");
        }

        if !commit.file_changes.is_empty() {
            out.push_str("\n### Files\n\n");
            push_file_list(&mut out, &commit.file_changes);
        }
    }

    if let Some(changes) = pending {
        let label = match revision {
            Revision::Cached => "staged",
            _ => "working tree",
        };
        let _ = write!(out, "\n## Pending changes ({label})\n\n");
        if changes.is_empty() {
            out.push_str("No changes.\n");
        } else {
            out.push_str(&diff_stat_line(changes));
            out.push_str("\n\n");
            push_file_list(&mut out, changes);
        }
    }

    out
}

/// `git diff --shortstat` style totals.
fn diff_stat_line(changes: &[FileChange]) -> String {
    let insertions: usize = changes.iter().map(|c| c.insertions).sum();
    let deletions: usize = changes.iter().map(|c| c.deletions).sum();

    format!(
        "{} changed, {}, {}",
        plural(changes.len(), "file", "files"),
        plural(insertions, "insertion(+)", "insertions(+)"),
        plural(deletions, "deletion(-)", "deletions(-)")
    )
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

fn push_file_list(out: &mut String, changes: &[FileChange]) {
    for change in changes {
        let _ = writeln!(
            out,
            "- {} {} (+{} -{})",
            change.status, change.file, change.insertions, change.deletions
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn change(status: &str, file: &str, insertions: usize, deletions: usize) -> FileChange {
        FileChange {
            status: status.to_string(),
            file: file.to_string(),
            insertions,
            deletions,
        }
    }

    fn commit(message: &str) -> CommitInfo {
        CommitInfo {
            hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
            author: "Test User <test@example.com>".to_string(),
            date: DateTime::parse_from_rfc3339("2024-05-01T12:00:00+02:00").unwrap(),
            message: message.to_string(),
            file_changes: vec![change("M", "src/lib.rs", 3, 1)],
        }
    }

    #[test]
    fn summary_lists_files_with_totals() {
        let summary = render_summary(
            &Revision::Current,
            &[change("M", "src/lib.rs", 3, 1), change("A", "src/cache.rs", 1, 0)],
        );

        assert_eq!(
            summary,
            "# Summary of `--current`\n\n\
             2 files changed, 4 insertions(+), 1 deletion(-)\n\n\
             - M src/lib.rs (+3 -1)\n\
             - A src/cache.rs (+1 -0)\n"
        );
    }

    #[test]
    fn summary_without_changes() {
        assert_eq!(
            render_summary(&Revision::Cached, &[]),
            "# Summary of `--cached`\n\nNo changes.\n"
        );
    }

    #[test]
    fn history_renders_commit_sections() {
        let history = render_history(
            &Revision::parse("HEAD~1..HEAD"),
            &[commit("feat: add cache\n\nStores summaries on disk.\n")],
            None,
        );

        assert!(history.starts_with("# History for `HEAD~1..HEAD`\n"));
        assert!(history.contains("## 01234567 feat: add cache\n"));
        assert!(history.contains("- Author: Test User <test@example.com>\n"));
        assert!(history.contains("- Date: 2024-05-01T12:00:00+02:00\n"));
        assert!(history.contains("\nStores summaries on disk.\n"));
        assert!(history.contains("### Files\n\n- M src/lib.rs (+3 -1)\n"));
        assert!(!history.contains("Pending changes"));
    }

    #[test]
    fn history_for_sentinel_includes_pending_changes() {
        let history = render_history(
            &Revision::Cached,
            &[commit("Initial commit")],
            Some(&[change("A", "new.txt", 1, 0)]),
        );

        assert!(history.contains("## Pending changes (staged)\n\n"));
        assert!(history.contains("1 file changed, 1 insertion(+), 0 deletions(-)"));
        assert!(history.contains("- A new.txt (+1 -0)\n"));
    }

    #[test]
    fn empty_range_history() {
        assert_eq!(
            render_history(&Revision::parse("HEAD..HEAD"), &[], None),
            "# History for `HEAD..HEAD`\n\nNo commits.\n"
        );
    }
}
