use chrono::NaiveDate;
use std::fmt::Write;

use worklog_core::{CommitRecord, Target};

const RULE_WIDTH: usize = 80;

/// Renders the report for one target. Deterministic, no I/O.
pub fn target_report(
    target: &Target,
    author: &str,
    date: NaiveDate,
    commits: &[CommitRecord],
) -> String {
    if commits.is_empty() {
        return format!("No commits found for {} on {}.\n", target, date);
    }

    let mut output = String::new();
    writeln!(output, "Repository: {}", target.full_name()).ok();
    writeln!(output, "Branch: {}", target.branch).ok();
    writeln!(output, "Author: {}", author).ok();
    writeln!(output, "Total Commits: {}", commits.len()).ok();
    writeln!(output, "Date: {}", date).ok();
    writeln!(output, "\n{}\n", "=".repeat(RULE_WIDTH)).ok();

    for (index, commit) in commits.iter().enumerate() {
        writeln!(output, "Commit #{}", index + 1).ok();
        writeln!(output, "SHA: {}", commit.sha).ok();
        writeln!(output, "Author: {}", commit.author_name).ok();
        writeln!(output, "Date: {}", commit.author_date).ok();
        writeln!(output, "Message: {}", commit.message).ok();
        writeln!(output, "URL: {}", commit.html_url).ok();
        writeln!(output, "\n{}\n", "-".repeat(RULE_WIDTH)).ok();
    }

    output
}
