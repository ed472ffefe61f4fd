use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

use worklog_core::{RunConfig, RunResult};

pub fn total_commits(results: &[RunResult]) -> usize {
    results.iter().map(|r| r.count).sum()
}

/// Renders the aggregate summary written next to the per-target reports.
pub fn run_summary(
    config: &RunConfig,
    results: &[RunResult],
    generated_at: DateTime<Utc>,
) -> String {
    let date = config.report_date();
    let mut output = String::new();

    writeln!(output, "GitHub Commits Report - Today ({})", date).ok();
    writeln!(
        output,
        "Generated: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
    .ok();
    writeln!(output, "Author: {}", config.author).ok();
    writeln!(output, "Date: {}", date).ok();
    writeln!(output, "Branches Scanned: {}", results.len()).ok();
    writeln!(output, "Total Commits Found: {}", total_commits(results)).ok();

    writeln!(output, "\nBranches:").ok();
    for result in results {
        writeln!(output, "- {}: {} commits", result.target, result.count).ok();
    }

    writeln!(output, "\nOutput Files:").ok();
    for result in results {
        writeln!(output, "- {}", result.target.report_filename()).ok();
    }

    writeln!(
        output,
        "\nNote: If GITHUB_TOKEN is not set, API rate limits may apply (60 requests/hour).\n\
         To increase limits, set GITHUB_TOKEN environment variable with a valid GitHub token."
    )
    .ok();

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use worklog_core::Target;

    fn config() -> RunConfig {
        let targets = vec![
            "ghimireayush/bagamati".parse::<Target>().unwrap(),
            "ghimireayush/bagamati@admin_panel".parse::<Target>().unwrap(),
        ];
        let mut cfg = RunConfig::new("ghimireayush".to_string(), targets);
        cfg.since = chrono::NaiveDate::from_ymd_opt(2026, 2, 16).unwrap();
        cfg.until = chrono::NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
        cfg
    }

    fn results() -> Vec<RunResult> {
        config()
            .targets
            .iter()
            .zip([0usize, 150])
            .map(|(target, count)| RunResult::new(target.clone(), count))
            .collect()
    }

    #[test]
    fn test_total_is_sum_of_target_counts() {
        assert_eq!(total_commits(&results()), 150);
    }

    #[test]
    fn test_summary_header_and_breakdown() {
        let generated_at = "2026-02-16T18:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let summary = run_summary(&config(), &results(), generated_at);

        assert!(summary.starts_with("GitHub Commits Report - Today (2026-02-16)\n"));
        assert!(summary.contains("Generated: 2026-02-16T18:30:00.000Z\n"));
        assert!(summary.contains("Author: ghimireayush\n"));
        assert!(summary.contains("Branches Scanned: 2\n"));
        assert!(summary.contains("Total Commits Found: 150\n"));
        assert!(summary.contains("- ghimireayush/bagamati (main): 0 commits\n"));
        assert!(summary.contains("- ghimireayush/bagamati (admin_panel): 150 commits\n"));
        assert!(summary.contains("- ghimireayush-bagamati-main-today-commits.txt\n"));
        assert!(summary.contains("- ghimireayush-bagamati-admin_panel-today-commits.txt\n"));
        assert!(summary.contains("Note: If GITHUB_TOKEN is not set"));
    }

    #[test]
    fn test_summary_lists_targets_in_input_order() {
        let generated_at = Utc::now();
        let summary = run_summary(&config(), &results(), generated_at);

        let first = summary.find("(main): 0 commits").unwrap();
        let second = summary.find("(admin_panel): 150 commits").unwrap();
        assert!(first < second);
    }
}
