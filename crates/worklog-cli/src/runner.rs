use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use futures_util::{stream, StreamExt};
use std::path::Path;

use crate::cli::Cli;
use worklog_core::{RunResult, Target};
use worklog_github::{fetch_all, CommitQuery, GitHubClient};

const SUMMARY_FILENAME: &str = "TODAY_WORK_SUMMARY.txt";

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;

    let token = cli.resolved_token();
    if token.is_none() {
        tracing::warn!("No GitHub token configured; unauthenticated rate limits apply");
    }
    let client = GitHubClient::new(token)?.with_base_url(cli.api_url.clone());

    println!(
        "\nFetching commits by {} ({})...\n",
        config.author,
        config.report_date()
    );

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir.display()
            )
        })?;

    let query = CommitQuery {
        author: config.author.clone(),
        since: config.since_param(),
        until: config.until_param(),
    };

    // Width 1 reproduces the strictly sequential run; `buffered` keeps the
    // results in target input order at any width.
    let date = config.report_date();
    let max_pages = config.max_pages;
    let results = stream::iter(config.targets.clone())
        .map(|target| {
            let client = client.clone();
            let query = query.clone();
            let author = config.author.clone();
            let output_dir = config.output_dir.clone();
            async move {
                process_target(
                    &client,
                    &query,
                    &target,
                    &author,
                    date,
                    max_pages,
                    &output_dir,
                )
                .await
            }
        })
        .buffered(config.concurrency)
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<Vec<RunResult>>>()?;

    let summary = worklog_report::run_summary(&config, &results, Utc::now());
    let summary_path = config.output_dir.join(SUMMARY_FILENAME);
    tokio::fs::write(&summary_path, summary)
        .await
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    println!("\n✓ Summary report saved: {}", SUMMARY_FILENAME);
    println!("\nAll reports saved to: {}", config.output_dir.display());
    println!(
        "\nTotal commits found: {}",
        worklog_report::total_commits(&results)
    );

    Ok(())
}

/// Fetch, format, and write one target's report. Fetch errors were already
/// contained by the paginator; only the file write can fail the run.
async fn process_target(
    client: &GitHubClient,
    query: &CommitQuery,
    target: &Target,
    author: &str,
    date: NaiveDate,
    max_pages: u32,
    output_dir: &Path,
) -> Result<RunResult> {
    let commits = fetch_all(client, target, query, max_pages).await;
    let report = worklog_report::target_report(target, author, date, &commits);

    let filename = target.report_filename();
    let path = output_dir.join(&filename);
    tokio::fs::write(&path, report)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✓ Saved: {} ({} commits)", filename, commits.len());

    Ok(RunResult::new(target.clone(), commits.len()))
}
