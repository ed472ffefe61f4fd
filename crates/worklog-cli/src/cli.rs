use anyhow::Result;
use chrono::{Duration, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

use worklog_core::{config::FileConfig, RunConfig, Target};
use worklog_github::GitHubClient;

#[derive(Parser)]
#[command(name = "worklog")]
#[command(about = "Fetch one author's commits for a day across GitHub branches", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Commit author to search for
    #[arg(long, env = "WORKLOG_AUTHOR")]
    pub author: Option<String>,

    /// Branch to scan, repeatable (owner/repo or owner/repo@branch)
    #[arg(long = "target", value_name = "OWNER/REPO[@BRANCH]")]
    pub targets: Vec<Target>,

    /// First day of the window (YYYY-MM-DD), defaults to today (UTC)
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Day after the last day of the window (YYYY-MM-DD, exclusive)
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// TOML run-config file (flags override file values)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the report files are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Upper bound on pages fetched per target
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// How many targets to process at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// GitHub token; GIT_TOKEN is the fallback, unauthenticated if neither is set
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Alternate API base URL
    #[arg(long, hide = true, default_value = "https://api.github.com")]
    pub api_url: String,
}

impl Cli {
    /// Merge precedence: CLI flags over `WORKLOG_*` env over config file over
    /// built-in defaults.
    pub fn resolve_config(&self) -> Result<RunConfig> {
        let file = FileConfig::load(self.config.as_deref())?;

        let author = self
            .author
            .clone()
            .or(file.author.clone())
            .unwrap_or_default();

        let mut targets = self.targets.clone();
        if targets.is_empty() {
            targets = file.parsed_targets()?;
        }

        let mut config = RunConfig::new(author, targets);
        if let Some(since) = self.since.or(file.since) {
            config.since = since;
            config.until = since + Duration::days(1);
        }
        if let Some(until) = self.until.or(file.until) {
            config.until = until;
        }
        if let Some(output_dir) = self.output_dir.clone().or(file.output_dir) {
            config.output_dir = output_dir;
        }
        if let Some(max_pages) = self.max_pages.or(file.max_pages) {
            config.max_pages = max_pages;
        }
        if let Some(concurrency) = self.concurrency.or(file.concurrency) {
            config.concurrency = concurrency.max(1);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn resolved_token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(GitHubClient::token_from_env)
    }
}
