use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result, Target};

pub const DEFAULT_MAX_PAGES: u32 = 50;
pub const DEFAULT_CONCURRENCY: usize = 1;

/// Fully resolved configuration for one run. `until` is exclusive, so the
/// default window `today..tomorrow` covers all of today.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub author: String,
    pub since: NaiveDate,
    pub until: NaiveDate,
    pub targets: Vec<Target>,
    pub output_dir: PathBuf,
    pub max_pages: u32,
    pub concurrency: usize,
}

impl RunConfig {
    pub fn new(author: String, targets: Vec<Target>) -> Self {
        let (since, until) = default_window(Utc::now().date_naive());
        Self {
            author,
            since,
            until,
            targets,
            output_dir: PathBuf::from("."),
            max_pages: DEFAULT_MAX_PAGES,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.author.trim().is_empty() {
            return Err(Error::EmptyAuthor);
        }
        if self.targets.is_empty() {
            return Err(Error::NoTargets);
        }
        if self.since >= self.until {
            return Err(Error::InvalidDateRange {
                since: self.since,
                until: self.until,
            });
        }
        Ok(())
    }

    /// The date the reports are labelled with.
    pub fn report_date(&self) -> NaiveDate {
        self.since
    }

    pub fn since_param(&self) -> String {
        format!("{}T00:00:00Z", self.since.format("%Y-%m-%d"))
    }

    pub fn until_param(&self) -> String {
        format!("{}T00:00:00Z", self.until.format("%Y-%m-%d"))
    }
}

pub fn default_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today, today + Duration::days(1))
}

/// Values read from an optional TOML run-config file, overridable via
/// `WORKLOG_*` environment variables. CLI flags take precedence over both;
/// the merge happens in the binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub author: Option<String>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    #[serde(default)]
    pub targets: Vec<String>,
    pub output_dir: Option<PathBuf>,
    pub max_pages: Option<u32>,
    pub concurrency: Option<usize>,
}

impl FileConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("WORKLOG")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("targets"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn parsed_targets(&self) -> Result<Vec<Target>> {
        self.targets.iter().map(|spec| spec.parse()).collect()
    }
}
