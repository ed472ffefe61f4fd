use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid target spec: {0} (expected owner/repo or owner/repo@branch)")]
    InvalidTarget(String),

    #[error("Invalid date range: since {since} must be before until {until}")]
    InvalidDateRange {
        since: chrono::NaiveDate,
        until: chrono::NaiveDate,
    },

    #[error("No targets configured")]
    NoTargets,

    #[error("Author must not be empty")]
    EmptyAuthor,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
