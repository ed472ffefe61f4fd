pub mod client;
pub mod commits;
pub mod error;

// Re-exports
pub use client::{CommitQuery, GitHubClient, PER_PAGE};
pub use commits::{fetch_all, CommitFetcher};
pub use error::{Error, Result};
