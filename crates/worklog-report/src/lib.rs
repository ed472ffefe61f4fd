pub mod format;
pub mod summary;

// Re-exports
pub use format::target_report;
pub use summary::{run_summary, total_commits};
