pub mod commit;
pub mod config;
pub mod error;
pub mod target;

// Re-exports
pub use commit::{CommitRecord, RunResult};
pub use config::RunConfig;
pub use error::{Error, Result};
pub use target::Target;
