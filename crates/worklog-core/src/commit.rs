use serde::{Deserialize, Serialize};

use crate::Target;

/// One fetched commit, in the shape the reports consume. Held only for the
/// duration of one target's processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub author_name: String,
    pub author_date: String,
    pub message: String,
    pub html_url: String,
}

/// Outcome of scanning one target, collected in input order for the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub target: Target,
    pub count: usize,
}

impl RunResult {
    pub fn new(target: Target, count: usize) -> Self {
        Self { target, count }
    }
}
