use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, Result};

/// One (owner, repository, branch) triple to scan for commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl Target {
    pub fn new(owner: String, repo: String) -> Self {
        Self {
            owner,
            repo,
            branch: default_branch(),
        }
    }

    pub fn with_branch(mut self, branch: String) -> Self {
        self.branch = branch;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Output filename for this target's report. Branch names may contain
    /// slashes (e.g. `feature/login`), which must not become path components.
    pub fn report_filename(&self) -> String {
        format!(
            "{}-{}-{}-today-commits.txt",
            self.owner,
            self.repo,
            self.branch.replace('/', "-")
        )
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({})", self.owner, self.repo, self.branch)
    }
}

impl FromStr for Target {
    type Err = Error;

    /// Parses `owner/repo` or `owner/repo@branch`.
    fn from_str(s: &str) -> Result<Self> {
        let (repo_part, branch) = match s.split_once('@') {
            Some((r, b)) => (r, Some(b)),
            None => (s, None),
        };

        let (owner, repo) = repo_part
            .split_once('/')
            .ok_or_else(|| Error::InvalidTarget(s.to_string()))?;

        if owner.is_empty()
            || repo.is_empty()
            || repo.contains('/')
            || branch.is_some_and(str::is_empty)
        {
            return Err(Error::InvalidTarget(s.to_string()));
        }

        let mut target = Target::new(owner.to_string(), repo.to_string());
        if let Some(branch) = branch {
            target = target.with_branch(branch.to_string());
        }
        Ok(target)
    }
}
