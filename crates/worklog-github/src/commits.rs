use async_trait::async_trait;

use crate::client::{CommitQuery, GitHubClient, PER_PAGE};
use crate::Result;
use worklog_core::{CommitRecord, Target};

/// Seam between the pagination loop and the HTTP client, so the loop can be
/// exercised against scripted fetchers.
#[async_trait]
pub trait CommitFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        target: &Target,
        query: &CommitQuery,
        page: u32,
    ) -> Result<Vec<CommitRecord>>;
}

#[async_trait]
impl CommitFetcher for GitHubClient {
    async fn fetch_page(
        &self,
        target: &Target,
        query: &CommitQuery,
        page: u32,
    ) -> Result<Vec<CommitRecord>> {
        self.list_commits(target, query, page).await
    }
}

/// Fetch every matching commit on one target, page by page.
///
/// Stops on an empty page, a short page (fewer than [`PER_PAGE`] records), the
/// `max_pages` ceiling, or a fetch error. An error is contained here: it is
/// logged and whatever accumulated so far is returned as a partial result.
/// Accumulation order is ascending page number with in-page order preserved.
pub async fn fetch_all(
    fetcher: &dyn CommitFetcher,
    target: &Target,
    query: &CommitQuery,
    max_pages: u32,
) -> Vec<CommitRecord> {
    let mut all_commits = Vec::new();
    let mut page = 1;

    loop {
        tracing::info!("Fetching {} - page {}", target, page);

        let commits = match fetcher.fetch_page(target, query, page).await {
            Ok(commits) => commits,
            Err(err) => {
                tracing::error!("Error fetching commits from {}: {}", target, err);
                break;
            }
        };

        if commits.is_empty() {
            break;
        }

        let short_page = (commits.len() as u32) < PER_PAGE;
        all_commits.extend(commits);

        if short_page {
            break;
        }
        if page >= max_pages {
            tracing::warn!(
                "Reached page ceiling ({}) for {}; results may be truncated",
                max_pages,
                target
            );
            break;
        }
        page += 1;
    }

    all_commits
}
