use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result};
use worklog_core::{CommitRecord, Target};

/// Fixed page size for the commits-list endpoint.
pub const PER_PAGE: u32 = 100;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("worklog/", env!("CARGO_PKG_VERSION"));

/// Author and date-window filter shared by every page request of one run.
#[derive(Debug, Clone)]
pub struct CommitQuery {
    pub author: String,
    pub since: String,
    pub until: String,
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Requests are sent unauthenticated when `token` is `None`, subject to
    /// GitHub's stricter anonymous rate limits.
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
        })
    }

    /// Point the client at a different API host. Used by tests and the
    /// `--api-url` flag.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Reads the primary credential variable, falling back to the legacy one.
    pub fn token_from_env() -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GIT_TOKEN"))
            .ok()
    }

    /// Fetch one page of commits for a target. A non-2xx status maps the
    /// GitHub error payload into `Error::Api`; a 200 body that is not a JSON
    /// array is `Error::UnexpectedPayload` rather than being mistaken for an
    /// exhausted result set.
    pub async fn list_commits(
        &self,
        target: &Target,
        query: &CommitQuery,
        page: u32,
    ) -> Result<Vec<CommitRecord>> {
        let url = format!(
            "{}/repos/{}/{}/commits",
            self.base_url, target.owner, target.repo
        );

        let per_page = PER_PAGE.to_string();
        let page_number = page.to_string();
        let mut request = self.client.get(&url).query(&[
            ("author", query.author.as_str()),
            ("since", query.since.as_str()),
            ("until", query.until.as_str()),
            ("sha", target.branch.as_str()),
            ("per_page", per_page.as_str()),
            ("page", page_number.as_str()),
        ]);

        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: serde_json::Value = serde_json::from_str(&body)?;
        if !payload.is_array() {
            let kind = match &payload {
                serde_json::Value::Object(map) if map.contains_key("message") => {
                    format!("error object: {}", map["message"])
                }
                other => format!("expected array, got {}", json_kind(other)),
            };
            return Err(Error::UnexpectedPayload(kind));
        }

        let commits: Vec<ApiCommit> = serde_json::from_value(payload)?;
        Ok(commits.into_iter().map(CommitRecord::from).collect())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Subset of the commits-list payload the reports need.
#[derive(Debug, Deserialize)]
struct ApiCommit {
    sha: String,
    commit: ApiCommitDetail,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetail {
    author: Option<ApiCommitAuthor>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiCommitAuthor {
    name: String,
    date: String,
}

impl From<ApiCommit> for CommitRecord {
    fn from(api: ApiCommit) -> Self {
        let (author_name, author_date) = match api.commit.author {
            Some(author) => (author.name, author.date),
            None => ("unknown".to_string(), String::new()),
        };
        CommitRecord {
            sha: api.sha,
            author_name,
            author_date,
            message: api.commit.message,
            html_url: api.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn target() -> Target {
        Target::new("a".to_string(), "b".to_string())
    }

    fn query() -> CommitQuery {
        CommitQuery {
            author: "someone".to_string(),
            since: "2026-02-16T00:00:00Z".to_string(),
            until: "2026-02-17T00:00:00Z".to_string(),
        }
    }

    const ONE_COMMIT: &str = r#"[
        {
            "sha": "abc123",
            "html_url": "https://github.com/a/b/commit/abc123",
            "commit": {
                "message": "fix: handle empty input",
                "author": { "name": "Someone", "date": "2026-02-16T10:00:00Z" }
            }
        }
    ]"#;

    #[tokio::test]
    async fn test_list_commits_sends_query_and_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/a/b/commits")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("author".into(), "someone".into()),
                Matcher::UrlEncoded("since".into(), "2026-02-16T00:00:00Z".into()),
                Matcher::UrlEncoded("until".into(), "2026-02-17T00:00:00Z".into()),
                Matcher::UrlEncoded("sha".into(), "main".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .match_header("authorization", "token t0ken")
            .with_body(ONE_COMMIT)
            .create_async()
            .await;

        let client = GitHubClient::new(Some("t0ken".to_string()))
            .unwrap()
            .with_base_url(server.url());
        let commits = client.list_commits(&target(), &query(), 1).await.unwrap();

        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].sha, "abc123");
        assert_eq!(commits[0].author_name, "Someone");
        assert_eq!(commits[0].author_date, "2026-02-16T10:00:00Z");
        assert_eq!(commits[0].message, "fix: handle empty input");
        assert_eq!(commits[0].html_url, "https://github.com/a/b/commit/abc123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_commits_without_token_omits_auth_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/a/b/commits")
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_body("[]")
            .create_async()
            .await;

        let client = GitHubClient::new(None).unwrap().with_base_url(server.url());
        let commits = client.list_commits(&target(), &query(), 1).await.unwrap();

        assert!(commits.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_maps_api_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/a/b/commits")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(None).unwrap().with_base_url(server.url());
        let err = client
            .list_commits(&target(), &query(), 1)
            .await
            .unwrap_err();

        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API rate limit exceeded");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_array_success_body_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/a/b/commits")
            .match_query(Matcher::Any)
            .with_body(r#"{"message": "Moved Permanently"}"#)
            .create_async()
            .await;

        let client = GitHubClient::new(None).unwrap().with_base_url(server.url());
        let err = client
            .list_commits(&target(), &query(), 1)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnexpectedPayload(_)));
    }

    #[tokio::test]
    async fn test_commit_without_author_falls_back_to_unknown() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/a/b/commits")
            .match_query(Matcher::Any)
            .with_body(
                r#"[{"sha": "def456", "html_url": "https://github.com/a/b/commit/def456",
                     "commit": {"message": "orphan", "author": null}}]"#,
            )
            .create_async()
            .await;

        let client = GitHubClient::new(None).unwrap().with_base_url(server.url());
        let commits = client.list_commits(&target(), &query(), 1).await.unwrap();

        assert_eq!(commits[0].author_name, "unknown");
        assert_eq!(commits[0].author_date, "");
    }
}
