use crate::error::{ChangelogError, Result};
use crate::tracker::{Issue, IssueTracker};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::any::Any;
use std::fmt;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("changelog/", env!("CARGO_PKG_VERSION"));

/// Fields of `GET /repos/{repository}/pulls/{number}` the changelog needs
#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    number: u64,
    title: String,
    html_url: String,
}

/// Resolves pull request numbers through the GitHub REST API
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubTracker {
    token: String,
    api_url: String,
    repository: String,
}

impl GitHubTracker {
    /// Tracker for `repository` (e.g. `kdisneur/changelog`) on github.com
    pub fn new(token: impl Into<String>, repository: impl Into<String>) -> Self {
        Self::with_api(token, DEFAULT_API_URL, repository)
    }

    /// Tracker against another API endpoint, such as GitHub Enterprise
    pub fn with_api(
        token: impl Into<String>,
        api_url: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        GitHubTracker {
            token: token.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            repository: repository.into(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    fn pull_request_url(&self, id: &str) -> String {
        format!("{}/repos/{}/pulls/{}", self.api_url, self.repository, id)
    }
}

impl fmt::Debug for GitHubTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubTracker")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("repository", &self.repository)
            .finish()
    }
}

impl IssueTracker for GitHubTracker {
    fn find_issue(&self, id: &str) -> Result<Issue> {
        let url = self.pull_request_url(id);
        debug!("GET {}", url);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ChangelogError::issue_fetch(id, e))?;

        let response = client
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, API_VERSION)
            .send()
            .map_err(|e| ChangelogError::issue_fetch(id, e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ChangelogError::issue_fetch(id, e))?;

        if !status.is_success() {
            return Err(ChangelogError::issue_fetch(
                id,
                format!("HTTP {}: {}", status, body.trim()),
            ));
        }

        let pull_request: PullRequestResponse =
            serde_json::from_str(&body).map_err(|e| ChangelogError::issue_fetch(id, e))?;

        Ok(Issue::new(
            pull_request.number.to_string(),
            pull_request.title,
            pull_request.html_url,
        ))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn IssueTracker) -> bool {
        other
            .as_any()
            .downcast_ref::<GitHubTracker>()
            .is_some_and(|other| other == self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::MockTracker;

    #[test]
    fn test_pull_request_url() {
        let tracker = GitHubTracker::with_api("t", "http://localhost:1234/", "kdisneur/changelog");
        assert_eq!(
            tracker.pull_request_url("42"),
            "http://localhost:1234/repos/kdisneur/changelog/pulls/42"
        );
    }

    #[test]
    fn test_default_api() {
        let tracker = GitHubTracker::new("t", "kdisneur/changelog");
        assert!(tracker
            .pull_request_url("1")
            .starts_with("https://api.github.com/repos/"));
        assert_eq!(tracker.repository(), "kdisneur/changelog");
    }

    #[test]
    fn test_equality_compares_configuration() {
        let tracker = GitHubTracker::new("aaaa", "kdisneur/changelog");

        assert!(tracker.equal(&GitHubTracker::new("aaaa", "kdisneur/changelog")));
        assert!(!tracker.equal(&GitHubTracker::new("bbbb", "kdisneur/changelog")));
        assert!(!tracker.equal(&GitHubTracker::new("aaaa", "kdisneur/other")));
        assert!(!tracker.equal(&GitHubTracker::with_api(
            "aaaa",
            "http://localhost",
            "kdisneur/changelog"
        )));
        assert!(!tracker.equal(&MockTracker::new()));
    }

    #[test]
    fn test_debug_hides_token() {
        let tracker = GitHubTracker::new("secret-token", "kdisneur/changelog");
        let debug = format!("{:?}", tracker);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("kdisneur/changelog"));
    }
}
