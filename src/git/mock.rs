use crate::error::{ChangelogError, Result};
use crate::git::{find_remote_from_urls, Commit, HistorySource, Person, Reference, Remote};
use chrono::{DateTime, Utc};
use std::any::Any;

/// Mock repository for testing without an actual git checkout
///
/// Commits are replayed in the order they were added, which stands in for
/// the order of a real history walk.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    remote_urls: Vec<String>,
    commits: Vec<Commit>,
}

impl MockRepository {
    /// Create an empty history with a single remote URL
    pub fn new(remote_url: impl Into<String>) -> Self {
        MockRepository {
            remote_urls: vec![remote_url.into()],
            commits: Vec::new(),
        }
    }

    /// Create an empty history with any number of remote URLs
    pub fn with_remote_urls(remote_urls: Vec<String>) -> Self {
        MockRepository {
            remote_urls,
            commits: Vec::new(),
        }
    }

    /// Append a single-parent commit
    pub fn add_commit(
        &mut self,
        id: impl Into<String>,
        author: Person,
        authored_at: DateTime<Utc>,
        message: impl Into<String>,
    ) {
        self.commits
            .push(build_commit(id.into(), author, authored_at, message.into(), false));
    }

    /// Append a commit with several parents
    pub fn add_merge_commit(
        &mut self,
        id: impl Into<String>,
        author: Person,
        authored_at: DateTime<Utc>,
        message: impl Into<String>,
    ) {
        self.commits
            .push(build_commit(id.into(), author, authored_at, message.into(), true));
    }

    fn knows(&self, reference: &Reference) -> bool {
        self.commits.iter().any(|c| c.id == reference.as_str())
    }
}

fn build_commit(
    id: String,
    author: Person,
    authored_at: DateTime<Utc>,
    message: String,
    is_merge: bool,
) -> Commit {
    Commit {
        id,
        committer: author.clone(),
        author,
        authored_at,
        committed_at: authored_at,
        is_merge,
        message,
    }
}

impl HistorySource for MockRepository {
    fn log(&self, from: &Reference, to: &Reference) -> Result<Vec<Commit>> {
        for reference in [from, to] {
            if !self.knows(reference) {
                return Err(ChangelogError::Log {
                    range: format!("{}..{}", from, to),
                    path: "<memory>".to_string(),
                    reason: format!("unknown revision '{}'", reference),
                });
            }
        }

        let mut commits = Vec::new();
        let mut keep = false;

        for commit in &self.commits {
            if keep {
                commits.push(commit.clone());
            }

            if commit.id == to.as_str() {
                break;
            }

            if commit.id == from.as_str() {
                keep = true;
            }
        }

        Ok(commits)
    }

    fn find_remote(&self) -> Result<Remote> {
        find_remote_from_urls(&self.remote_urls)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn HistorySource) -> bool {
        other
            .as_any()
            .downcast_ref::<MockRepository>()
            .is_some_and(|other| other.remote_urls == self.remote_urls)
    }
}
