//! Issue tracker abstraction
//!
//! Resolves an issue number extracted from a commit subject into the subject
//! line and link shown in the changelog.
//!
//! - [github::GitHubTracker]: pull requests through the GitHub REST API
//! - [mock::MockTracker]: fixed in-memory set of issues for testing

pub mod github;
pub mod mock;

pub use github::GitHubTracker;
pub use mock::MockTracker;

use crate::error::Result;
use std::any::Any;
use std::fmt;

/// A resolved unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    pub subject: String,
    pub link: String,
}

impl Issue {
    pub fn new(id: impl Into<String>, subject: impl Into<String>, link: impl Into<String>) -> Self {
        Issue {
            id: id.into(),
            subject: subject.into(),
            link: link.into(),
        }
    }
}

/// Looks issues up one at a time
///
/// Every failure, whatever its cause, comes back as a single error naming
/// the issue; there is no retry.
pub trait IssueTracker: fmt::Debug {
    fn find_issue(&self, id: &str) -> Result<Issue>;

    fn as_any(&self) -> &dyn Any;

    /// Compare configuration (credentials, endpoint, repository), not remote state
    fn equal(&self, other: &dyn IssueTracker) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_equality_is_structural() {
        let issue = Issue::new("42", "A good subject name", "https://site.com/issue/42");

        assert_eq!(
            issue,
            Issue::new("42", "A good subject name", "https://site.com/issue/42")
        );
        assert_ne!(
            issue,
            Issue::new("1337", "A good subject name", "https://site.com/issue/42")
        );
        assert_ne!(
            issue,
            Issue::new("42", "Another subject", "https://site.com/issue/42")
        );
        assert_ne!(
            issue,
            Issue::new("42", "A good subject name", "https://site.com/issue/1337")
        );
    }
}
