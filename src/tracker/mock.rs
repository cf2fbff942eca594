use crate::error::{ChangelogError, Result};
use crate::tracker::{Issue, IssueTracker};
use std::any::Any;
use std::collections::HashMap;

/// In-memory issue tracker for tests
///
/// Links follow `https://bugtracker.com/issue/<id>`.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    issues: HashMap<String, Issue>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an issue under `id`
    pub fn add_issue(&mut self, id: impl Into<String>, subject: impl Into<String>) {
        let id = id.into();
        let link = format!("https://bugtracker.com/issue/{}", id);
        self.issues.insert(id.clone(), Issue::new(id, subject, link));
    }
}

impl IssueTracker for MockTracker {
    fn find_issue(&self, id: &str) -> Result<Issue> {
        self.issues
            .get(id)
            .cloned()
            .ok_or_else(|| ChangelogError::UnknownIssue(id.to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn IssueTracker) -> bool {
        other.as_any().is::<MockTracker>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_tracker_finds_known_issue() {
        let mut tracker = MockTracker::new();
        tracker.add_issue("1234", "Subject of feature 1");

        let issue = tracker.find_issue("1234").unwrap();
        assert_eq!(
            issue,
            Issue::new(
                "1234",
                "Subject of feature 1",
                "https://bugtracker.com/issue/1234"
            )
        );
    }

    #[test]
    fn test_mock_tracker_unknown_issue() {
        let tracker = MockTracker::new();
        let err = tracker.find_issue("42").unwrap_err();
        assert_eq!(err.to_string(), "no issue with ID: 42");
    }
}
