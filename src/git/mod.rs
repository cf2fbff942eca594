//! Version-control history abstraction layer
//!
//! This module provides a trait-based abstraction over commit history,
//! allowing the changelog pipeline to run against a real repository or an
//! in-memory one in tests.
//!
//! # Overview
//!
//! The primary abstraction is the [HistorySource] trait, which lists the
//! commits of a half-open range and locates the repository's remote. The
//! concrete implementations include:
//!
//! - [system::SystemRepository]: shells out to the `git` executable
//! - [mock::MockRepository]: replays a scripted history for testing
//!
//! # Usage
//!
//! ```rust
//! # use changelog::git::{HistorySource, Reference};
//! # fn example<H: HistorySource>(repo: &H) -> changelog::Result<()> {
//! let commits = repo.log(&Reference::new("v1.0.0"), &Reference::new("master"))?;
//! for commit in commits {
//!     println!("{}: {}", commit.id, commit.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod remote;
pub mod system;

pub use mock::MockRepository;
pub use remote::find_remote_from_urls;
pub use system::SystemRepository;

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt;

/// A named point in history: branch, tag or commit identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference(String);

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Reference(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author or committer identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub email: String,
}

impl Person {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A single commit as listed by a [HistorySource]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The full commit hash
    pub id: String,
    pub author: Person,
    pub authored_at: DateTime<Utc>,
    pub committer: Person,
    pub committed_at: DateTime<Utc>,
    /// True when the commit has more than one parent
    pub is_merge: bool,
    /// The commit subject line
    pub message: String,
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commit {} (merge {})", self.id, self.is_merge)?;
        writeln!(f, "Author: {} <{}>", self.author.name, self.author.email)?;
        writeln!(f, "Date: {}", self.authored_at)?;
        writeln!(f)?;
        writeln!(
            f,
            "Committer: {} <{}>",
            self.committer.name, self.committer.email
        )?;
        writeln!(f, "Date: {}", self.committed_at)?;
        writeln!(f)?;
        write!(f, "{}", self.message)
    }
}

/// Transport used to reach a remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKind {
    /// `https://<host>/<path>`
    Https,
    /// `user@<host>:<path>`
    Ssh,
}

/// A parsed remote endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub kind: RemoteKind,
    pub host: String,
    /// Repository path on the host, e.g. `org/repo`
    pub repository_name: String,
}

/// Source of commit history
///
/// ## Error Handling
///
/// Implementations map backend failures to [crate::error::ChangelogError]
/// variants and must name the attempted range when an endpoint cannot be
/// resolved.
///
/// ## Implementations
///
/// - [SystemRepository](system::SystemRepository): real repository through the `git` executable
/// - [MockRepository](mock::MockRepository): in-memory history for tests
pub trait HistorySource: fmt::Debug {
    /// List every commit reachable from `to` but not from `from`
    ///
    /// Commits come back in the order the underlying walk yields them. An
    /// empty but valid range returns an empty vector.
    ///
    /// # Arguments
    /// * `from` - Exclusive lower bound
    /// * `to` - Inclusive upper bound
    ///
    /// # Returns
    /// * `Ok(Vec<Commit>)` - Commits in walk order
    /// * `Err` - If either endpoint cannot be resolved or the output is malformed
    fn log(&self, from: &Reference, to: &Reference) -> Result<Vec<Commit>>;

    /// Find the single remote this repository points to
    ///
    /// # Returns
    /// * `Ok(Remote)` - Exactly one distinct remote URL was configured
    /// * `Err` - No remote, several distinct remotes, or an unparsable URL
    fn find_remote(&self) -> Result<Remote>;

    fn as_any(&self) -> &dyn Any;

    /// Compare configured root locations, not history
    fn equal(&self, other: &dyn HistorySource) -> bool;
}

/// Every commit of the range; squash merges leave nothing to filter
pub fn squashed_commits(
    source: &dyn HistorySource,
    from: &Reference,
    to: &Reference,
) -> Result<Vec<Commit>> {
    source.log(from, to)
}

/// Only the merge commits of the range, keeping walk order
pub fn merged_commits(
    source: &dyn HistorySource,
    from: &Reference,
    to: &Reference,
) -> Result<Vec<Commit>> {
    Ok(source
        .log(from, to)?
        .into_iter()
        .filter(|commit| commit.is_merge)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn john() -> Person {
        Person::new("John Doe", "john.doe@gmail.com")
    }

    fn scripted_history() -> MockRepository {
        let date = Utc.with_ymd_and_hms(2018, 11, 17, 6, 0, 0).unwrap();
        let mut repo = MockRepository::new("git@github.com:kdisneur/changelog");
        repo.add_commit("a2bc4fd", john(), date, "Commit 1");
        repo.add_merge_commit("6398b4e", john(), date, "Commit 2");
        repo.add_commit("4f28c41", john(), date, "Commit 3");
        repo.add_merge_commit("555475c", john(), date, "Commit 4");
        repo.add_commit("16dd997", john(), date, "Commit 5");
        repo
    }

    #[test]
    fn test_merged_commits_keeps_only_merges() {
        let repo = scripted_history();
        let commits = merged_commits(
            &repo,
            &Reference::new("a2bc4fd"),
            &Reference::new("16dd997"),
        )
        .unwrap();

        let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(messages, vec!["Commit 2", "Commit 4"]);
    }

    #[test]
    fn test_squashed_commits_keeps_everything() {
        let repo = scripted_history();
        let commits = squashed_commits(
            &repo,
            &Reference::new("a2bc4fd"),
            &Reference::new("16dd997"),
        )
        .unwrap();

        assert_eq!(commits.len(), 4);
        assert_eq!(commits[0].message, "Commit 2");
        assert_eq!(commits[3].message, "Commit 5");
    }

    #[test]
    fn test_commit_display() {
        let date = Utc.with_ymd_and_hms(2018, 11, 17, 6, 0, 0).unwrap();
        let commit = Commit {
            id: "abc123".to_string(),
            author: john(),
            authored_at: date,
            committer: Person::new("Kevin", "kevin@example.com"),
            committed_at: date,
            is_merge: false,
            message: "Add a feature (#42)".to_string(),
        };

        let rendered = commit.to_string();
        assert!(rendered.starts_with("commit abc123 (merge false)"));
        assert!(rendered.contains("Author: John Doe <john.doe@gmail.com>"));
        assert!(rendered.contains("Committer: Kevin <kevin@example.com>"));
        assert!(rendered.ends_with("Add a feature (#42)"));
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(Reference::new("v1.0.0").to_string(), "v1.0.0");
        assert_eq!(Reference::new("master").as_str(), "master");
    }
}
