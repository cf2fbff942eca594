//! Commit reference parsers
//!
//! A parser decides whether a commit subject references a pull request under
//! a given merge strategy, and extracts the referenced number.

use crate::error::{ChangelogError, Result};
use regex::Regex;
use std::any::Any;
use std::fmt;
use std::str::FromStr;

/// `Add a feature (#1234)`
const SQUASH_PATTERN: &str = r"\(#([0-9]+)\)";
/// `Merge pull request #1234 from org/branch`
const MERGE_PATTERN: &str = r"^Merge pull request #([0-9]+)";

/// Recognises issue references in commit subjects
pub trait CommitParser: fmt::Debug {
    /// True when the message follows this parser's convention
    fn should_keep(&self, message: &str) -> bool;

    /// Extract the referenced issue number
    ///
    /// Re-validates the message on its own, so calling it on a message that
    /// [should_keep](CommitParser::should_keep) rejected yields an error
    /// rather than a panic.
    fn extract_id(&self, message: &str) -> Result<String>;

    fn as_any(&self) -> &dyn Any;

    /// Variant equality
    fn equal(&self, other: &dyn CommitParser) -> bool;
}

/// First capture group of `pattern` in `message`, if any
fn capture_id(pattern: &str, message: &str) -> Option<String> {
    Regex::new(pattern)
        .ok()
        .and_then(|re| re.captures(message))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Squash-and-merge convention: the pull request number in parentheses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquashParser;

impl CommitParser for SquashParser {
    fn should_keep(&self, message: &str) -> bool {
        capture_id(SQUASH_PATTERN, message).is_some()
    }

    fn extract_id(&self, message: &str) -> Result<String> {
        capture_id(SQUASH_PATTERN, message).ok_or_else(|| ChangelogError::subject(message))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn CommitParser) -> bool {
        other.as_any().is::<SquashParser>()
    }
}

/// Merge-commit convention: subjects produced by merging a pull request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeParser;

impl CommitParser for MergeParser {
    fn should_keep(&self, message: &str) -> bool {
        capture_id(MERGE_PATTERN, message).is_some()
    }

    fn extract_id(&self, message: &str) -> Result<String> {
        capture_id(MERGE_PATTERN, message).ok_or_else(|| ChangelogError::subject(message))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn CommitParser) -> bool {
        other.as_any().is::<MergeParser>()
    }
}

/// How pull requests land on the base branch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    #[default]
    Squash,
    Merge,
}

impl MergeStrategy {
    /// The parser matching this strategy's commit subjects
    pub fn parser(self) -> Box<dyn CommitParser> {
        match self {
            MergeStrategy::Squash => Box::new(SquashParser),
            MergeStrategy::Merge => Box::new(MergeParser),
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "squash" => Ok(MergeStrategy::Squash),
            "merge" => Ok(MergeStrategy::Merge),
            other => Err(ChangelogError::config(format!(
                "Asked for '{}' strategy but support only 'squash' and 'merge'",
                other
            ))),
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::Squash => f.write_str("squash"),
            MergeStrategy::Merge => f.write_str("merge"),
        }
    }
}
