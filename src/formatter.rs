//! Release-note rendering

use crate::tracker::Issue;
use chrono::NaiveDate;
use std::any::Any;
use std::fmt;

/// Turns a version, a release date and resolved issues into release notes
pub trait Renderer: fmt::Debug {
    /// Render issues in the order given; identical input gives identical output
    fn render(&self, version_name: &str, release_date: NaiveDate, issues: &[Issue]) -> String;

    fn as_any(&self) -> &dyn Any;

    fn equal(&self, other: &dyn Renderer) -> bool;
}

/// Markdown section with reference-style links:
///
/// ```text
/// ## v1.0.0 - 2018-11-19
///
/// - A nice feature ([#42])
///
/// [#42]: https://github.com/kdisneur/changelog/pull/42
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, version_name: &str, release_date: NaiveDate, issues: &[Issue]) -> String {
        let header = format!("## {} - {}\n\n", version_name, release_date.format("%Y-%m-%d"));

        if issues.is_empty() {
            return header + "(No changes)\n";
        }

        let mut list = String::new();
        let mut links = String::new();

        for issue in issues {
            list.push_str(&format!("- {} ([#{}])\n", issue.subject, issue.id));
            links.push_str(&format!("[#{}]: {}\n", issue.id, issue.link));
        }

        format!("{}{}\n{}", header, list, links)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn Renderer) -> bool {
        other.as_any().is::<MarkdownRenderer>()
    }
}
