//! Changelog assembly
//!
//! Lists the commits of the configured range, keeps the ones whose subject
//! references an issue, resolves each issue through the tracker and renders
//! the result. The first failure aborts the whole run.

use crate::config::ValidatedConfig;
use crate::error::{ChangelogError, Result};
use crate::tracker::Issue;
use log::{debug, info};

/// Build the release notes described by `config`.
///
/// # Returns
/// * `Ok(String)` - Rendered changelog
/// * `Err(NoCommits)` - The range is empty
/// * `Err(NoCommitsKept)` - No commit references an issue
/// * `Err` - Any history, parse or tracker failure, unchanged
pub fn build_changelog(config: &ValidatedConfig) -> Result<String> {
    let commits = config.repository.log(&config.from, &config.to)?;
    debug!(
        "{} commits between {} and {}",
        commits.len(),
        config.from,
        config.to
    );

    if commits.is_empty() {
        return Err(ChangelogError::NoCommits);
    }

    let mut issues: Vec<Issue> = Vec::new();

    for commit in &commits {
        if !config.parser.should_keep(&commit.message) {
            debug!("skipping {}: {}", commit.id, commit.message);
            continue;
        }

        let id = config.parser.extract_id(&commit.message)?;
        issues.push(config.tracker.find_issue(&id)?);
    }

    if issues.is_empty() {
        return Err(ChangelogError::NoCommitsKept);
    }

    info!("rendering {} issues for {}", issues.len(), config.version_name);
    Ok(config
        .renderer
        .render(&config.version_name, config.date, &issues))
}
