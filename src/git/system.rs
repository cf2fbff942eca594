use crate::error::{ChangelogError, Result};
use crate::git::{find_remote_from_urls, Commit, HistorySource, Person, Reference, Remote};
use chrono::{DateTime, Utc};
use log::debug;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `git log` format: one `;`-joined line per commit
const LOG_FORMAT: &str = "--format=%H;%an;%aE;%at;%cn;%ce;%ct;%p;%s";

/// History source backed by a local checkout and the `git` executable
#[derive(Debug, Clone)]
pub struct SystemRepository {
    path: PathBuf,
}

impl SystemRepository {
    /// Open the repository rooted at `path`
    ///
    /// # Returns
    /// * `Ok(SystemRepository)` - `path` is the root of a git repository
    /// * `Err(NotARepository)` - Anything else
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        git2::Repository::open(path)
            .map_err(|_| ChangelogError::NotARepository(path.display().to_string()))?;

        Ok(SystemRepository {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every fetch and push URL of every configured remote, in config order
    pub fn remote_urls(&self) -> Result<Vec<String>> {
        let repo = git2::Repository::open(&self.path)?;
        let names = repo.remotes()?;
        let mut urls = Vec::new();

        for name in names.iter().flatten() {
            let remote = repo.find_remote(name)?;
            if let Some(url) = remote.url() {
                urls.push(url.to_string());
            }
            if let Some(url) = remote.pushurl() {
                urls.push(url.to_string());
            }
        }

        Ok(urls)
    }
}

impl HistorySource for SystemRepository {
    fn log(&self, from: &Reference, to: &Reference) -> Result<Vec<Commit>> {
        let range = format!("{}..{}", from, to);
        let log_error = |reason: String| ChangelogError::Log {
            range: range.clone(),
            path: self.path.display().to_string(),
            reason,
        };

        for reference in [from, to] {
            if reference.as_str().starts_with('-') {
                return Err(log_error(format!("invalid reference '{}'", reference)));
            }
        }

        debug!("git log {} in {}", range, self.path.display());

        // User configuration must not change the machine-parsed format
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(["-c", "log.showSignature=false"])
            .args(["log", LOG_FORMAT, range.as_str(), "--"])
            .output()
            .map_err(|e| log_error(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(log_error(stderr.trim().to_string()));
        }

        let commits = parse_log(&String::from_utf8_lossy(&output.stdout))?;
        debug!("{} commits in {}", commits.len(), range);

        Ok(commits)
    }

    fn find_remote(&self) -> Result<Remote> {
        let urls = self.remote_urls()?;
        debug!("remote URLs: {:?}", urls);
        find_remote_from_urls(&urls)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn HistorySource) -> bool {
        other
            .as_any()
            .downcast_ref::<SystemRepository>()
            .is_some_and(|other| other.path == self.path)
    }
}

/// Parse the whole output of `git log` in the `;`-joined format
pub fn parse_log(output: &str) -> Result<Vec<Commit>> {
    output.lines().map(parse_log_line).collect()
}

/// Parse one formatted `git log` line
///
/// A line with a field count other than nine, or with a non-numeric
/// timestamp, is rejected.
pub fn parse_log_line(line: &str) -> Result<Commit> {
    let fields: Vec<&str> = line.split(';').collect();
    let [id, author_name, author_email, authored_at, committer_name, committer_email, committed_at, parents, message] =
        fields.as_slice()
    else {
        return Err(ChangelogError::LogLine(line.to_string()));
    };

    Ok(Commit {
        id: id.to_string(),
        author: Person::new(*author_name, *author_email),
        authored_at: parse_timestamp("author", authored_at)?,
        committer: Person::new(*committer_name, *committer_email),
        committed_at: parse_timestamp("committer", committed_at)?,
        is_merge: parents.split_whitespace().count() > 1,
        message: message.to_string(),
    })
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    value
        .parse::<i64>()
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .ok_or_else(|| ChangelogError::Timestamp {
            field,
            value: value.to_string(),
        })
}
