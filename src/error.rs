use thiserror::Error;

/// Unified error type for changelog generation
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path '{0}' is not a git repository")]
    NotARepository(String),

    #[error("Can't generate git logs for '{range}' in {path}: {reason}")]
    Log {
        range: String,
        path: String,
        reason: String,
    },

    #[error("can't parse '{0}'")]
    LogLine(String),

    #[error("can't parse {field} timestamp '{value}'")]
    Timestamp { field: &'static str, value: String },

    #[error("no remote available")]
    NoRemote,

    #[error("found multiple remotes: {0}, {1}")]
    MultipleRemotes(String, String),

    #[error("unrecognized protocol for {0}")]
    UnrecognizedProtocol(String),

    #[error("can't parse remote: {0}")]
    MalformedRemote(String),

    #[error("can't parse subject '{0}'")]
    Subject(String),

    #[error("can't fetch issue {id}: {source}")]
    IssueFetch {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no issue with ID: {0}")]
    UnknownIssue(String),

    #[error("no commits found")]
    NoCommits,

    #[error("no commits kept")]
    NoCommitsKept,
}

/// Convenience type alias for Results in changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a subject error for a commit message that names no issue
    pub fn subject(message: impl Into<String>) -> Self {
        ChangelogError::Subject(message.into())
    }

    /// Wrap any failure of an issue lookup
    pub fn issue_fetch(
        id: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        ChangelogError::IssueFetch {
            id: id.into(),
            source: source.into(),
        }
    }
}
