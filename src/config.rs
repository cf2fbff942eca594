use crate::error::{ChangelogError, Result};
use crate::formatter::{MarkdownRenderer, Renderer};
use crate::git::{HistorySource, Reference, SystemRepository};
use crate::parser::{CommitParser, MergeStrategy};
use crate::tracker::{GitHubTracker, IssueTracker};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "changelog";
pub const DEFAULT_BASE_BRANCH: &str = "master";

pub const TOKEN_ENV: &str = "CHANGELOG_GITHUB_TOKEN";
pub const MERGE_STRATEGY_ENV: &str = "CHANGELOG_MERGE_STRATEGY";
pub const BASE_BRANCH_ENV: &str = "CHANGELOG_BASE_BRANCH";

/// Contents of the configuration file.
///
/// Global defaults, GitHub credentials, and per-repository overrides keyed by
/// repository name.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct File {
    #[serde(default)]
    pub general: General,

    #[serde(default)]
    pub github: GitHub,

    #[serde(default)]
    pub repository: Vec<RepositoryConfig>,
}

/// Defaults applied to every repository
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct General {
    pub merge_strategy: Option<String>,
    pub base_branch: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct GitHub {
    #[serde(default)]
    pub token: String,
}

/// Overrides for a single repository
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RepositoryConfig {
    pub name: String,
    pub base_branch: Option<String>,
    pub merge_strategy: Option<String>,
}

impl File {
    /// Per-repository entry for `name`, if any
    pub fn find_repository(&self, name: &str) -> Option<&RepositoryConfig> {
        self.repository.iter().find(|repository| repository.name == name)
    }

    /// Override file values with environment variables.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV) {
            debug!("{} overrides github.token", TOKEN_ENV);
            self.github.token = token;
        }
        if let Some(strategy) = lookup(MERGE_STRATEGY_ENV) {
            debug!("{} overrides general.merge_strategy", MERGE_STRATEGY_ENV);
            self.general.merge_strategy = Some(strategy);
        }
        if let Some(branch) = lookup(BASE_BRANCH_ENV) {
            debug!("{} overrides general.base_branch", BASE_BRANCH_ENV);
            self.general.base_branch = Some(branch);
        }
    }
}

/// `~/.config`
pub fn default_folder_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .ok_or_else(|| ChangelogError::config("Can't find home folder"))
}

pub fn default_file_name() -> &'static str {
    DEFAULT_FILE_NAME
}

/// `~/.config/changelog`
pub fn default_file_path() -> Result<PathBuf> {
    Ok(default_folder_path()?.join(default_file_name()))
}

/// Loads the configuration file and applies environment overrides.
///
/// # Arguments
/// * `config_path` - Explicit file; must exist. When `None`, the default
///   path is used and a missing file yields an empty configuration.
///
/// # Returns
/// * `Ok(File)` - Parsed configuration
/// * `Err` - If the file cannot be read or is not valid TOML
pub fn load_config(config_path: Option<&Path>) -> Result<File> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => default_file_path()?,
    };

    let mut file = if config_path.is_none() && !path.exists() {
        debug!("no configuration file at {}", path.display());
        File::default()
    } else {
        debug!("loading configuration from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| {
            ChangelogError::config(format!("can't read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ChangelogError::config(format!("can't parse {}: {}", path.display(), e))
        })?
    };

    file.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(file)
}

/// Raw run parameters as given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub repository_name: Option<String>,
    pub from: String,
    pub to: Option<String>,
    pub version_name: String,
    pub date: NaiveDate,
    pub repository_local_path: PathBuf,
    pub merge_strategy: Option<String>,
}

/// Fully resolved run parameters and the collaborators of the pipeline
#[derive(Debug)]
pub struct ValidatedConfig {
    pub from: Reference,
    pub to: Reference,
    pub version_name: String,
    pub date: NaiveDate,
    pub parser: Box<dyn CommitParser>,
    pub renderer: Box<dyn Renderer>,
    pub repository: Box<dyn HistorySource>,
    pub tracker: Box<dyn IssueTracker>,
}

impl PartialEq for ValidatedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.version_name == other.version_name
            && self.date == other.date
            && self.parser.equal(other.parser.as_ref())
            && self.renderer.equal(other.renderer.as_ref())
            && self.repository.equal(other.repository.as_ref())
            && self.tracker.equal(other.tracker.as_ref())
    }
}

/// Resolve the file and command-line input into a [ValidatedConfig].
///
/// Precedence for the base branch and merge strategy: command line, then the
/// file entry for the repository, then the file's general section, then
/// `master` / `squash`.
pub fn validate(file: &File, command: &Command) -> Result<ValidatedConfig> {
    let repository = SystemRepository::open(&command.repository_local_path)?;
    let repository_name = repository_name(&repository, command)?;
    info!("using repository {}", repository_name);

    let to = to_reference(file, command, &repository_name);
    let strategy = merge_strategy(file, command, &repository_name)?;
    debug!("range {}..{} with {} strategy", command.from, to, strategy);

    Ok(ValidatedConfig {
        from: Reference::new(&command.from),
        to,
        version_name: command.version_name.clone(),
        date: command.date,
        parser: strategy.parser(),
        renderer: Box::new(MarkdownRenderer),
        repository: Box::new(repository),
        tracker: Box::new(GitHubTracker::new(&file.github.token, &repository_name)),
    })
}

fn repository_name(repository: &dyn HistorySource, command: &Command) -> Result<String> {
    match command.repository_name.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => Ok(name.to_string()),
        None => Ok(repository.find_remote()?.repository_name),
    }
}

/// First non-empty value in precedence order
fn first_set<'a>(candidates: [Option<&'a str>; 3], fallback: &'a str) -> &'a str {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or(fallback)
}

fn to_reference(file: &File, command: &Command, repository_name: &str) -> Reference {
    let repository = file.find_repository(repository_name);

    Reference::new(first_set(
        [
            command.to.as_deref(),
            repository.and_then(|r| r.base_branch.as_deref()),
            file.general.base_branch.as_deref(),
        ],
        DEFAULT_BASE_BRANCH,
    ))
}

fn merge_strategy(file: &File, command: &Command, repository_name: &str) -> Result<MergeStrategy> {
    let repository = file.find_repository(repository_name);
    let default = MergeStrategy::default().to_string();

    first_set(
        [
            command.merge_strategy.as_deref(),
            repository.and_then(|r| r.merge_strategy.as_deref()),
            file.general.merge_strategy.as_deref(),
        ],
        &default,
    )
    .parse()
}
