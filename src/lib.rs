pub mod changelog;
pub mod config;
pub mod error;
pub mod formatter;
pub mod git;
pub mod parser;
pub mod tracker;
pub mod ui;

pub use changelog::build_changelog;
pub use error::{ChangelogError, Result};
