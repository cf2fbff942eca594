use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;

use changelog::config::{self, Command};
use changelog::{build_changelog, ui};

#[derive(clap::Parser)]
#[command(
    name = "changelog",
    version,
    about = "Generate release notes from the pull requests merged since a reference"
)]
struct Args {
    #[arg(help = "Reference of the previous release (tag, branch or commit)")]
    from: String,

    #[arg(value_name = "VERSION", help = "Name of the version being released")]
    version_name: String,

    #[arg(
        short,
        long,
        help = "Repository name such as org/repo (default: parsed from the git remote)"
    )]
    repository: Option<String>,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Path of the local git repository"
    )]
    change_dir: PathBuf,

    #[arg(
        short,
        long,
        help = "Reference to release (default: configured base branch, or master)"
    )]
    branch: Option<String>,

    #[arg(long, help = "Merge strategy: squash or merge (default: squash)")]
    strategy: Option<String>,

    #[arg(long, help = "Custom configuration file path (default: ~/.config/changelog)")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Print debug logs to stderr")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        ui::display_failure(&e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let file = config::load_config(args.config.as_deref())?;

    let command = Command {
        repository_name: args.repository,
        from: args.from,
        to: args.branch,
        version_name: args.version_name,
        date: Local::now().date_naive(),
        repository_local_path: args.change_dir,
        merge_strategy: args.strategy,
    };

    let validated = config::validate(&file, &command)?;
    let changelog = build_changelog(&validated)?;
    ui::display_changelog(&changelog);

    Ok(())
}
