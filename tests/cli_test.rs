// tests/cli_test.rs
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn changelog() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("changelog"));
    cmd.env_remove("CHANGELOG_GITHUB_TOKEN")
        .env_remove("CHANGELOG_MERGE_STRATEGY")
        .env_remove("CHANGELOG_BASE_BRANCH");
    cmd
}

/// Repository with a `v1.0.0` tag and one commit after it that references no pull request
fn repository_without_pull_requests() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    repo.remote("origin", "git@github.com:kdisneur/changelog.git")
        .unwrap();

    let sig = git2::Signature::now("John Doe", "john.doe@gmail.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let initial = repo
        .commit(Some("HEAD"), &sig, &sig, "initial Commit", &tree, &[])
        .unwrap();
    repo.reference("refs/tags/v1.0.0", initial, false, "tag")
        .unwrap();

    let parent = repo.find_commit(initial).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "fix typo", &tree, &[&parent])
        .unwrap();

    dir
}

#[test]
fn test_help() {
    changelog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate release notes"))
        .stdout(predicate::str::contains("--strategy"));
}

#[test]
fn test_version() {
    changelog()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("changelog"));
}

#[test]
fn test_requires_two_arguments() {
    changelog().arg("v1.0.0").assert().failure();
}

#[test]
fn test_not_a_repository() {
    let dir = TempDir::new().unwrap();

    changelog()
        .args(["-C"])
        .arg(dir.path())
        .args(["--config", "/dev/null", "v1.0.0", "v1.0.1"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not a git repository"));
}

#[test]
fn test_missing_config_file() {
    let dir = repository_without_pull_requests();

    changelog()
        .arg("-C")
        .arg(dir.path())
        .args(["--config", "/tmp/does/not/exist/changelog", "v1.0.0", "v1.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_no_commits_kept() {
    let dir = repository_without_pull_requests();

    changelog()
        .arg("-C")
        .arg(dir.path())
        .args(["--config", "/dev/null", "--branch", "HEAD", "v1.0.0", "v1.0.1"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no commits kept"));
}

#[test]
fn test_empty_range() {
    let dir = repository_without_pull_requests();

    changelog()
        .arg("-C")
        .arg(dir.path())
        .args(["--config", "/dev/null", "--branch", "v1.0.0", "v1.0.0", "v1.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no commits found"));
}

#[test]
fn test_unsupported_strategy() {
    let dir = repository_without_pull_requests();

    changelog()
        .arg("-C")
        .arg(dir.path())
        .args(["--config", "/dev/null", "--strategy", "rebase", "v1.0.0", "v1.0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Asked for 'rebase' strategy"));
}
