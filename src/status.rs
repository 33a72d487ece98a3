//! Status reporting and live-site opening.
//!
//! Both workflows are read-only with respect to the configuration.

use crate::{
    config::{DeployConfig, Project},
    error::DeployError,
    log, logger,
    utils::command::CommandRunner,
};
use anyhow::{Result, bail};
use colored::Colorize;

/// Platform launcher used to open URLs.
#[cfg(target_os = "macos")]
const LAUNCHER: &[&str] = &["open"];
#[cfg(target_os = "windows")]
const LAUNCHER: &[&str] = &["cmd", "/C", "start"];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const LAUNCHER: &[&str] = &["xdg-open"];

/// Print the current configuration plus an uncommitted-changes advisory.
pub fn run_status(project: &Project, runner: &dyn CommandRunner) -> Result<()> {
    let config = require_config(project)?;

    log!("status"; "deployment configuration");
    field(
        "Repository",
        &format!(
            "{}/{}",
            config.github_username.as_deref().unwrap_or("<username>"),
            config.repository_name
        ),
    );
    field("Branch", &config.branch);
    field("Site directory", &format!("{}/", config.site_directory));
    field("Live URL", &config.live_url());
    field(
        "Last deployed",
        config.last_deployment_timestamp.as_deref().unwrap_or("never"),
    );

    // Advisory only; git being absent or failing is not an error here
    let dirty = runner
        .capture(project.root(), "git", &["status", "--porcelain"])
        .is_some();
    if dirty {
        logger::warn("You have uncommitted changes");
    }

    Ok(())
}

/// Open the live site, falling back to printing the URL.
pub fn run_open(project: &Project, runner: &dyn CommandRunner) -> Result<()> {
    let config = require_config(project)?;
    let url = config.live_url();

    log!("open"; "{url}");

    let mut args: Vec<&str> = LAUNCHER[1..].to_vec();
    args.push(&url);
    if !runner.succeeds(project.root(), LAUNCHER[0], &args) {
        logger::warn("Could not open browser automatically");
        logger::hint(&format!("Visit: {url}"));
    }

    Ok(())
}

fn require_config(project: &Project) -> Result<DeployConfig> {
    let store = project.store();
    if !store.exists() {
        logger::error("Project not initialized");
        logger::hint("Run `ghp-deploy init` first");
        bail!(DeployError::NotInitialized);
    }
    store.load()
}

fn field(label: &str, value: &str) {
    println!("  {} {value}", format!("{label}:").cyan());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command::testing::FakeRunner;
    use tempfile::tempdir;

    fn initialized_project() -> (tempfile::TempDir, Project) {
        let dir = tempdir().unwrap();
        let project = Project::new(dir.path());
        project
            .store()
            .save(&DeployConfig {
                github_username: Some("alice".into()),
                repository_name: "blog".into(),
                ..Default::default()
            })
            .unwrap();
        (dir, project)
    }

    #[test]
    fn test_status_requires_config() {
        let dir = tempdir().unwrap();
        let project = Project::new(dir.path());
        let fake = FakeRunner::new();

        let err = run_status(&project, &fake).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::NotInitialized)
        ));
    }

    #[test]
    fn test_status_checks_working_tree() {
        let (_dir, project) = initialized_project();
        let fake = FakeRunner::new();
        fake.stdout_for("git status --porcelain", "M site/index.html");

        run_status(&project, &fake).unwrap();
        assert!(fake.called_with_prefix("git status --porcelain"));
    }

    #[test]
    fn test_status_tolerates_git_failure() {
        let (_dir, project) = initialized_project();
        let fake = FakeRunner::new();
        fake.fail_on("git status");

        run_status(&project, &fake).unwrap();
    }

    #[test]
    fn test_open_requires_config() {
        let dir = tempdir().unwrap();
        let project = Project::new(dir.path());
        let fake = FakeRunner::new();

        assert!(run_open(&project, &fake).is_err());
    }

    #[test]
    fn test_open_invokes_launcher_with_live_url() {
        let (_dir, project) = initialized_project();
        let fake = FakeRunner::new();

        run_open(&project, &fake).unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with(LAUNCHER[0]));
        assert!(calls[0].ends_with("https://alice.github.io/blog"));
    }

    #[test]
    fn test_open_launcher_failure_is_non_fatal() {
        let (_dir, project) = initialized_project();
        let fake = FakeRunner::new();
        fake.fail_on(LAUNCHER[0]);

        run_open(&project, &fake).unwrap();
    }
}
