//! Initialization workflow.
//!
//! First-time setup: local repository, GitHub identity, remote repository,
//! initial commit/push, and configuration persistence. Every step is gated
//! on the success of the previous one and blocks on its prompt or tool
//! invocation before the next begins.

use crate::{
    auth::Probe,
    config::{DEFAULT_REPO_NAME, DeployConfig, ENTRY_POINT, Project},
    error::DeployError,
    log, logger,
    utils::{command::CommandRunner, prompt::Prompter},
};
use anyhow::{Result, bail};
use std::path::Path;

/// Commit message for the optional initial commit.
const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// Default-branch names tried when pushing, in order. The fallback covers
/// repositories still using the older convention.
const PUSH_BRANCHES: &[&str] = &["main", "master"];

/// Run first-time setup for the project.
pub fn run_init(
    project: &Project,
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
) -> Result<()> {
    let root = project.root();
    log!("init"; "GitHub Pages setup");

    ensure_local_repo(runner, root)?;

    let probe = Probe::new(runner, root);
    let username = match probe.resolve_identity() {
        Some(identity) => {
            logger::success(&format!(
                "Detected GitHub username: {} (via {})",
                identity.name, identity.source
            ));
            identity.name
        }
        None => prompt_username(prompter)?,
    };

    let repo_name = prompt_repo_name(prompter)?;

    let config = DeployConfig {
        github_username: Some(username.clone()),
        repository_name: repo_name.clone(),
        ..Default::default()
    };

    // Hard precondition: nothing to publish without an entry point.
    let entry_point = project.site_path(&config).join(ENTRY_POINT);
    if !entry_point.is_file() {
        logger::error(&format!(
            "{}/{ENTRY_POINT} not found",
            config.site_directory
        ));
        logger::detail("Expected layout:");
        logger::detail(&format!("  {}/", config.site_directory));
        logger::detail(&format!("    └── {ENTRY_POINT}"));
        bail!(DeployError::MissingSiteContent(entry_point));
    }

    if probe.gh_cli_ready() {
        offer_repo_creation(runner, prompter, root, &config)?;
    } else {
        logger::warn("GitHub CLI not found");
        logger::hint("Create the repository manually at https://github.com/new, then run:");
        logger::hint(&format!("  git remote add origin {}", config.repo_url()));
        prompter.confirm("Continue once the remote is configured?", true)?;
    }

    offer_initial_commit(runner, prompter, root)?;

    project.store().save(&config)?;

    logger::success("Setup complete");
    logger::detail("next steps:");
    logger::detail("  ghp-deploy deploy    publish the site");
    logger::detail("  ghp-deploy status    check configuration");
    logger::detail("  ghp-deploy open      open the live site");
    logger::detail(&format!("your site will be available at {}", config.live_url()));
    Ok(())
}

/// Step 1: make sure a git repository exists at the project root.
fn ensure_local_repo(runner: &dyn CommandRunner, root: &Path) -> Result<()> {
    if runner.succeeds(root, "git", &["rev-parse", "--is-inside-work-tree"]) {
        logger::success("Git repository already initialized");
    } else {
        runner.checked(root, "git", &["init"])?;
        logger::success("Git repository initialized");
    }
    Ok(())
}

/// Step 2 fallback: ask for the username, re-prompting until non-empty.
fn prompt_username(prompter: &dyn Prompter) -> Result<String> {
    loop {
        let answer = prompter.input("Enter your GitHub username", None)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_owned());
        }
        logger::error("Username is required");
    }
}

/// Step 3: repository name with a fixed default.
fn prompt_repo_name(prompter: &dyn Prompter) -> Result<String> {
    let answer = prompter.input("Repository name", Some(DEFAULT_REPO_NAME))?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        DEFAULT_REPO_NAME.to_owned()
    } else {
        answer.to_owned()
    })
}

/// Step 5: best-effort remote creation through `gh`. Failure (e.g. the
/// repository already exists) is downgraded to a warning.
fn offer_repo_creation(
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    root: &Path,
    config: &DeployConfig,
) -> Result<()> {
    let repo_name = &config.repository_name;
    if !prompter.confirm(&format!("Create GitHub repository \"{repo_name}\"?"), true)? {
        return Ok(());
    }

    match runner.checked(
        root,
        "gh",
        &[
            "repo",
            "create",
            repo_name,
            "--public",
            "--source=.",
            "--remote=origin",
        ],
    ) {
        Ok(_) => logger::success(&format!(
            "GitHub repository created: https://github.com/{}/{repo_name}",
            config.github_username.as_deref().unwrap_or_default()
        )),
        Err(_) => {
            logger::warn("Repository creation failed (it may already exist)");
            logger::hint("Add the remote manually:");
            logger::hint(&format!("  git remote add origin {}", config.repo_url()));
        }
    }
    Ok(())
}

/// Step 7: optional stage-all commit and push of uncommitted changes.
fn offer_initial_commit(
    runner: &dyn CommandRunner,
    prompter: &dyn Prompter,
    root: &Path,
) -> Result<()> {
    let dirty = runner
        .capture(root, "git", &["status", "--porcelain"])
        .is_some();
    if !dirty || !prompter.confirm("Commit current changes?", true)? {
        return Ok(());
    }

    runner
        .checked(root, "git", &["add", "-A"])
        .and_then(|_| runner.checked(root, "git", &["commit", "-m", INITIAL_COMMIT_MESSAGE]))
        .map_err(|err| DeployError::CommitFailed(format!("{err:#}")))?;
    logger::success("Initial commit created");

    if prompter.confirm("Push to GitHub?", true)? {
        push_with_fallback(runner, root)?;
    }
    Ok(())
}

/// Try the conventional default-branch names in order; the second push is
/// attempted only after the first one fails.
fn push_with_fallback(runner: &dyn CommandRunner, root: &Path) -> Result<()> {
    let mut last_error = String::new();
    for branch in PUSH_BRANCHES.iter().copied() {
        match runner.checked(root, "git", &["push", "--set-upstream", "origin", branch]) {
            Ok(_) => {
                logger::success(&format!("Pushed to origin/{branch}"));
                return Ok(());
            }
            Err(err) => last_error = format!("{err:#}"),
        }
    }

    logger::error("Failed to push");
    logger::hint("Push manually once the remote is reachable:");
    logger::hint("  git push -u origin main");
    Err(DeployError::PushFailed(last_error).into())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{command::testing::FakeRunner, prompt::testing::FakePrompter};
    use std::fs;
    use tempfile::tempdir;

    fn project_with_site() -> (tempfile::TempDir, Project) {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("site")).unwrap();
        fs::write(dir.path().join("site/index.html"), "<html></html>").unwrap();
        let project = Project::new(dir.path());
        (dir, project)
    }

    #[test]
    fn test_init_with_detected_identity() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.stdout_for("gh api user", "alice");

        let prompter = FakePrompter::new();
        prompter.push_text("blog"); // repository name
        prompter.push_confirm(false); // skip repo creation

        run_init(&project, &fake, &prompter).unwrap();

        let config = project.store().load().unwrap();
        assert_eq!(config.github_username.as_deref(), Some("alice"));
        assert_eq!(config.repository_name, "blog");
        assert_eq!(config.branch, "gh-pages");
        assert!(config.last_deployment_timestamp.is_none());
    }

    #[test]
    fn test_init_prompts_for_username_until_non_empty() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.fail_on("gh"); // no CLI, no identity sources

        let prompter = FakePrompter::new();
        prompter.push_text("   "); // rejected: empty after trim
        prompter.push_text("alice");
        prompter.push_text(""); // repository name: accept default
        prompter.push_confirm(true); // continue past manual instructions

        run_init(&project, &fake, &prompter).unwrap();

        let config = project.store().load().unwrap();
        assert_eq!(config.github_username.as_deref(), Some("alice"));
        assert_eq!(config.repository_name, DEFAULT_REPO_NAME);
    }

    #[test]
    fn test_init_missing_site_content_fails_fast() {
        let dir = tempdir().unwrap();
        let project = Project::new(dir.path());
        let fake = FakeRunner::new();
        fake.stdout_for("gh api user", "alice");

        let prompter = FakePrompter::new();
        prompter.push_text("blog");

        let err = run_init(&project, &fake, &prompter).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::MissingSiteContent(_))
        ));
        assert!(!project.store().exists());
    }

    #[test]
    fn test_init_repo_creation_failure_is_non_fatal() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.stdout_for("gh api user", "alice");
        fake.fail_on("gh repo create");

        let prompter = FakePrompter::new();
        prompter.push_text("blog");
        prompter.push_confirm(true); // try to create the repo

        run_init(&project, &fake, &prompter).unwrap();
        assert!(fake.called_with_prefix("gh repo create blog --public"));
        assert!(project.store().exists());
    }

    #[test]
    fn test_init_runs_git_init_when_not_a_repo() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.fail_on("git rev-parse");
        fake.stdout_for("gh api user", "alice");

        let prompter = FakePrompter::new();
        prompter.push_text("blog");
        prompter.push_confirm(false);

        run_init(&project, &fake, &prompter).unwrap();
        assert!(fake.called_with_prefix("git init"));
    }

    #[test]
    fn test_init_push_falls_back_to_master() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.stdout_for("gh api user", "alice");
        fake.stdout_for("git status --porcelain", "M site/index.html");
        fake.fail_on("git push --set-upstream origin main");

        let prompter = FakePrompter::new();
        prompter.push_text("blog");
        prompter.push_confirm(false); // skip repo creation
        prompter.push_confirm(true); // commit
        prompter.push_confirm(true); // push

        run_init(&project, &fake, &prompter).unwrap();

        assert!(fake.called_with_prefix("git push --set-upstream origin main"));
        assert!(fake.called_with_prefix("git push --set-upstream origin master"));
        assert!(project.store().exists());
    }

    #[test]
    fn test_init_both_pushes_fail_is_fatal() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.stdout_for("gh api user", "alice");
        fake.stdout_for("git status --porcelain", "M site/index.html");
        fake.fail_on("git push");

        let prompter = FakePrompter::new();
        prompter.push_text("blog");
        prompter.push_confirm(false);
        prompter.push_confirm(true);
        prompter.push_confirm(true);

        let err = run_init(&project, &fake, &prompter).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::PushFailed(_))
        ));
    }

    #[test]
    fn test_init_clean_tree_skips_commit_prompt() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.stdout_for("gh api user", "alice");
        // `git status --porcelain` prints nothing: working tree clean

        let prompter = FakePrompter::new();
        prompter.push_text("blog");
        prompter.push_confirm(false); // skip repo creation
        // no commit/push confirms scripted: prompting again would error

        run_init(&project, &fake, &prompter).unwrap();
        assert!(!fake.called_with_prefix("git add"));
        assert!(!fake.called_with_prefix("git push"));
    }

    #[test]
    fn test_commit_failure_propagates() {
        let (_dir, project) = project_with_site();
        let fake = FakeRunner::new();
        fake.stdout_for("gh api user", "alice");
        fake.stdout_for("git status --porcelain", "M x");
        fake.fail_on("git commit");

        let prompter = FakePrompter::new();
        prompter.push_text("blog");
        prompter.push_confirm(false);
        prompter.push_confirm(true); // commit

        let err = run_init(&project, &fake, &prompter).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DeployError>(),
            Some(DeployError::CommitFailed(_))
        ));
    }
}
