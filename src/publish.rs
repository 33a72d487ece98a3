//! Branch publishing.
//!
//! Copies a directory's contents as a single commit onto a target branch
//! and pushes it. The site files are staged in a scratch repository so the
//! project's own history is never touched; the publish branch always
//! mirrors exactly the current site directory.

use crate::utils::command::CommandRunner;
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Options for one publish run.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Branch served by the hosting platform.
    pub branch: String,
    /// Commit message for the publish commit.
    pub message: String,
    /// When false, dot-prefixed entries are excluded at every level.
    pub include_dotfiles: bool,
    /// Push target, e.g. `https://github.com/user/repo.git`.
    pub repo_url: String,
}

/// Publish `site_dir`'s contents to the configured branch.
///
/// Sequence: stage a copy of the site, create a fresh single-commit
/// history on the target branch, force-push it. The branch history is
/// intentionally rewritten on every deploy.
pub fn publish(
    runner: &dyn CommandRunner,
    site_dir: &Path,
    options: &PublishOptions,
) -> Result<()> {
    if !site_dir.is_dir() {
        bail!("site directory `{}` not found", site_dir.display());
    }

    let staging = tempfile::tempdir().context("failed to create staging directory")?;
    let root = staging.path();

    stage_site(site_dir, root, options.include_dotfiles)
        .with_context(|| format!("failed to stage `{}`", site_dir.display()))?;

    runner.checked(root, "git", &["init", "--initial-branch", &options.branch])?;
    runner.checked(root, "git", &["add", "-A"])?;
    runner.checked(root, "git", &["commit", "-m", &options.message])?;
    runner.checked(
        root,
        "git",
        &["push", "--force", &options.repo_url, &options.branch],
    )?;

    Ok(())
}

/// Recursively copy the site into the staging directory.
fn stage_site(src: &Path, dst: &Path, include_dotfiles: bool) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let name = entry.file_name();

        if !include_dotfiles && name.to_string_lossy().starts_with('.') {
            continue;
        }

        let from = entry.path();
        let to = dst.join(&name);
        if from.is_dir() {
            fs::create_dir_all(&to)?;
            stage_site(&from, &to, include_dotfiles)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
