//! Deployment workflow.
//!
//! Validates preconditions, publishes the site directory onto the pages
//! branch, and stamps the configuration with the deployment time.

use crate::{
    auth::Probe,
    config::{ConfigPatch, ENTRY_POINT, Project},
    error::DeployError,
    log, logger,
    publish::{PublishOptions, publish},
    utils::command::CommandRunner,
};
use anyhow::{Result, bail};
use chrono::{SecondsFormat, Utc};

/// Run one publish cycle.
///
/// Preconditions are checked in order and abort before any side effect:
/// config present, authentication verified, site directory present,
/// entry-point file present.
pub fn run_deploy(project: &Project, runner: &dyn CommandRunner) -> Result<()> {
    let store = project.store();
    if !store.exists() {
        logger::error("Project not initialized");
        logger::hint("Run `ghp-deploy init` first");
        bail!(DeployError::NotInitialized);
    }

    let probe = Probe::new(runner, project.root());
    if !probe.verify_auth() {
        bail!(DeployError::AuthRequired);
    }

    let config = store.load()?;
    let site_path = project.site_path(&config);
    if !site_path.is_dir() {
        logger::error(&format!(
            "Site directory not found: {}",
            config.site_directory
        ));
        bail!(DeployError::MissingSiteContent(site_path));
    }
    let entry_point = site_path.join(ENTRY_POINT);
    if !entry_point.is_file() {
        logger::error(&format!(
            "{ENTRY_POINT} not found in {}/",
            config.site_directory
        ));
        bail!(DeployError::MissingSiteContent(entry_point));
    }

    log!("deploy"; "publishing to GitHub Pages");
    logger::detail(&format!("site:   {}/", config.site_directory));
    logger::detail(&format!("branch: {}", config.branch));
    logger::detail(&format!("url:    {}", config.live_url()));

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let options = PublishOptions {
        branch: config.branch.clone(),
        message: format!("Deploy: {timestamp}"),
        include_dotfiles: false,
        repo_url: config.repo_url(),
    };

    if let Err(err) = publish(runner, &site_path, &options) {
        let message = format!("{err:#}");
        logger::error("Deployment failed");
        print_remediation(&message);
        bail!(DeployError::PublishFailed(message));
    }

    store.update(ConfigPatch {
        last_deployment_timestamp: Some(timestamp),
        ..Default::default()
    })?;

    logger::success("Deployment successful");
    logger::hint(&config.live_url());
    logger::detail("Note: it may take 1-2 minutes for changes to appear");
    Ok(())
}

/// Targeted remediation hint selected by error-text inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Remedy {
    Permission,
    Remote,
}

fn remediation(message: &str) -> Option<Remedy> {
    let lower = message.to_ascii_lowercase();
    if lower.contains("permission") {
        Some(Remedy::Permission)
    } else if lower.contains("remote") {
        Some(Remedy::Remote)
    } else {
        None
    }
}

fn print_remediation(message: &str) {
    match remediation(message) {
        Some(Remedy::Permission) => {
            logger::warn("This might be a permission issue. Try:");
            logger::hint("  gh auth login");
        }
        Some(Remedy::Remote) => {
            logger::warn("Remote repository issue. Check that:");
            logger::hint("  1. the repository exists on GitHub");
            logger::hint("  2. you have push access");
            logger::hint("  3. run: git remote -v");
        }
        None => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
