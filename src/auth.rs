//! Environment probe: external tool availability and GitHub identity.
//!
//! Deployment can work through an authenticated `gh` CLI or through an
//! already-configured push remote; either one is enough.

use crate::logger;
use crate::utils::command::CommandRunner;
use regex::Regex;
use std::{fmt, path::Path, sync::OnceLock};

/// Probes the local environment through a [`CommandRunner`].
pub struct Probe<'a> {
    runner: &'a dyn CommandRunner,
    root: &'a Path,
}

/// Where a resolved identity came from.
///
/// The sources have different trust/freshness characteristics, which is
/// why [`Probe::resolve_identity`] tries them in a fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    GhCli,
    GitConfig,
    RemoteUrl,
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GhCli => "gh CLI",
            Self::GitConfig => "git config",
            Self::RemoteUrl => "remote URL",
        };
        f.write_str(name)
    }
}

/// A GitHub username together with the source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub source: IdentitySource,
}

impl<'a> Probe<'a> {
    pub const fn new(runner: &'a dyn CommandRunner, root: &'a Path) -> Self {
        Self { runner, root }
    }

    /// True only if `gh` is installed AND reports an authenticated session.
    pub fn gh_cli_ready(&self) -> bool {
        self.runner.succeeds(self.root, "gh", &["--version"])
            && self.runner.succeeds(self.root, "gh", &["auth", "status"])
    }

    /// True if an `origin` remote is configured with a non-empty URL.
    pub fn remote_configured(&self) -> bool {
        self.origin_url().is_some()
    }

    fn origin_url(&self) -> Option<String> {
        self.runner
            .capture(self.root, "git", &["remote", "get-url", "origin"])
    }

    /// Resolve the GitHub username, trying in order:
    /// 1. the authenticated CLI identity,
    /// 2. the local `git config user.name`,
    /// 3. the username embedded in the origin remote URL.
    ///
    /// First non-empty result wins; `None` when all are exhausted.
    pub fn resolve_identity(&self) -> Option<Identity> {
        if self.gh_cli_ready()
            && let Some(login) =
                self.runner
                    .capture(self.root, "gh", &["api", "user", "--jq", ".login"])
        {
            return Some(Identity {
                name: login,
                source: IdentitySource::GhCli,
            });
        }

        if let Some(name) = self
            .runner
            .capture(self.root, "git", &["config", "user.name"])
        {
            return Some(Identity {
                name,
                source: IdentitySource::GitConfig,
            });
        }

        if let Some(url) = self.origin_url()
            && let Some(name) = username_from_remote(&url)
        {
            return Some(Identity {
                name,
                source: IdentitySource::RemoteUrl,
            });
        }

        None
    }

    /// Fails only when BOTH the CLI check and the remote check fail.
    /// Prints the exact commands to fix either path before returning false.
    pub fn verify_auth(&self) -> bool {
        let cli_ready = self.gh_cli_ready();
        let has_remote = self.remote_configured();

        if !cli_ready && !has_remote {
            logger::error("Authentication required");
            logger::hint("Either authenticate with the GitHub CLI (recommended):");
            logger::hint("  gh auth login");
            logger::hint("Or configure a GitHub remote:");
            logger::hint("  git remote add origin git@github.com:username/repo.git");
            return false;
        }

        true
    }
}

/// Extract a username from a GitHub remote URL.
///
/// Handles both SSH (`git@github.com:user/repo.git`) and HTTPS
/// (`https://github.com/user/repo.git`) forms.
pub fn username_from_remote(url: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"github\.com[:/]([^/\s]+)").unwrap());

    re.captures(url)
        .map(|caps| caps[1].trim_end_matches(".git").to_owned())
        .filter(|name| !name.is_empty())
}

// ============================================================================
// Tests
// ============================================================================
