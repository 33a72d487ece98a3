//! Deployment configuration management for `.ghp-deploy.json`.
//!
//! The config file lives in the project root and records the target
//! repository, publish branch, site directory and last deployment time:
//!
//! ```json
//! {
//!   "githubUsername": "alice",
//!   "repositoryName": "my-site",
//!   "branch": "gh-pages",
//!   "siteDirectory": "site",
//!   "lastDeploymentTimestamp": "2026-08-30T12:00:00Z"
//! }
//! ```
//!
//! Absence of the file is the valid "uninitialized" state. The
//! [`ConfigStore`] owns all reads and writes; workflows mutate only
//! through [`ConfigStore::update`] or [`ConfigStore::save`].

use crate::error::DeployError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name, relative to the project root.
pub const CONFIG_FILE: &str = ".ghp-deploy.json";

/// Default repository name offered during `init`.
pub const DEFAULT_REPO_NAME: &str = "my-site";

/// Branch served by GitHub Pages.
pub const DEFAULT_BRANCH: &str = "gh-pages";

/// Directory whose contents get published.
pub const DEFAULT_SITE_DIR: &str = "site";

/// File that must exist inside the site directory.
pub const ENTRY_POINT: &str = "index.html";

// ============================================================================
// Project Handle
// ============================================================================

/// Explicit handle to the project directory.
///
/// Threaded through every workflow so nothing relies on the implicit
/// process working directory.
pub struct Project {
    root: PathBuf,
    store: ConfigStore,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let store = ConfigStore::new(&root);
        Self { root, store }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub const fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Absolute-ish path to the site directory for a given config.
    pub fn site_path(&self, config: &DeployConfig) -> PathBuf {
        self.root.join(&config.site_directory)
    }
}

// ============================================================================
// Persisted Record
// ============================================================================

/// The sole persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeployConfig {
    /// GitHub identity used to build the live URL and remote address.
    pub github_username: Option<String>,

    /// Target repository name.
    pub repository_name: String,

    /// Publish branch served by GitHub Pages.
    pub branch: String,

    /// Relative path to the directory whose contents are published.
    pub site_directory: String,

    /// RFC 3339 timestamp of the last successful publish.
    pub last_deployment_timestamp: Option<String>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            github_username: None,
            repository_name: DEFAULT_REPO_NAME.to_owned(),
            branch: DEFAULT_BRANCH.to_owned(),
            site_directory: DEFAULT_SITE_DIR.to_owned(),
            last_deployment_timestamp: None,
        }
    }
}

impl DeployConfig {
    /// `https://<user>.github.io/<repo>`
    pub fn live_url(&self) -> String {
        format!(
            "https://{}.github.io/{}",
            self.username_or_placeholder(),
            self.repository_name
        )
    }

    /// `https://github.com/<user>/<repo>.git`
    pub fn repo_url(&self) -> String {
        format!(
            "https://github.com/{}/{}.git",
            self.username_or_placeholder(),
            self.repository_name
        )
    }

    fn username_or_placeholder(&self) -> &str {
        self.github_username.as_deref().unwrap_or("<username>")
    }
}

/// Partial field set for [`ConfigStore::update`].
///
/// `Some` fields replace the stored value; `None` fields are left alone.
/// The merge is field replacement, never a deep merge.
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub github_username: Option<String>,
    pub repository_name: Option<String>,
    pub branch: Option<String>,
    pub site_directory: Option<String>,
    pub last_deployment_timestamp: Option<String>,
}

// ============================================================================
// Store
// ============================================================================

/// Owns read/write access to the config file.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(CONFIG_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Side-effect-free existence check.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the config, returning the default record when the file is
    /// absent. A present-but-invalid file is `ConfigCorrupt`.
    pub fn load(&self) -> Result<DeployConfig> {
        if !self.exists() {
            return Ok(DeployConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read `{}`", self.path.display()))?;
        let config = serde_json::from_str(&content)
            .map_err(|err| DeployError::ConfigCorrupt(self.path.clone(), err))?;
        Ok(config)
    }

    /// Write the full record as pretty-printed JSON.
    pub fn save(&self, config: &DeployConfig) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .map_err(|err| DeployError::ConfigWrite(self.path.clone(), err))?;
        Ok(())
    }

    /// Load, shallow-merge the patch over the existing record, save, and
    /// return the merged record.
    pub fn update(&self, patch: ConfigPatch) -> Result<DeployConfig> {
        let mut config = self.load()?;

        if let Some(value) = patch.github_username {
            config.github_username = Some(value);
        }
        if let Some(value) = patch.repository_name {
            config.repository_name = value;
        }
        if let Some(value) = patch.branch {
            config.branch = value;
        }
        if let Some(value) = patch.site_directory {
            config.site_directory = value;
        }
        if let Some(value) = patch.last_deployment_timestamp {
            config.last_deployment_timestamp = Some(value);
        }

        self.save(&config)?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
