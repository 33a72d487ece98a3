//! Deployment error taxonomy.
//!
//! Precondition failures abort the workflow immediately; failures during
//! optional steps (repository creation, browser launch) are downgraded to
//! warnings at the call site and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the workflows and the configuration store.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("config file `{0}` is corrupt (not valid JSON)")]
    ConfigCorrupt(PathBuf, #[source] serde_json::Error),

    #[error("failed to write config file `{0}`")]
    ConfigWrite(PathBuf, #[source] std::io::Error),

    #[error("project not initialized")]
    NotInitialized,

    #[error("authentication required")]
    AuthRequired,

    #[error("site content missing: `{0}` not found")]
    MissingSiteContent(PathBuf),

    #[error("failed to create commit: {0}")]
    CommitFailed(String),

    #[error("push failed on both `main` and `master`: {0}")]
    PushFailed(String),

    #[error("publish failed: {0}")]
    PublishFailed(String),
}
