//! External command execution.
//!
//! The workflows never spawn processes directly; they go through the
//! [`CommandRunner`] capability so tests can substitute a scripted fake
//! instead of shelling out to real `git`/`gh`.

use anyhow::{Context, Result, bail};
use std::{path::Path, process::Command};

/// Captured result of one subprocess invocation.
///
/// A non-zero exit code is not an `Err`; only a failure to spawn is.
/// Callers that require success use [`CommandRunner::checked`].
#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs external commands in a given working directory.
pub trait CommandRunner {
    /// Execute a command and capture its output.
    ///
    /// # Errors
    /// Returns error only if the command fails to execute at all.
    fn run(&self, root: &Path, program: &str, args: &[&str]) -> Result<CmdOutput>;

    /// True when the command runs and exits zero.
    fn succeeds(&self, root: &Path, program: &str, args: &[&str]) -> bool {
        self.run(root, program, args)
            .map(|output| output.success)
            .unwrap_or(false)
    }

    /// Trimmed stdout of a successful run, `None` on failure or when the
    /// command prints nothing.
    fn capture(&self, root: &Path, program: &str, args: &[&str]) -> Option<String> {
        self.run(root, program, args)
            .ok()
            .filter(|output| output.success)
            .map(|output| output.stdout.trim().to_owned())
            .filter(|s| !s.is_empty())
    }

    /// Execute a command, treating a non-zero exit code as an error whose
    /// message carries the command's stderr.
    fn checked(&self, root: &Path, program: &str, args: &[&str]) -> Result<CmdOutput> {
        let output = self.run(root, program, args)?;
        if !output.success {
            let detail = if output.stderr.trim().is_empty() {
                output.stdout.trim()
            } else {
                output.stderr.trim()
            };
            if detail.is_empty() {
                bail!("command `{program}` failed");
            }
            bail!("command `{program}` failed: {detail}");
        }
        Ok(output)
    }
}

/// Real subprocess runner built on `std::process::Command`.
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, root: &Path, program: &str, args: &[&str]) -> Result<CmdOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(root)
            .output()
            .with_context(|| format!("failed to execute `{program}`"))?;

        Ok(CmdOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ============================================================================
// Test Fake
// ============================================================================


// ============================================================================
// Tests
// ============================================================================
