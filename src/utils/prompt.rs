//! Interactive prompting.
//!
//! Prompts block until answered; the workflows are strictly sequential.
//! The [`Prompter`] capability keeps workflow logic testable with a
//! scripted fake instead of a real terminal.

use anyhow::Result;
use dialoguer::{Confirm, Input};

/// Blocking terminal interaction.
pub trait Prompter {
    /// Free-text prompt. An empty answer is allowed here; callers that
    /// need a non-empty value validate and re-prompt themselves.
    fn input(&self, message: &str, default: Option<&str>) -> Result<String>;

    /// Yes/no prompt.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Real terminal prompter built on dialoguer.
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn input(&self, message: &str, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_owned());
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()?)
    }
}

// ============================================================================
// Test Fake
// ============================================================================
