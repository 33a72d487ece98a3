//! Capability interfaces for subprocess execution and interactive prompts.

pub mod command;
pub mod prompt;
