//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ghp-deploy CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize the GitHub repository and deployment configuration
    Init,

    /// Deploy the site directory to the GitHub Pages branch
    Deploy,

    /// Show deployment status and configuration
    Status,

    /// Open the live site in your browser
    Open,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Commands::Init))
    }
    pub const fn is_deploy(&self) -> bool {
        matches!(self.command, Some(Commands::Deploy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_accepted() {
        let cli = Cli::parse_from(["ghp-deploy"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn test_root_flag() {
        let cli = Cli::parse_from(["ghp-deploy", "--root", "/tmp/site", "deploy"]);
        assert_eq!(cli.root, PathBuf::from("/tmp/site"));
        assert!(cli.is_deploy());
    }

    #[test]
    fn test_subcommand_parsing() {
        let cli = Cli::parse_from(["ghp-deploy", "init"]);
        assert!(cli.is_init());

        let cli = Cli::parse_from(["ghp-deploy", "status"]);
        assert!(matches!(cli.command, Some(Commands::Status)));

        let cli = Cli::parse_from(["ghp-deploy", "open"]);
        assert!(matches!(cli.command, Some(Commands::Open)));
    }
}
