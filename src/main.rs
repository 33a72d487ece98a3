//! ghp-deploy - publish a static site to GitHub Pages.

mod auth;
mod cli;
mod config;
mod deploy;
mod error;
mod init;
mod logger;
mod publish;
mod status;
mod utils;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use config::Project;
use utils::{command::ShellRunner, prompt::TermPrompter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    which::which("git").context("`git` not found. Please install it first.")?;

    let project = Project::new(cli.root);
    let runner = ShellRunner;

    match command {
        Commands::Init => init::run_init(&project, &runner, &TermPrompter),
        Commands::Deploy => deploy::run_deploy(&project, &runner),
        Commands::Status => status::run_status(&project, &runner),
        Commands::Open => status::run_open(&project, &runner),
    }
}
