//! SkinCheck CLI - skincare advice from a photo, in the terminal
//!
//! Drives the same screen flow as the mobile app: sign in, pick a photo,
//! wait for the analysis and browse the recommended products.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;
mod photo;

#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::analyze::run_analyze;
use crate::commands::auth_cmd::run_auth;
use crate::commands::catalog::run_catalog;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::promote::run_promote;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skincheck=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Catalog { category, json } => run_catalog(category, json)?,
        Commands::Analyze(args) => run_analyze(args, profile).await?,
        Commands::Promote(args) => run_promote(args, profile).await?,
        Commands::Auth { command } => run_auth(command, profile).await?,
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
