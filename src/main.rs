// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Brew {
            formula,
            options,
            prefix,
            cache,
            jobs,
            platform,
            offline,
            fetch_only,
            dry_run,
            keep_builddir,
        } => commands::cmd_brew(
            &formula,
            &options,
            &prefix,
            &cache,
            jobs,
            platform.as_deref(),
            offline,
            fetch_only,
            dry_run,
            keep_builddir,
        ),
        Commands::Info {
            formula,
            json,
            platform,
        } => commands::cmd_info(&formula, json, platform.as_deref()),
        Commands::Options { formula } => commands::cmd_options(&formula),
        Commands::Args {
            formula,
            options,
            prefix,
            platform,
        } => commands::cmd_args(&formula, &options, &prefix, platform.as_deref()),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "formulary", &mut std::io::stdout());
            Ok(())
        }
    }
}
