// src/cli.rs
//! CLI definitions for formulary
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "formulary")]
#[command(author = "Formulary Project")]
#[command(version)]
#[command(about = "Build and install software from declarative formulas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Brew a formula: fetch, configure, compile, install, fix up
    Brew {
        /// Path to the formula file
        formula: String,

        /// Select a build option (repeatable); unrecognized names are ignored
        #[arg(short = 'o', long = "option", value_name = "NAME")]
        options: Vec<String>,

        /// Install root directory
        #[arg(long, default_value = "/opt/formulary")]
        prefix: String,

        /// Directory for caching downloaded sources
        #[arg(long, default_value = "/var/cache/formulary/sources")]
        cache: String,

        /// Number of parallel compile jobs (default: auto)
        #[arg(short, long)]
        jobs: Option<u32>,

        /// Host release (e.g. mavericks or 10.9); default: detect
        #[arg(long)]
        platform: Option<String>,

        /// Only use cached sources, never download
        #[arg(long)]
        offline: bool,

        /// Only fetch the source, don't build
        #[arg(long)]
        fetch_only: bool,

        /// Print the configure arguments without invoking anything
        #[arg(long)]
        dry_run: bool,

        /// Keep build directory after completion
        #[arg(long)]
        keep_builddir: bool,
    },

    /// Show formula metadata, dependencies, conflicts, and bottles
    Info {
        /// Path to the formula file
        formula: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Host release (e.g. mavericks or 10.9); default: detect
        #[arg(long)]
        platform: Option<String>,
    },

    /// List the build options a formula declares
    Options {
        /// Path to the formula file
        formula: String,
    },

    /// Print the translated configure argument list, one per line
    Args {
        /// Path to the formula file
        formula: String,

        /// Select a build option (repeatable); unrecognized names are ignored
        #[arg(short = 'o', long = "option", value_name = "NAME")]
        options: Vec<String>,

        /// Install root directory
        #[arg(long, default_value = "/opt/formulary")]
        prefix: String,

        /// Host release (e.g. mavericks or 10.9); default: detect
        #[arg(long)]
        platform: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
