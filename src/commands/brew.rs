// src/commands/brew.rs

//! Brew command - build and install a formula

use anyhow::{Context, Result};
use formulary::{configure_args, Cellar, CellarConfig, InstallPaths, OptionSet};
use std::path::PathBuf;
use tracing::info;

use super::{load_formula, resolve_platform};

/// Brew a formula
///
/// # Arguments
/// * `formula_path` - Path to the formula file
/// * `option_names` - Selected build option names (unrecognized ignored)
/// * `prefix` - Install root directory
/// * `cache` - Directory for caching downloaded sources
/// * `jobs` - Number of parallel compile jobs (None = auto)
/// * `platform` - Host release override (None = detect)
/// * `offline` - Only use cached sources
/// * `fetch_only` - Only fetch the source, don't build
/// * `dry_run` - Print the configure arguments without invoking anything
/// * `keep_builddir` - Keep build directory after completion
#[allow(clippy::too_many_arguments)]
pub fn cmd_brew(
    formula_path: &str,
    option_names: &[String],
    prefix: &str,
    cache: &str,
    jobs: Option<u32>,
    platform: Option<&str>,
    offline: bool,
    fetch_only: bool,
    dry_run: bool,
    keep_builddir: bool,
) -> Result<()> {
    println!("Reading formula: {}", formula_path);
    let formula = load_formula(formula_path)?;

    println!(
        "Formula: {} version {}",
        formula.package.name, formula.package.version
    );

    let platform = resolve_platform(platform)?;
    let options =
        OptionSet::parse_lossy(option_names).restrict_to(formula.declared_options());
    if !options.is_empty() {
        println!("Options: {}", options);
    }

    let mut config = CellarConfig {
        source_cache: PathBuf::from(cache),
        prefix_root: PathBuf::from(prefix),
        offline,
        keep_builddir,
        ..Default::default()
    };
    if let Some(j) = jobs {
        config.jobs = j;
    }

    if dry_run {
        let paths = InstallPaths::new(
            &config.prefix_root,
            formula.package.name.clone(),
            formula.package.version.clone(),
        );
        println!("Would configure with:");
        for arg in configure_args(&formula, &paths, &options, &platform) {
            println!("  {}", arg);
        }
        return Ok(());
    }

    let cellar = Cellar::new(config.clone());

    if fetch_only {
        println!("Fetching source (fetch-only mode)...");
        let path = cellar
            .fetch(&formula)
            .with_context(|| format!("Failed to fetch source for {}", formula.package.name))?;
        println!("\n[COMPLETE] Fetched: {}", path.display());
        println!("[OK] Source is cached. Ready for offline brew.");
        return Ok(());
    }

    if cellar.source_cached(&formula) {
        println!("Source already cached (offline brew possible)");
    }

    println!("Brewing with {} parallel jobs...", config.jobs);
    let result = cellar
        .brew(&formula, &options, &platform)
        .with_context(|| format!("Failed to brew {}", formula.package.name))?;

    println!("\n[COMPLETE] Installed: {}", result.prefix.display());

    if !result.warnings.is_empty() {
        println!("\nBuild warnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    info!(
        "Successfully brewed {} into {}",
        formula.package.name,
        result.prefix.display()
    );

    Ok(())
}
