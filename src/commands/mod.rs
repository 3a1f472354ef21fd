// src/commands/mod.rs
//! Command handlers for the formulary CLI

mod args;
mod brew;
mod info;
mod options;

pub use args::cmd_args;
pub use brew::cmd_brew;
pub use info::cmd_info;
pub use options::cmd_options;

use anyhow::{Context, Result};
use formulary::{parse_formula_file, validate_formula, Formula, HostPlatform};
use std::path::Path;
use std::str::FromStr;

/// Load a formula and print validation warnings
pub(crate) fn load_formula(path: &str) -> Result<Formula> {
    let path = Path::new(path);
    let formula = parse_formula_file(path)
        .with_context(|| format!("Failed to parse formula: {}", path.display()))?;

    for warning in validate_formula(&formula) {
        println!("Warning: {}", warning);
    }

    Ok(formula)
}

/// Resolve the host platform: explicit flag wins, otherwise detect
pub(crate) fn resolve_platform(flag: Option<&str>) -> Result<HostPlatform> {
    match flag {
        Some(value) => HostPlatform::from_str(value)
            .with_context(|| format!("Invalid --platform value: {}", value)),
        None => HostPlatform::detect()
            .context("Platform detection failed; pass --platform explicitly"),
    }
}
