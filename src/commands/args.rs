// src/commands/args.rs

//! Args command - print the translated configure argument list

use anyhow::Result;
use formulary::{configure_args, InstallPaths, OptionSet};

use super::{load_formula, resolve_platform};

/// Print the configure arguments, one per line
///
/// The output is deterministic for a given option set, so it can be diffed
/// across runs or recipe revisions.
pub fn cmd_args(
    formula_path: &str,
    option_names: &[String],
    prefix: &str,
    platform: Option<&str>,
) -> Result<()> {
    let formula = load_formula(formula_path)?;
    let platform = resolve_platform(platform)?;

    let options =
        OptionSet::parse_lossy(option_names).restrict_to(formula.declared_options());
    let paths = InstallPaths::new(
        prefix,
        formula.package.name.clone(),
        formula.package.version.clone(),
    );

    for arg in configure_args(&formula, &paths, &options, &platform) {
        println!("{}", arg);
    }

    Ok(())
}
