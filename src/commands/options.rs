// src/commands/options.rs

//! Options command - list the build options a formula declares

use anyhow::Result;

use super::load_formula;

/// List declared options with their descriptions
pub fn cmd_options(formula_path: &str) -> Result<()> {
    let formula = load_formula(formula_path)?;

    let declared = formula.declared_options();
    if declared.is_empty() {
        println!("{} declares no build options", formula.package.name);
        return Ok(());
    }

    for option in declared {
        println!("--option {}", option);
        println!("\t{}", option.description());
    }

    Ok(())
}
