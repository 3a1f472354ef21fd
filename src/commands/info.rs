// src/commands/info.rs

//! Info command - show formula metadata

use anyhow::{Context, Result};

use super::{load_formula, resolve_platform};

/// Show formula metadata, resolved against the host platform
pub fn cmd_info(formula_path: &str, json: bool, platform: Option<&str>) -> Result<()> {
    let formula = load_formula(formula_path)?;

    if json {
        let output =
            serde_json::to_string_pretty(&formula).context("Failed to serialize formula")?;
        println!("{}", output);
        return Ok(());
    }

    let platform = resolve_platform(platform)?;

    println!("{} {}", formula.package.name, formula.package.version);
    if let Some(summary) = &formula.package.summary {
        println!("{}", summary);
    }
    if let Some(homepage) = &formula.package.homepage {
        println!("{}", homepage);
    }

    println!("\nSource: {}", formula.archive_url());
    println!("Checksum: {}", formula.source.checksum);

    let deps = formula.dependencies_for(&platform);
    if !deps.is_empty() {
        println!("\nDependencies ({}):", platform.release);
        for dep in deps {
            if dep.build {
                println!("  {} (build)", dep.name);
            } else {
                println!("  {}", dep.name);
            }
        }
    }

    for conflict in &formula.conflicts {
        println!(
            "\nConflicts with {}: {}",
            conflict.with.join(", "),
            conflict.because
        );
    }

    for failure in &formula.fails_with {
        match failure.build {
            Some(build) => println!("\nFails with {} build {}", failure.compiler, build),
            None => println!("\nFails with {}", failure.compiler),
        }
        if let Some(cause) = &failure.cause {
            println!("  cause: {}", cause);
        }
    }

    match formula.bottle_for(&platform) {
        Some(digest) => println!("\nBottle ({}): {}", platform.bottle_tag(), digest),
        None => println!("\nNo bottle for {}", platform.bottle_tag()),
    }

    println!("Process lister: {}", platform.process_lister());

    Ok(())
}
