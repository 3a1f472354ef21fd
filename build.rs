// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: formula file path
fn formula_arg() -> Arg {
    Arg::new("formula")
        .required(true)
        .value_name("FORMULA")
        .help("Path to the formula file")
}

/// Common argument: install root directory
fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .long("prefix")
        .default_value("/opt/formulary")
        .help("Install root directory")
}

/// Common argument: repeatable build option selection
fn option_arg() -> Arg {
    Arg::new("options")
        .short('o')
        .long("option")
        .value_name("NAME")
        .action(ArgAction::Append)
        .help("Select a build option (repeatable)")
}

/// Common argument: host release override
fn platform_arg() -> Arg {
    Arg::new("platform")
        .long("platform")
        .help("Host release (e.g. mavericks or 10.9)")
}

fn build_cli() -> Command {
    Command::new("formulary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and install software from declarative formulas")
        .subcommand(
            Command::new("brew")
                .about("Brew a formula: fetch, configure, compile, install, fix up")
                .arg(formula_arg())
                .arg(option_arg())
                .arg(prefix_arg())
                .arg(platform_arg())
                .arg(
                    Arg::new("cache")
                        .long("cache")
                        .default_value("/var/cache/formulary/sources")
                        .help("Directory for caching downloaded sources"),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help("Number of parallel compile jobs"),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Show formula metadata, dependencies, conflicts, and bottles")
                .arg(formula_arg())
                .arg(platform_arg()),
        )
        .subcommand(
            Command::new("options")
                .about("List the build options a formula declares")
                .arg(formula_arg()),
        )
        .subcommand(
            Command::new("args")
                .about("Print the translated configure argument list")
                .arg(formula_arg())
                .arg(option_arg())
                .arg(prefix_arg())
                .arg(platform_arg()),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("formulary.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
        return;
    }

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
