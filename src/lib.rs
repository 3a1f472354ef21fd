// src/lib.rs

//! Formulary
//!
//! A declarative build-formula engine: one TOML formula describes how to
//! fetch, configure, compile, and install a piece of software, and this
//! crate drives the external build tool through those steps.
//!
//! # Architecture
//!
//! - Formulas are inert data: source URL + checksum, dependencies,
//!   conflicts, known-bad toolchains, bottle digests
//! - Build options are a closed set of tagged variants; translation to
//!   configure arguments is a pure, deterministic function
//! - Host-release-gated behavior consumes one `HostPlatform` value
//!   resolved at run start
//! - The Cellar runs configure/compile/install strictly in order,
//!   fail-fast, then applies post-install fixups

pub mod cellar;
pub mod checksum;
pub mod configure;
mod error;
pub mod formula;
pub mod options;
pub mod patch;
pub mod paths;
pub mod platform;

pub use cellar::{Brew, BrewResult, Cellar, CellarConfig};
pub use checksum::{Checksum, DigestAlgorithm};
pub use configure::configure_args;
pub use error::{Error, Result};
pub use formula::{
    parse_formula, parse_formula_file, validate_formula, Conflict, Dependency, Formula,
    PatchRule, ToolchainFailure,
};
pub use options::{BuildOption, OptionSet};
pub use patch::{apply_rule, apply_rules, PatchOutcome};
pub use paths::InstallPaths;
pub use platform::{HostPlatform, MacRelease, ReleaseGate};
