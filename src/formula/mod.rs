// src/formula/mod.rs

//! Formula definitions: declarative metadata for building one package
//!
//! A formula describes:
//! - Where the source archive lives and its checksum
//! - Dependencies, conflicts, and known-bad toolchains
//! - The build options it supports
//! - Patch rules and post-install fixups
//!
//! # Example Formula
//!
//! ```toml
//! [package]
//! name = "mysql"
//! version = "5.6.19-boxen1"
//!
//! [source]
//! archive = "http://cdn.mysql.com/Downloads/MySQL-5.6/mysql-%(upstream)s.tar.gz"
//! checksum = "sha1:4b59d96642c62c26648826ea4f9c30dbf123dbed"
//!
//! [build]
//! options = ["enable-debug", "enable-memcached"]
//!
//! [variables]
//! upstream = "5.6.19"
//! ```

mod format;
pub mod parser;

pub use format::{
    BuildSection, Conflict, Dependency, Formula, InstallSection, PackageSection, PatchRule,
    SourceSection, ToolchainFailure,
};
pub use parser::{parse_formula, parse_formula_file, validate_formula};
