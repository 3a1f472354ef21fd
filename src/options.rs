// src/options.rs

//! Build option set for a formula
//!
//! Options are a closed set of tagged variants rather than free-form named
//! flags. Wire names are kebab-case and round-trip exactly through
//! `FromStr`/`Display`. Unrecognized names are ignored, not rejected, so a
//! caller built against an older formula revision keeps working.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// A user-selectable build-time toggle
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BuildOption {
    /// Build universal binaries
    Universal,
    /// Build with unit tests (downloads the upstream test suite)
    WithTests,
    /// Build the embedded server
    WithEmbedded,
    /// Compile with the ARCHIVE storage engine enabled
    WithArchiveStorageEngine,
    /// Compile with the BLACKHOLE storage engine enabled
    WithBlackholeStorageEngine,
    /// Build with local infile loading support
    EnableLocalInfile,
    /// Enable innodb-memcached support
    EnableMemcached,
    /// Build with debug support
    EnableDebug,
}

impl BuildOption {
    /// One-line description shown by `formulary options`
    pub fn description(&self) -> &'static str {
        match self {
            Self::Universal => "Build universal binaries",
            Self::WithTests => "Build with unit tests",
            Self::WithEmbedded => "Build the embedded server",
            Self::WithArchiveStorageEngine => {
                "Compile with the ARCHIVE storage engine enabled"
            }
            Self::WithBlackholeStorageEngine => {
                "Compile with the BLACKHOLE storage engine enabled"
            }
            Self::EnableLocalInfile => "Build with local infile loading support",
            Self::EnableMemcached => "Enable innodb-memcached support",
            Self::EnableDebug => "Build with debug support",
        }
    }
}

/// An ordered set of selected build options
///
/// Iteration order is the enum declaration order, so argument generation
/// downstream is deterministic regardless of how the set was assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    selected: BTreeSet<BuildOption>,
}

impl OptionSet {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve user-supplied option names, ignoring names that are not part
    /// of the closed option set
    pub fn parse_lossy<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.as_ref();
            match BuildOption::from_str(name) {
                Ok(opt) => {
                    set.selected.insert(opt);
                }
                Err(_) => {
                    debug!("Ignoring unrecognized option: {}", name);
                }
            }
        }
        set
    }

    /// Add an option to the set
    pub fn insert(&mut self, option: BuildOption) {
        self.selected.insert(option);
    }

    /// Check whether an option is selected
    pub fn contains(&self, option: BuildOption) -> bool {
        self.selected.contains(&option)
    }

    /// Drop options the formula does not declare
    ///
    /// Mirrors the lossy name resolution: selecting an option a formula
    /// revision no longer offers is not an error.
    pub fn restrict_to(&self, declared: &[BuildOption]) -> Self {
        let mut set = Self::new();
        for opt in &self.selected {
            if declared.contains(opt) {
                set.selected.insert(*opt);
            } else {
                debug!("Ignoring option not declared by formula: {}", opt);
            }
        }
        set
    }

    /// Iterate selected options in declaration order
    pub fn iter(&self) -> impl Iterator<Item = BuildOption> + '_ {
        self.selected.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|o| o.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl FromIterator<BuildOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = BuildOption>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}
