// src/formula/format.rs

//! Formula file format definitions
//!
//! Formulas are TOML files describing how to fetch, configure, build, and
//! install one package from source, plus the inert compatibility metadata
//! (conflicts, known-bad toolchains, bottle digests) the surrounding package
//! manager consumes.

use crate::options::BuildOption;
use crate::platform::{HostPlatform, MacRelease, ReleaseGate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A complete formula
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formula {
    /// Package metadata
    pub package: PackageSection,

    /// Source archive and checksum
    pub source: SourceSection,

    /// Declared dependencies, possibly release-gated
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// Packages this formula cannot coexist with
    #[serde(default)]
    pub conflicts: Vec<Conflict>,

    /// Toolchains known to fail the build
    #[serde(default)]
    pub fails_with: Vec<ToolchainFailure>,

    /// Prebuilt bottle digests, keyed by host release
    #[serde(default)]
    pub bottle: BTreeMap<MacRelease, String>,

    /// Build configuration: declared options and source patches
    #[serde(default)]
    pub build: BuildSection,

    /// Post-install fixups
    #[serde(default)]
    pub install: InstallSection,

    /// Variables for substitution
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl Formula {
    /// Substitute variables in a string
    ///
    /// Replaces `%(name)s` patterns with their values from:
    /// 1. Built-in variables (name, version)
    /// 2. Custom variables from the [variables] section
    /// 3. Extra caller-supplied pairs (e.g. resolved install paths)
    pub fn substitute(&self, template: &str, extra: &[(&str, String)]) -> String {
        let mut result = template.to_string();

        result = result.replace("%(name)s", &self.package.name);
        result = result.replace("%(version)s", &self.package.version);

        for (key, value) in &self.variables {
            result = result.replace(&format!("%({})s", key), value);
        }
        for (key, value) in extra {
            result = result.replace(&format!("%({})s", key), value);
        }

        result
    }

    /// Get the archive URL with variables substituted
    pub fn archive_url(&self) -> String {
        self.substitute(&self.source.archive, &[])
    }

    /// Get the archive filename from the URL
    pub fn archive_filename(&self) -> String {
        self.archive_url()
            .split('/')
            .next_back()
            .unwrap_or("source.tar.gz")
            .to_string()
    }

    /// Options this formula declares
    pub fn declared_options(&self) -> &[BuildOption] {
        &self.build.options
    }

    /// Dependencies that apply on the given host
    ///
    /// Gated entries whose predicate fails are dropped (e.g. a standalone
    /// process-list tool only needed before a given release).
    pub fn dependencies_for(&self, platform: &HostPlatform) -> Vec<&Dependency> {
        self.dependencies
            .iter()
            .filter(|d| d.when.map(|gate| gate.matches(platform)).unwrap_or(true))
            .collect()
    }

    /// Bottle digest for the given host, if one was published
    pub fn bottle_for(&self, platform: &HostPlatform) -> Option<&str> {
        self.bottle.get(&platform.release).map(|s| s.as_str())
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version, including any local revision suffix
    pub version: String,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Short description
    #[serde(default)]
    pub summary: Option<String>,
}

/// Source archive section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Source archive URL
    ///
    /// Supports `%(version)s` and `[variables]` substitution.
    pub archive: String,

    /// Checksum for the archive (`sha1:...` or `sha256:...`)
    pub checksum: String,
}

/// A declared dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name
    pub name: String,

    /// Build-time only (not needed at runtime)
    #[serde(default)]
    pub build: bool,

    /// Only applies when the host matches
    #[serde(default)]
    pub when: Option<ReleaseGate>,
}

/// Packages this formula conflicts with, and why
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conflict {
    /// Conflicting package names
    pub with: Vec<String>,

    /// Human-readable reason, surfaced verbatim by the package manager
    pub because: String,
}

/// A compiler/toolchain combination known to fail the build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainFailure {
    /// Compiler identifier (e.g. `llvm`)
    pub compiler: String,

    /// Specific compiler build number, if the failure is build-specific
    #[serde(default)]
    pub build: Option<u32>,

    /// Reference explaining the failure
    #[serde(default)]
    pub cause: Option<String>,
}

/// Build configuration section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildSection {
    /// Options this formula supports, from the closed option set
    #[serde(default)]
    pub options: Vec<BuildOption>,

    /// Patch rules applied to the source tree before configure
    #[serde(default)]
    pub patches: Vec<PatchRule>,
}

/// Post-install fixup section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InstallSection {
    /// Directories under the keg prefix removed after install
    /// (e.g. a database template the build should not have installed)
    #[serde(default)]
    pub remove_dirs: Vec<String>,

    /// Keg-relative paths symlinked into the shared bin directory
    #[serde(default)]
    pub bin_symlinks: Vec<String>,

    /// Keg-relative files relocated into the private libexec directory
    #[serde(default)]
    pub libexec_moves: Vec<String>,

    /// Patch rules applied to installed files
    #[serde(default)]
    pub patches: Vec<PatchRule>,
}

/// A single find/replace patch rule
///
/// `pattern` is a regex; `replace` uses regex replacement syntax (`${1}`
/// group references, `$$` for a literal dollar) and supports `%(...)s`
/// variable substitution before application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchRule {
    /// Target file, relative to the patch root
    pub file: String,

    /// Regex to search for
    pub pattern: String,

    /// Replacement text
    pub replace: String,

    /// Only applies when the host matches
    #[serde(default)]
    pub when: Option<ReleaseGate>,

    /// Skip the rule when the target already contains this literal
    ///
    /// Required for rules whose output would still match `pattern`, so a
    /// re-run over an already-patched file stays a no-op.
    #[serde(default)]
    pub unless_contains: Option<String>,
}
