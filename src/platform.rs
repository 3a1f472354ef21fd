// src/platform.rs

//! Host platform resolution
//!
//! Everything release-gated in a formula (conditional dependencies, patch
//! rules, bottle selection) consumes one `HostPlatform` value resolved at
//! run start, instead of scattering version conditionals through the code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::process::Command;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// A named host OS release, ordered oldest to newest
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
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MacRelease {
    Leopard,
    SnowLeopard,
    Lion,
    MountainLion,
    Mavericks,
}

impl MacRelease {
    /// Parse a release from a `10.x` product version string
    pub fn from_product_version(version: &str) -> Result<Self> {
        let minor = version
            .strip_prefix("10.")
            .and_then(|rest| rest.split('.').next())
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| {
                Error::PlatformDetect(format!("unrecognized product version: {}", version))
            })?;

        match minor {
            5 => Ok(Self::Leopard),
            6 => Ok(Self::SnowLeopard),
            7 => Ok(Self::Lion),
            8 => Ok(Self::MountainLion),
            // Anything newer than the newest release we name behaves like it
            m if m >= 9 => Ok(Self::Mavericks),
            _ => Err(Error::PlatformDetect(format!(
                "unsupported product version: {}",
                version
            ))),
        }
    }
}

/// The resolved host platform, queried by everything release-gated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform {
    pub release: MacRelease,
}

impl HostPlatform {
    /// Create a platform from an explicit release
    pub fn new(release: MacRelease) -> Self {
        Self { release }
    }

    /// Detect the host release via `sw_vers`
    ///
    /// Fails rather than guessing: a wrong release would mis-apply gated
    /// patch rules downstream.
    pub fn detect() -> Result<Self> {
        let output = Command::new("sw_vers")
            .arg("-productVersion")
            .output()
            .map_err(|e| Error::PlatformDetect(format!("sw_vers failed to run: {}", e)))?;

        if !output.status.success() {
            return Err(Error::PlatformDetect(format!(
                "sw_vers exited with {:?}",
                output.status.code()
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let release = MacRelease::from_product_version(&version)?;
        debug!("Detected host release: {} ({})", release, version);

        Ok(Self::new(release))
    }

    /// Check whether this host is at least the given release
    pub fn at_least(&self, release: MacRelease) -> bool {
        self.release >= release
    }

    /// Preferred process-list utility name
    ///
    /// `pgrep` ships with the OS from Mountain Lion on; older releases need
    /// the standalone `pidof` tool.
    pub fn process_lister(&self) -> &'static str {
        if self.at_least(MacRelease::MountainLion) {
            "pgrep"
        } else {
            "pidof"
        }
    }

    /// Whether the host needs the standalone `pidof` package installed
    pub fn needs_pidof_tool(&self) -> bool {
        !self.at_least(MacRelease::MountainLion)
    }

    /// Architectures for a universal binary build on this host
    pub fn universal_archs(&self) -> &'static [&'static str] {
        &["i386", "x86_64"]
    }

    /// Release name used to look up a bottle digest
    pub fn bottle_tag(&self) -> String {
        self.release.to_string()
    }
}

/// A release predicate attached to gated formula data
///
/// Written in formula files as `when = { min = "mountain_lion" }` or
/// `when = { before = "mountain_lion" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseGate {
    /// Applies on this release or newer
    Min(MacRelease),
    /// Applies strictly before this release
    Before(MacRelease),
}

impl ReleaseGate {
    /// Evaluate the predicate against the resolved host
    pub fn matches(&self, platform: &HostPlatform) -> bool {
        match self {
            Self::Min(release) => platform.at_least(*release),
            Self::Before(release) => !platform.at_least(*release),
        }
    }
}

impl FromStr for HostPlatform {
    type Err = Error;

    /// Accept either a release name (`mountain_lion`) or a product version
    /// (`10.8`)
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(release) = MacRelease::from_str(s) {
            return Ok(Self::new(release));
        }
        MacRelease::from_product_version(s).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_ordering() {
        assert!(MacRelease::Lion < MacRelease::MountainLion);
        assert!(MacRelease::MountainLion < MacRelease::Mavericks);
        assert!(MacRelease::Leopard < MacRelease::Mavericks);
    }

    #[test]
    fn test_release_names() {
        assert_eq!(MacRelease::MountainLion.to_string(), "mountain_lion");
        assert_eq!(MacRelease::from_str("mavericks").unwrap(), MacRelease::Mavericks);
    }

    #[test]
    fn test_from_product_version() {
        assert_eq!(
            MacRelease::from_product_version("10.7.5").unwrap(),
            MacRelease::Lion
        );
        assert_eq!(
            MacRelease::from_product_version("10.8").unwrap(),
            MacRelease::MountainLion
        );
        assert_eq!(
            MacRelease::from_product_version("10.9.2").unwrap(),
            MacRelease::Mavericks
        );
        // Newer than anything we name still resolves
        assert_eq!(
            MacRelease::from_product_version("10.12").unwrap(),
            MacRelease::Mavericks
        );
        assert!(MacRelease::from_product_version("11").is_err());
        assert!(MacRelease::from_product_version("10.x").is_err());
    }

    #[test]
    fn test_process_lister_gate() {
        let old = HostPlatform::new(MacRelease::Lion);
        let new = HostPlatform::new(MacRelease::MountainLion);

        assert_eq!(old.process_lister(), "pidof");
        assert!(old.needs_pidof_tool());

        assert_eq!(new.process_lister(), "pgrep");
        assert!(!new.needs_pidof_tool());
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!(
            HostPlatform::from_str("mountain_lion").unwrap().release,
            MacRelease::MountainLion
        );
        assert_eq!(
            HostPlatform::from_str("10.9").unwrap().release,
            MacRelease::Mavericks
        );
        assert!(HostPlatform::from_str("windows_vista").is_err());
    }

    #[test]
    fn test_release_gate() {
        let old = HostPlatform::new(MacRelease::Lion);
        let new = HostPlatform::new(MacRelease::Mavericks);

        let min = ReleaseGate::Min(MacRelease::MountainLion);
        assert!(!min.matches(&old));
        assert!(min.matches(&new));

        let before = ReleaseGate::Before(MacRelease::MountainLion);
        assert!(before.matches(&old));
        assert!(!before.matches(&new));
    }

    #[test]
    fn test_bottle_tag() {
        assert_eq!(
            HostPlatform::new(MacRelease::Mavericks).bottle_tag(),
            "mavericks"
        );
    }
}
