// src/paths.rs

//! Install layout path arithmetic
//!
//! One keg per formula version under `<root>/Cellar/<name>/<version>`, with
//! shared `bin`, `etc`, and `var` directly under the root. Pure path
//! construction; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

/// Resolved install locations for one formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    root: PathBuf,
    name: String,
    version: String,
}

impl InstallPaths {
    /// Create the layout for a formula under the given root
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Root all shared directories hang off of
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The keg: private prefix this formula installs into
    pub fn prefix(&self) -> PathBuf {
        self.root
            .join("Cellar")
            .join(&self.name)
            .join(&self.version)
    }

    /// Shared bin directory symlinks land in
    pub fn shared_bin(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Shared configuration directory
    pub fn etc(&self) -> PathBuf {
        self.root.join("etc")
    }

    /// Shared mutable-data directory
    pub fn var(&self) -> PathBuf {
        self.root.join("var")
    }

    /// Keg-private bin
    pub fn keg_bin(&self) -> PathBuf {
        self.prefix().join("bin")
    }

    /// Keg-private libexec (helpers not meant for PATH)
    pub fn libexec(&self) -> PathBuf {
        self.prefix().join("libexec")
    }

    /// Resolve a path relative to the keg prefix
    pub fn in_prefix(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.prefix().join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> InstallPaths {
        InstallPaths::new("/opt/formulary", "mysql", "5.6.19-boxen1")
    }

    #[test]
    fn test_prefix_layout() {
        assert_eq!(
            paths().prefix(),
            PathBuf::from("/opt/formulary/Cellar/mysql/5.6.19-boxen1")
        );
    }

    #[test]
    fn test_shared_dirs() {
        let p = paths();
        assert_eq!(p.shared_bin(), PathBuf::from("/opt/formulary/bin"));
        assert_eq!(p.etc(), PathBuf::from("/opt/formulary/etc"));
        assert_eq!(p.var(), PathBuf::from("/opt/formulary/var"));
    }

    #[test]
    fn test_keg_private_dirs() {
        let p = paths();
        assert_eq!(
            p.libexec(),
            PathBuf::from("/opt/formulary/Cellar/mysql/5.6.19-boxen1/libexec")
        );
        assert_eq!(
            p.in_prefix("support-files/mysql.server"),
            PathBuf::from(
                "/opt/formulary/Cellar/mysql/5.6.19-boxen1/support-files/mysql.server"
            )
        );
    }
}
