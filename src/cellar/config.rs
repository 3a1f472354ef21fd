// src/cellar/config.rs

//! Configuration types for the Cellar build environment

use std::path::PathBuf;

/// Configuration for the Cellar
#[derive(Debug, Clone)]
pub struct CellarConfig {
    /// Directory for downloaded sources
    pub source_cache: PathBuf,
    /// Root the install layout hangs off of
    pub prefix_root: PathBuf,
    /// Number of parallel compile jobs
    pub jobs: u32,
    /// Refuse to download; only cached sources may be used
    pub offline: bool,
    /// Keep the temporary build directory after completion (for debugging)
    pub keep_builddir: bool,
    /// External configure tool invoked with the translated argument list
    pub configure_tool: String,
    /// External build tool for the compile and install steps
    pub make_tool: String,
}

impl Default for CellarConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            source_cache: PathBuf::from("/var/cache/formulary/sources"),
            prefix_root: PathBuf::from("/opt/formulary"),
            jobs,
            offline: false,
            keep_builddir: false,
            configure_tool: "cmake".to_string(),
            make_tool: "make".to_string(),
        }
    }
}

/// Result of one brew run
#[derive(Debug, Clone)]
pub struct BrewResult {
    /// The keg prefix the formula was installed into
    pub prefix: PathBuf,
    /// Accumulated build log
    pub log: String,
    /// Non-fatal issues observed during the run
    pub warnings: Vec<String>,
}
