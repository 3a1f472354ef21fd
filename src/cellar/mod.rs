// src/cellar/mod.rs

//! Cellar: the build environment for brewing formulas
//!
//! The Cellar owns the source cache and the install root. It handles:
//! - Fetching and checksum-verifying source archives
//! - Extracting and patching sources
//! - Running the external configure/compile/install commands
//! - Post-install fixups (symlinks, control-script patches, relocations)

mod archive;
mod brew;
mod config;

pub use brew::Brew;
pub use config::{BrewResult, CellarConfig};

use crate::checksum::Checksum;
use crate::error::{Error, Result};
use crate::formula::Formula;
use crate::options::OptionSet;
use crate::platform::HostPlatform;
use archive::download_file;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// The Cellar: where formulas are brewed
pub struct Cellar {
    pub(crate) config: CellarConfig,
}

impl Cellar {
    /// Create a new Cellar with the given configuration
    pub fn new(config: CellarConfig) -> Self {
        Self { config }
    }

    /// Create a Cellar with default configuration
    pub fn with_defaults() -> Self {
        Self::new(CellarConfig::default())
    }

    /// Brew a formula: fetch, build, install, and fix up
    ///
    /// Phases run strictly in order; any failure aborts the run and later
    /// phases never execute. Options not declared by the formula are dropped
    /// before translation.
    pub fn brew(
        &self,
        formula: &Formula,
        options: &OptionSet,
        platform: &HostPlatform,
    ) -> Result<BrewResult> {
        info!(
            "Brewing {} version {}",
            formula.package.name, formula.package.version
        );

        let options = options.restrict_to(formula.declared_options());

        let mut brew = Brew::new(self, formula, options, *platform)?;

        info!("Fetching source...");
        brew.fetch()?;

        info!("Unpacking and patching source...");
        brew.unpack()?;
        brew.patch_source()?;

        info!("Configuring...");
        brew.configure()?;

        info!("Compiling...");
        brew.compile()?;

        info!("Installing...");
        brew.install()?;

        info!("Applying post-install fixups...");
        brew.fixup()?;

        brew.finish(self.config.keep_builddir)
    }

    /// Fetch the formula's source without building
    ///
    /// Useful for warming the cache before an offline brew.
    pub fn fetch(&self, formula: &Formula) -> Result<PathBuf> {
        let url = formula.archive_url();
        info!("Fetching: {}", url);
        self.fetch_source(&url, &formula.source.checksum)
    }

    /// Check whether the formula's source is already cached
    pub fn source_cached(&self, formula: &Formula) -> bool {
        let cache_key = formula.source.checksum.replace(':', "_");
        self.config.source_cache.join(cache_key).exists()
    }

    /// Fetch a source archive (with caching)
    ///
    /// The checksum doubles as the cache key. A cached file that no longer
    /// matches its checksum is discarded and re-downloaded.
    pub(crate) fn fetch_source(&self, url: &str, checksum: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.source_cache)?;

        let expected = Checksum::parse(checksum)?;

        let cache_key = checksum.replace(':', "_");
        let cached_path = self.config.source_cache.join(&cache_key);

        if cached_path.exists() {
            debug!("Using cached source: {}", cached_path.display());
            match expected.verify_file(&cached_path) {
                Ok(()) => return Ok(cached_path),
                Err(Error::ChecksumMismatch { .. }) => {
                    warn!("Cached file checksum mismatch, re-downloading");
                    fs::remove_file(&cached_path)?;
                }
                Err(e) => return Err(e),
            }
        }

        if self.config.offline {
            return Err(Error::Download {
                url: url.to_string(),
                reason: "offline mode and source not cached".to_string(),
            });
        }

        let temp_path = self.config.source_cache.join(format!("{}.tmp", cache_key));
        download_file(url, &temp_path)?;

        if let Err(e) = expected.verify_file(&temp_path) {
            fs::remove_file(&temp_path)?;
            return Err(e);
        }

        fs::rename(&temp_path, &cached_path)?;
        Ok(cached_path)
    }
}
