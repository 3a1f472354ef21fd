// src/error.rs

//! Error types for the formulary crate

use thiserror::Error;

/// Result type for formulary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a formula or brewing it
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source download failed
    #[error("download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    /// Downloaded archive did not match the formula checksum
    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Formula file could not be deserialized
    #[error("failed to parse formula: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed field inside an otherwise well-formed formula
    #[error("parse error: {0}")]
    Parse(String),

    /// An external build step could not be started at all
    #[error("failed to run {phase} step: {source}")]
    Spawn {
        phase: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// An external build step exited non-zero
    ///
    /// The stderr is carried verbatim so the invoking user sees the build
    /// tool's own diagnostics.
    #[error("{phase} step failed with exit code {status}\nstderr: {stderr}")]
    BuildStep {
        phase: &'static str,
        status: i32,
        stderr: String,
    },

    /// A file the install left behind is required but absent
    #[error("required file missing: {0}")]
    MissingFile(String),

    /// Archive format we do not know how to extract
    #[error("unsupported archive format: {0}")]
    UnsupportedArchive(String),

    /// Host platform could not be determined
    #[error("could not detect host platform: {0}")]
    PlatformDetect(String),
}

impl Error {
    /// Create a new parse error with a message
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
