// src/checksum.rs

//! Checksum parsing and verification for source archives
//!
//! Checksums are written as `algorithm:hexdigest` (e.g. `sha256:abc123...`).
//! SHA-1 is accepted alongside SHA-256 because many older upstream recipes
//! still pin SHA-1 digests.

use crate::error::{Error, Result};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Digest algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestAlgorithm {
    /// SHA-1 (160-bit); legacy upstream recipes only
    Sha1,
    /// SHA-256 (256-bit)
    #[default]
    Sha256,
}

impl DigestAlgorithm {
    /// Get the digest output length in bytes
    #[inline]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
        }
    }

    /// Get the digest output length as a hex string
    #[inline]
    pub const fn hex_len(&self) -> usize {
        self.output_len() * 2
    }

    /// Get the algorithm name as a string
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// Hash a byte slice, returning the lowercase hex digest
    pub fn hash_bytes(&self, bytes: &[u8]) -> String {
        match self {
            Self::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(bytes);
                hex::encode(hasher.finalize())
            }
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(bytes);
                hex::encode(hasher.finalize())
            }
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            _ => Err(Error::parse(format!(
                "unsupported checksum algorithm: {} (supported: sha1, sha256)",
                s
            ))),
        }
    }
}

/// A parsed `algorithm:hexdigest` checksum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    pub algorithm: DigestAlgorithm,
    /// Lowercase hex digest
    pub digest: String,
}

impl Checksum {
    /// Parse a checksum from its `algorithm:hexdigest` form
    pub fn parse(s: &str) -> Result<Self> {
        let (algo, digest) = s
            .split_once(':')
            .ok_or_else(|| Error::parse(format!("invalid checksum format: {}", s)))?;

        let algorithm: DigestAlgorithm = algo.parse()?;
        let digest = digest.trim().to_lowercase();

        if digest.len() != algorithm.hex_len() {
            return Err(Error::parse(format!(
                "invalid {} digest length: expected {}, got {}",
                algorithm,
                algorithm.hex_len(),
                digest.len()
            )));
        }
        if !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::parse(format!("invalid hex in checksum: {}", digest)));
        }

        Ok(Self { algorithm, digest })
    }

    /// Verify a file on disk against this checksum
    ///
    /// Returns a `ChecksumMismatch` error carrying both digests on failure.
    pub fn verify_file(&self, path: &Path) -> Result<()> {
        let content = fs::read(path)?;
        let actual = self.algorithm.hash_bytes(&content);

        if actual != self.digest {
            return Err(Error::ChecksumMismatch {
                path: path.display().to_string(),
                expected: self.to_string(),
                actual: format!("{}:{}", self.algorithm, actual),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_sha1() {
        let c = Checksum::parse("sha1:4b59d96642c62c26648826ea4f9c30dbf123dbed").unwrap();
        assert_eq!(c.algorithm, DigestAlgorithm::Sha1);
        assert_eq!(c.digest.len(), 40);
    }

    #[test]
    fn test_parse_sha256() {
        let digest = "a".repeat(64);
        let c = Checksum::parse(&format!("sha256:{}", digest)).unwrap();
        assert_eq!(c.algorithm, DigestAlgorithm::Sha256);
        assert_eq!(c.digest, digest);
    }

    #[test]
    fn test_parse_uppercase_digest_normalized() {
        let c = Checksum::parse("sha1:4B59D96642C62C26648826EA4F9C30DBF123DBED").unwrap();
        assert_eq!(c.digest, "4b59d96642c62c26648826ea4f9c30dbf123dbed");
    }

    #[test]
    fn test_parse_rejects_unknown_algorithm() {
        assert!(Checksum::parse("md5:d41d8cd98f00b204e9800998ecf8427e").is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(Checksum::parse("sha1:abc123").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_prefix() {
        assert!(Checksum::parse("4b59d96642c62c26648826ea4f9c30dbf123dbed").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let digest = "z".repeat(40);
        assert!(Checksum::parse(&format!("sha1:{}", digest)).is_err());
    }

    #[test]
    fn test_verify_file_ok() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        // sha256 of "hello world"
        let c = Checksum::parse(
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        )
        .unwrap();
        c.verify_file(file.path()).unwrap();
    }

    #[test]
    fn test_verify_file_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not the expected content").unwrap();

        let c = Checksum::parse(
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        )
        .unwrap();
        let err = c.verify_file(file.path()).unwrap_err();
        match err {
            Error::ChecksumMismatch { expected, actual, .. } => {
                assert!(expected.starts_with("sha256:"));
                assert!(actual.starts_with("sha256:"));
                assert_ne!(expected, actual);
            }
            other => panic!("expected ChecksumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_sha1_of_known_input() {
        // sha1 of "hello world"
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"hello world").unwrap();

        let c = Checksum::parse("sha1:2aae6c35c94fcfb415dbe95f408b9ce91ee846ed").unwrap();
        c.verify_file(file.path()).unwrap();
    }
}
