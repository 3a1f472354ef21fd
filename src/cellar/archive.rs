// src/cellar/archive.rs

//! Source download and archive extraction for the Cellar

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tar::Archive;
use tracing::info;

/// Download a file from a URL
pub fn download_file(url: &str, dest: &Path) -> Result<()> {
    info!("Downloading: {}", url);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let response = reqwest::blocking::get(url).map_err(|e| Error::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(Error::Download {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response.bytes().map_err(|e| Error::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mut file = File::create(dest)?;
    file.write_all(&bytes)?;

    Ok(())
}

/// Extract an archive to a destination directory
///
/// Supports: .tar.gz, .tgz, .tar
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let filename = archive
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    fs::create_dir_all(dest)?;

    if filename.ends_with(".tar.gz") || filename.ends_with(".tgz") {
        let file = File::open(archive)?;
        let decoder = GzDecoder::new(file);
        let mut tar = Archive::new(decoder);
        tar.unpack(dest)?;
        Ok(())
    } else if filename.ends_with(".tar") {
        let file = File::open(archive)?;
        let mut tar = Archive::new(file);
        tar.unpack(dest)?;
        Ok(())
    } else {
        Err(Error::UnsupportedArchive(filename.to_string()))
    }
}
