//! Validate, unpack and repack existing packages

use crate::archive::{Package, PackageWriter};
use crate::metadata::METADATA_ENTRY;
use crate::naming::{PACKAGE_EXTENSION, REQUIRED_EXTENSIONS};
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default name for repacked packages
pub const DEFAULT_PACKAGE_NAME: &str = "mod.mmpackage";

/// Structure report for a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Every required extension is present
    pub valid: bool,
    pub has_metadata: bool,
    /// Required extensions with no matching entry
    pub missing: Vec<String>,
    pub entries: Vec<String>,
}

/// Check a package for the four payload kinds and a metadata record
///
/// An entry counts for an extension when its name ends in `.<ext>`
/// (ignoring case). Beyond opening the container, zip integrity is not
/// checked.
pub fn validate_package(package_path: &Path) -> Result<ValidationReport> {
    let package = Package::open(package_path)?;
    let entries = package.entries();

    let missing: Vec<String> = REQUIRED_EXTENSIONS
        .iter()
        .filter(|ext| {
            let suffix = format!(".{}", ext);
            !entries
                .iter()
                .any(|e| e.to_lowercase().ends_with(&suffix))
        })
        .map(|ext| ext.to_string())
        .collect();

    Ok(ValidationReport {
        valid: missing.is_empty(),
        has_metadata: entries.iter().any(|e| e == METADATA_ENTRY),
        missing,
        entries,
    })
}

/// Directory a package unpacks into: `.mmpackage` stripped, `_unpacked` appended
pub fn unpack_dir(package_path: &Path) -> PathBuf {
    let path = package_path.to_string_lossy();
    let suffix = format!(".{}", PACKAGE_EXTENSION);
    let stem = path.strip_suffix(&suffix).unwrap_or(&path);
    PathBuf::from(format!("{}_unpacked", stem))
}

/// Extract every entry next to the package, returning the output directory
pub fn unpack_package(package_path: &Path) -> Result<PathBuf> {
    let out_dir = unpack_dir(package_path);
    Package::open(package_path)?.extract_all(&out_dir)?;
    tracing::info!("Unpacked {} into {}", package_path.display(), out_dir.display());
    Ok(out_dir)
}

/// Output file name for a repack request
///
/// Anything not ending in `.mmpackage` falls back to `mod.mmpackage`.
pub fn repack_file_name(output_name: Option<&str>) -> String {
    let suffix = format!(".{}", PACKAGE_EXTENSION);
    match output_name.map(str::trim) {
        Some(name) if name.len() > suffix.len() && name.ends_with(&suffix) => name.to_string(),
        Some(name) if !name.is_empty() => {
            tracing::warn!(
                "Output name '{}' does not end in {}, using {}",
                name,
                suffix,
                DEFAULT_PACKAGE_NAME
            );
            DEFAULT_PACKAGE_NAME.to_string()
        }
        _ => DEFAULT_PACKAGE_NAME.to_string(),
    }
}

/// Pack the regular files directly inside `folder` into `<output_dir>/<name>`
///
/// Subdirectories are skipped. Members are stored under their file names,
/// sorted, so the same folder always yields the same entry order.
pub fn repack_folder(folder: &Path, output_name: Option<&str>, output_dir: &Path) -> Result<PathBuf> {
    if !folder.is_dir() {
        return Err(Error::fs(
            folder,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut writer = PackageWriter::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let msg = e.to_string();
            let io = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, msg));
            Error::fs(folder, io)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        writer.add_file(entry.path(), &name)?;
    }

    let output = output_dir.join(repack_file_name(output_name));
    let count = writer.len();
    writer.write_to(&output)?;

    tracing::info!("Repacked {} files into {}", count, output.display());
    Ok(output)
}
