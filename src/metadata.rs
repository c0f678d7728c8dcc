//! The `metadata.json` record stored inside a package
//!
//! # Examples
//!
//! ```no_run
//! use mmpack::{inject_metadata, view_metadata, PackageMetadata};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = Path::new("mod.mmpackage");
//! let metadata = PackageMetadata {
//!     name: "Fancy Hat".to_string(),
//!     author: "someone".to_string(),
//!     ..Default::default()
//! };
//!
//! inject_metadata(package, &metadata)?;
//! let stored = view_metadata(package)?;
//! assert_eq!(stored.unwrap()["name"], "Fancy Hat");
//! # Ok(())
//! # }
//! ```

use crate::archive::Package;
use crate::naming::PACKAGE_EXTENSION;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Entry name of the metadata record
pub const METADATA_ENTRY: &str = "metadata.json";

/// Display information for a package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl PackageMetadata {
    /// Overwrite the fields that are given, trimming surrounding whitespace
    pub fn apply(&mut self, update: &MetadataUpdate) {
        let fields = [
            (&mut self.name, &update.name),
            (&mut self.author, &update.author),
            (&mut self.description, &update.description),
            (&mut self.category, &update.category),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                *field = value.trim().to_string();
            }
        }
    }
}

/// Partial set of fields for [`edit_metadata`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataUpdate {
    pub name: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl MetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.author.is_none()
            && self.description.is_none()
            && self.category.is_none()
    }
}

/// Store `metadata` as the package's `metadata.json`, replacing any previous record
pub fn inject_metadata<T: Serialize + ?Sized>(package_path: &Path, metadata: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    Package::open(package_path)?.replace_entry(METADATA_ENTRY, json.as_bytes())?;
    tracing::info!("Injected {} into {}", METADATA_ENTRY, package_path.display());
    Ok(())
}

/// Inject the same record into every package, stopping at the first failure
///
/// Packages processed before the failing one keep their new record.
pub fn batch_inject_metadata<T, P>(package_paths: &[P], metadata: &T) -> Result<usize>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    for path in package_paths {
        inject_metadata(path.as_ref(), metadata)?;
    }
    Ok(package_paths.len())
}

/// Parsed `metadata.json`, or `None` when the package has none
pub fn view_metadata(package_path: &Path) -> Result<Option<serde_json::Value>> {
    let mut package = Package::open(package_path)?;
    match package.read_entry(METADATA_ENTRY)? {
        Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
        None => Ok(None),
    }
}

/// Apply `update` on top of the stored record (or an empty one) and store the result
pub fn edit_metadata(package_path: &Path, update: &MetadataUpdate) -> Result<PackageMetadata> {
    let mut metadata = match view_metadata(package_path)? {
        Some(value) => serde_json::from_value(value)?,
        None => PackageMetadata::default(),
    };
    metadata.apply(update);
    inject_metadata(package_path, &metadata)?;
    Ok(metadata)
}

/// Copy the raw `metadata.json` to `<export_dir>/<package>_metadata.json`
pub fn export_metadata(package_path: &Path, export_dir: &Path) -> Result<PathBuf> {
    let mut package = Package::open(package_path)?;
    let data = package
        .read_entry(METADATA_ENTRY)?
        .ok_or_else(|| Error::MetadataNotFound(package_path.to_path_buf()))?;

    let output = export_dir.join(export_file_name(package_path));
    fs::write(&output, data).map_err(|e| Error::fs(&output, e))?;

    tracing::info!("Exported metadata to {}", output.display());
    Ok(output)
}

fn export_file_name(package_path: &Path) -> String {
    let file_name = package_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{}", PACKAGE_EXTENSION);
    let stem = file_name.strip_suffix(&suffix).unwrap_or(&file_name);
    format!("{}_metadata.json", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_trims_given_fields() {
        let mut metadata = PackageMetadata {
            name: "Old".to_string(),
            author: "me".to_string(),
            ..Default::default()
        };
        metadata.apply(&MetadataUpdate {
            name: Some("  New Name ".to_string()),
            category: Some("Skins".to_string()),
            ..Default::default()
        });

        assert_eq!(metadata.name, "New Name");
        assert_eq!(metadata.author, "me");
        assert_eq!(metadata.category, "Skins");
        assert_eq!(metadata.description, "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let metadata: PackageMetadata = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert_eq!(metadata.name, "X");
        assert!(metadata.author.is_empty());
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(Path::new("/mods/Fancy Hat.mmpackage")),
            "Fancy Hat_metadata.json"
        );
        assert_eq!(
            export_file_name(Path::new("/mods/odd.zip")),
            "odd.zip_metadata.json"
        );
    }
}
