//! Build a `.mmpackage` from the four payload files of a mod
//!
//! # Examples
//!
//! ```no_run
//! use mmpack::{build_package, InputFile, NamingPolicy, PlatformCode};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = ["pak", "sig", "ucas", "utoc"]
//!     .map(|ext| InputFile::from_path(format!("Hat_pakchunk5-Windows.{}", ext)))
//!     .into_iter()
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let policy = NamingPolicy::new(PlatformCode::Egs).with_chunk(7);
//! let output = build_package(&inputs, &policy, Some(Path::new("mods")))?;
//! println!("Wrote {}", output.display());
//! # Ok(())
//! # }
//! ```

use crate::archive::PackageWriter;
use crate::naming::{file_extension, missing_extensions, REQUIRED_EXTENSIONS};
use crate::{Error, NamingPolicy, Result};
use std::path::{Path, PathBuf};

/// One payload file handed to the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Original file name, extension included
    pub name: String,
    /// Where the bytes are read from
    pub source_path: PathBuf,
}

impl InputFile {
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
        }
    }

    /// Use the final path component as the file name
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let source_path = path.into();
        let name = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::Other(format!(
                    "Could not determine file name of {}",
                    source_path.display()
                ))
            })?
            .to_string();

        Ok(Self { name, source_path })
    }
}

/// Check that exactly four inputs cover every required extension
pub fn validate_inputs(inputs: &[InputFile]) -> Result<()> {
    if inputs.len() != REQUIRED_EXTENSIONS.len() {
        return Err(Error::InvalidInputCount(inputs.len()));
    }

    let extensions: Vec<String> = inputs.iter().map(|f| file_extension(&f.name)).collect();
    let missing = missing_extensions(&extensions);
    if !missing.is_empty() {
        return Err(Error::MissingRequiredExtension(missing));
    }

    Ok(())
}

/// Build a package from `inputs` into `destination`, returning the written path
///
/// Each input is stored under the name produced by
/// [`NamingPolicy::member_name`]; the package itself is named by
/// [`NamingPolicy::output_file_name`]. The file only appears once the whole
/// container has been assembled.
pub fn build_package(
    inputs: &[InputFile],
    policy: &NamingPolicy,
    destination: Option<&Path>,
) -> Result<PathBuf> {
    validate_inputs(inputs)?;
    let destination = destination.ok_or(Error::NoDestinationFolder)?;

    let mut writer = PackageWriter::new();
    for input in inputs {
        let member = policy.member_name(&input.name);
        tracing::debug!("{} -> {}", input.name, member);
        writer.add_file(&input.source_path, &member)?;
    }

    let output = destination.join(policy.output_file_name());
    writer.write_to(&output)?;

    tracing::info!("Built {} with {} members", output.display(), inputs.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Package;
    use crate::{ErrorKind, PlatformCode};
    use std::fs;
    use tempfile::TempDir;

    fn payloads(dir: &Path, base: &str, exts: &[&str]) -> Vec<InputFile> {
        exts.iter()
            .map(|ext| {
                let path = dir.join(format!("{}.{}", base, ext));
                fs::write(&path, format!("{} payload", ext)).unwrap();
                InputFile::from_path(path).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_build_renames_members() {
        let temp = TempDir::new().unwrap();
        let inputs = payloads(temp.path(), "Hat_pakchunk5-Windows", &["pak", "SIG", "ucas", "utoc"]);
        let policy = NamingPolicy::new(PlatformCode::Egs).with_chunk(7);

        let output = build_package(&inputs, &policy, Some(temp.path())).unwrap();
        assert_eq!(output, temp.path().join("mod_7.mmpackage"));

        let mut entries = Package::open(&output).unwrap().entries();
        entries.sort();
        assert_eq!(
            entries,
            vec![
                "Hat_pakchunk7-EGS.pak",
                "Hat_pakchunk7-EGS.sig",
                "Hat_pakchunk7-EGS.ucas",
                "Hat_pakchunk7-EGS.utoc",
            ]
        );
    }

    #[test]
    fn test_wrong_count() {
        let temp = TempDir::new().unwrap();
        let inputs = payloads(temp.path(), "Hat", &["pak", "sig", "ucas"]);
        let err = build_package(&inputs, &NamingPolicy::default(), Some(temp.path())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInputCount);
    }

    #[test]
    fn test_duplicate_extension_reports_missing() {
        let temp = TempDir::new().unwrap();
        let mut inputs = payloads(temp.path(), "Hat", &["pak", "sig", "ucas"]);
        inputs.extend(payloads(temp.path(), "Other", &["pak"]));

        match validate_inputs(&inputs) {
            Err(Error::MissingRequiredExtension(missing)) => assert_eq!(missing, vec!["utoc"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_no_destination() {
        let temp = TempDir::new().unwrap();
        let inputs = payloads(temp.path(), "Hat", &["pak", "sig", "ucas", "utoc"]);
        let err = build_package(&inputs, &NamingPolicy::default(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoDestinationFolder);
    }

    #[test]
    fn test_missing_source_leaves_no_package() {
        let temp = TempDir::new().unwrap();
        let mut inputs = payloads(temp.path(), "Hat", &["pak", "sig", "ucas"]);
        inputs.push(InputFile::new("Hat.utoc", temp.path().join("gone.utoc")));

        let err = build_package(&inputs, &NamingPolicy::default(), Some(temp.path())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FilesystemFailure);
        assert!(!temp.path().join("mod.mmpackage").exists());
    }
}
