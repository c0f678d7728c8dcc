//! mmpack - build, inspect and edit `.mmpackage` mod archives
//!
//! A `.mmpackage` is a zip container holding the four payload files of a
//! mod (`.pak`, `.sig`, `.ucas`, `.utoc`) and optionally a `metadata.json`
//! record describing it. This crate provides:
//!
//! - Package building with chunk/platform renaming of the payload files
//! - Metadata injection (single and batch), editing, viewing and export
//! - Structure validation, unpacking and repacking of folders
//!
//! # Examples
//!
//! ```no_run
//! use mmpack::{build_package, validate_package, InputFile, NamingPolicy, PlatformCode};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![
//!     InputFile::from_path("Hat_pakchunk5-Windows.pak")?,
//!     InputFile::from_path("Hat_pakchunk5-Windows.sig")?,
//!     InputFile::from_path("Hat_pakchunk5-Windows.ucas")?,
//!     InputFile::from_path("Hat_pakchunk5-Windows.utoc")?,
//! ];
//!
//! let policy = NamingPolicy::new(PlatformCode::Egs);
//! let package = build_package(&inputs, &policy, Some(Path::new("mods")))?;
//!
//! let report = validate_package(&package)?;
//! assert!(report.valid);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`naming`] - Member and package naming policy
//! - [`builder`] - Build packages from payload files
//! - [`metadata`] - The `metadata.json` record
//! - [`inspect`] - Validate, unpack and repack
//! - [`archive`] - Zip container access
//! - [`platform`] - Platform codes
//! - [`config`] - Tool and host settings
//! - [`error`] - Error types and the operation outcome record

pub mod archive;
pub mod builder;
pub mod config;
pub mod error;
pub mod inspect;
pub mod metadata;
pub mod naming;
pub mod platform;

pub use builder::{build_package, validate_inputs, InputFile};
pub use config::{HostSettings, Settings};
pub use error::{Error, ErrorKind, Outcome, Result};
pub use inspect::{repack_folder, unpack_package, validate_package, ValidationReport};
pub use metadata::{
    batch_inject_metadata, edit_metadata, export_metadata, inject_metadata, view_metadata,
    MetadataUpdate, PackageMetadata, METADATA_ENTRY,
};
pub use naming::{NamingPolicy, PACKAGE_EXTENSION, REQUIRED_EXTENSIONS};
pub use platform::PlatformCode;
