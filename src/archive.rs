//! Zip container access for `.mmpackage` files
//!
//! Packages are small (four payload files and an optional metadata entry),
//! so every writer assembles the whole container in memory and touches the
//! target path exactly once. A failure before that write leaves any existing
//! file untouched.

use crate::{Error, Result};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// A package opened for reading
pub struct Package {
    path: PathBuf,
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl Package {
    /// Open an existing package, reading it fully into memory
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::fs(path, e))?;
        let archive = ZipArchive::new(Cursor::new(bytes)).map_err(|source| Error::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Entry names in container order
    pub fn entries(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.archive.file_names().any(|n| n == name)
    }

    /// Raw bytes of an entry, `None` if absent
    pub fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        if !self.contains(name) {
            return Ok(None);
        }

        let mut file = self.archive.by_name(name)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    /// Rewrite the package in place with `name` set to `data`
    ///
    /// Any existing entry with that name is dropped, every other entry is
    /// copied through unchanged and the new entry is appended last.
    pub fn replace_entry(mut self, name: &str, data: &[u8]) -> Result<()> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for i in 0..self.archive.len() {
            let file = self.archive.by_index_raw(i)?;
            if file.name() == name {
                tracing::debug!("Dropping existing entry {}", name);
                continue;
            }
            writer.raw_copy_file(file)?;
        }

        writer.start_file(name, file_options())?;
        writer.write_all(data)?;

        let bytes = writer.finish()?.into_inner();
        write_file(&self.path, &bytes)?;
        tracing::debug!("Rewrote {} ({} bytes)", self.path.display(), bytes.len());
        Ok(())
    }

    /// Extract every entry below `out_dir`, overwriting existing files
    pub fn extract_all(mut self, out_dir: &Path) -> Result<()> {
        fs::create_dir_all(out_dir).map_err(|e| Error::fs(out_dir, e))?;
        self.archive.extract(out_dir).map_err(|e| match e {
            ZipError::Io(io) => Error::fs(out_dir, io),
            other => other.into(),
        })?;
        Ok(())
    }
}

/// Builder for a brand new package
pub struct PackageWriter {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    count: usize,
}

impl PackageWriter {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            count: 0,
        }
    }

    /// Add the contents of a file on disk under `member_name`
    pub fn add_file(&mut self, source: &Path, member_name: &str) -> Result<()> {
        let data = fs::read(source).map_err(|e| Error::fs(source, e))?;
        self.add_bytes(member_name, &data)
    }

    pub fn add_bytes(&mut self, member_name: &str, data: &[u8]) -> Result<()> {
        tracing::debug!("Adding {} ({} bytes)", member_name, data.len());
        self.writer.start_file(member_name, file_options())?;
        self.writer.write_all(data)?;
        self.count += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Finish the container and write it to `output`
    pub fn write_to(self, output: &Path) -> Result<()> {
        let bytes = self.writer.finish()?.into_inner();
        write_file(output, &bytes)?;
        tracing::debug!("Wrote {} ({} bytes)", output.display(), bytes.len());
        Ok(())
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn file_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| Error::fs(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_package(dir: &Path) -> PathBuf {
        let path = dir.join("sample.mmpackage");
        let mut writer = PackageWriter::new();
        writer.add_bytes("a.pak", b"pak data").unwrap();
        writer.add_bytes("a.sig", b"sig data").unwrap();
        assert_eq!(writer.len(), 2);
        writer.write_to(&path).unwrap();
        path
    }

    #[test]
    fn test_write_and_read_entries() {
        let temp = TempDir::new().unwrap();
        let path = sample_package(temp.path());

        let mut package = Package::open(&path).unwrap();
        assert_eq!(package.entries(), vec!["a.pak", "a.sig"]);
        assert_eq!(package.read_entry("a.sig").unwrap().unwrap(), b"sig data");
        assert!(package.read_entry("missing").unwrap().is_none());
    }

    #[test]
    fn test_replace_entry_keeps_others() {
        let temp = TempDir::new().unwrap();
        let path = sample_package(temp.path());

        Package::open(&path).unwrap().replace_entry("a.pak", b"new").unwrap();

        let mut package = Package::open(&path).unwrap();
        assert_eq!(package.entries(), vec!["a.sig", "a.pak"]);
        assert_eq!(package.read_entry("a.pak").unwrap().unwrap(), b"new");
        assert_eq!(package.read_entry("a.sig").unwrap().unwrap(), b"sig data");
    }

    #[test]
    fn test_open_rejects_non_zip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bogus.mmpackage");
        fs::write(&path, b"definitely not a zip").unwrap();

        let err = Package::open(&path).err().unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::ArchiveOpenFailure);
    }

    #[test]
    fn test_open_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = Package::open(&temp.path().join("nope.mmpackage")).err().unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::FilesystemFailure);
    }

    #[test]
    fn test_extract_reports_blocked_directory_as_filesystem_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested.mmpackage");
        let mut writer = PackageWriter::new();
        writer.add_bytes("sub/a.pak", b"pak data").unwrap();
        writer.write_to(&path).unwrap();

        let out_dir = temp.path().join("out");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("sub"), b"in the way").unwrap();

        let err = Package::open(&path).unwrap().extract_all(&out_dir).err().unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::FilesystemFailure);
        assert!(err.to_string().contains(&out_dir.display().to_string()));
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("missing-dir").join("out.mmpackage");

        let mut writer = PackageWriter::new();
        writer.add_bytes("a.pak", b"x").unwrap();
        assert!(writer.write_to(&output).is_err());
        assert!(!output.exists());
    }
}
