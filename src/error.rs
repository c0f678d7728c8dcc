use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("You must provide 4 files (got {0}).")]
    InvalidInputCount(usize),

    #[error("You must select exactly one each of: .pak, .sig, .ucas, .utoc (case-insensitive). Missing: {}",
            .0.iter().map(|e| format!(".{}", e)).collect::<Vec<_>>().join(", "))]
    MissingRequiredExtension(Vec<String>),

    #[error("No mod folder selected.\n\n\
             Hint: pass --dest <DIR> or remember one with:\n\
                mmpack config set-mod-folder <DIR>")]
    NoDestinationFolder,

    #[error("No metadata.json found in {}", .0.display())]
    MetadataNotFound(PathBuf),

    #[error("Could not open archive {}: {source}", .path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Unknown platform code '{0}' (expected Windows, WinGDK or EGS)")]
    InvalidPlatform(String),

    #[error("{0}")]
    Other(String),
}

/// Closed set of failure categories reported at the operation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInputCount,
    MissingRequiredExtension,
    NoDestinationFolder,
    MetadataNotFound,
    ArchiveOpenFailure,
    FilesystemFailure,
    InvalidData,
    InvalidArgument,
}

impl Error {
    /// Wrap an IO error with the path it happened on
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInputCount(_) => ErrorKind::InvalidInputCount,
            Error::MissingRequiredExtension(_) => ErrorKind::MissingRequiredExtension,
            Error::NoDestinationFolder => ErrorKind::NoDestinationFolder,
            Error::MetadataNotFound(_) => ErrorKind::MetadataNotFound,
            Error::Filesystem { .. } | Error::Io(_) | Error::Zip(zip::result::ZipError::Io(_)) => {
                ErrorKind::FilesystemFailure
            }
            Error::ArchiveOpen { .. } | Error::Zip(_) => ErrorKind::ArchiveOpenFailure,
            Error::Json(_) => ErrorKind::InvalidData,
            Error::InvalidPlatform(_) | Error::Other(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Result record handed across the operation boundary.
///
/// Serializes as `{"success": true, ...data}` or
/// `{"success": false, "kind": "...", "error": "..."}`. `T` must serialize
/// as a map since its fields are flattened into the record.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Success {
        success: bool,
        #[serde(flatten)]
        data: T,
    },
    Failure {
        success: bool,
        kind: ErrorKind,
        error: String,
    },
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Outcome::Success {
            success: true,
            data,
        }
    }

    pub fn failure(kind: ErrorKind, error: impl Into<String>) -> Self {
        Outcome::Failure {
            success: false,
            kind,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Outcome::success(data),
            Err(e) => Outcome::failure(e.kind(), e.to_string()),
        }
    }
}
