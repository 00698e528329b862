//! Error types for the docxpack library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docxpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while unpacking or packing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The working directory or save directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The named archive is not a file under the working directory.
    #[error("Archive not found: {}", .0.display())]
    ArchivePathInvalid(PathBuf),

    /// The file exists but is not a readable ZIP archive.
    #[error("Archive is corrupted: {}: {reason}", .path.display())]
    ArchiveCorrupted { path: PathBuf, reason: String },

    /// I/O error during extraction or packing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::Io(io::Error::new(io::ErrorKind::InvalidData, other)),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}
