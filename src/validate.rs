//! Directory precondition shared by the reader and writer.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// A directory that was confirmed to exist when this value was built.
///
/// Both [`DocxReader`](crate::DocxReader) and [`DocxWriter`](crate::DocxWriter)
/// construct one of these before any of their own checks run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDir {
    path: PathBuf,
}

impl WorkingDir {
    /// Validate that `path` refers to an existing directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(Error::DirectoryNotFound(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The validated directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a name relative to this directory.
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }
}

impl AsRef<Path> for WorkingDir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_directory() {
        let dir = TempDir::new().unwrap();
        let working = WorkingDir::new(dir.path()).unwrap();
        assert_eq!(working.path(), dir.path());
        assert_eq!(working.join("a.docx"), dir.path().join("a.docx"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("test_dir").join("@$");
        let err = WorkingDir::new(&missing).unwrap_err();
        assert!(matches!(err, Error::DirectoryNotFound(p) if p == missing));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.docx");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            WorkingDir::new(&file),
            Err(Error::DirectoryNotFound(_))
        ));
    }
}
