//! Unpacking a DOCX archive into the `templates` subdirectory.

use crate::detect::validate_zip;
use crate::error::{Error, Result};
use crate::operation::ArchiveOperation;
use crate::validate::WorkingDir;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Name of the directory entries are extracted into, under the working directory.
pub const TEMPLATES_DIR: &str = "templates";

/// Summary of one entry stored in an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    /// Internal path of the entry (e.g., "word/document.xml")
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Compressed size in bytes
    pub compressed_size: u64,
    /// Whether the entry is a directory record
    pub is_dir: bool,
}

/// Reader for a DOCX archive located in a working directory.
///
/// Construction validates everything up front: the directory must exist,
/// the archive must be a regular file inside it, and the file must have a
/// readable ZIP central directory.
///
/// # Example
///
/// ```no_run
/// use docxpack::DocxReader;
///
/// let reader = DocxReader::new("tests", "file.docx")?;
/// reader.extract()?;
/// # Ok::<(), docxpack::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocxReader {
    dir: WorkingDir,
    name: String,
}

impl DocxReader {
    /// Validate `directory/archive_name` and build a reader for it.
    pub fn new(directory: impl AsRef<Path>, archive_name: impl Into<String>) -> Result<Self> {
        let dir = WorkingDir::new(directory)?;
        let name = archive_name.into();
        let archive_path = dir.join(&name);

        if !archive_path.is_file() {
            return Err(Error::ArchivePathInvalid(archive_path));
        }

        match validate_zip(&archive_path) {
            Ok(count) => debug!("{} holds {} entries", archive_path.display(), count),
            Err(reason) => {
                return Err(Error::ArchiveCorrupted {
                    path: archive_path,
                    reason,
                })
            }
        }

        Ok(Self { dir, name })
    }

    /// Full path of the archive being read.
    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Directory the archive is extracted into.
    pub fn target_dir(&self) -> PathBuf {
        self.dir.join(TEMPLATES_DIR)
    }

    /// Extract every entry into the `templates` subdirectory.
    ///
    /// The subdirectory is created if missing. Existing files with the same
    /// relative path are overwritten.
    pub fn extract(&self) -> Result<()> {
        let target = self.target_dir();
        match fs::create_dir(&target) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }

        let archive_path = self.archive_path();
        info!(
            "Extracting {} into {}",
            archive_path.display(),
            target.display()
        );

        let file = File::open(&archive_path)?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let relative = match clean_entry_path(entry.name()) {
                Some(path) => path,
                None => {
                    warn!("Skipping entry with empty path: {:?}", entry.name());
                    continue;
                }
            };
            let out_path = target.join(&relative);

            if entry.is_dir() {
                fs::create_dir_all(&out_path)?;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out_file = File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
            debug!("Extracted {}", relative.display());
        }

        Ok(())
    }

    /// List the entries stored in the archive without extracting them.
    pub fn entries(&self) -> Result<Vec<EntryInfo>> {
        let file = File::open(self.archive_path())?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            entries.push(EntryInfo {
                name: entry.name().to_string(),
                size: entry.size(),
                compressed_size: entry.compressed_size(),
                is_dir: entry.is_dir(),
            });
        }
        Ok(entries)
    }
}

/// Map an entry name to a path that stays inside the extraction directory.
///
/// Root, drive, `.` and `..` components are dropped, so `/word/document.xml`
/// becomes `word/document.xml` and `../up.xml` becomes `up.xml`. Returns
/// `None` when nothing is left.
fn clean_entry_path(name: &str) -> Option<PathBuf> {
    let mut path = PathBuf::new();
    for (i, part) in name.split(['/', '\\']).enumerate() {
        let is_drive = i == 0 && part.len() == 2 && part.ends_with(':');
        if part.is_empty() || part == "." || part == ".." || is_drive {
            continue;
        }
        path.push(part);
    }
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

impl ArchiveOperation for DocxReader {
    fn run(&self) -> Result<()> {
        self.extract()
    }

    fn describe(&self) -> String {
        format!(
            "extract {} -> {}",
            self.archive_path().display(),
            self.target_dir().display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_docx(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_creates_templates() {
        let dir = TempDir::new().unwrap();
        write_docx(
            &dir.path().join("file.docx"),
            &[
                ("[Content_Types].xml", "<Types/>"),
                ("word/document.xml", "<w:document/>"),
            ],
        );

        let reader = DocxReader::new(dir.path(), "file.docx").unwrap();
        reader.extract().unwrap();

        let templates = dir.path().join(TEMPLATES_DIR);
        assert!(templates.is_dir());
        assert_eq!(
            fs::read(templates.join("word/document.xml")).unwrap(),
            b"<w:document/>"
        );
    }

    #[test]
    fn test_clean_entry_path() {
        assert_eq!(
            clean_entry_path("word/document.xml"),
            Some(PathBuf::from("word").join("document.xml"))
        );
        assert_eq!(
            clean_entry_path("/word/document.xml"),
            Some(PathBuf::from("word").join("document.xml"))
        );
        assert_eq!(clean_entry_path("../up.xml"), Some(PathBuf::from("up.xml")));
        assert_eq!(
            clean_entry_path("a/./b/../c.xml"),
            Some(PathBuf::from("a").join("b").join("c.xml"))
        );
        assert_eq!(
            clean_entry_path("C:\\word\\styles.xml"),
            Some(PathBuf::from("word").join("styles.xml"))
        );
        assert_eq!(clean_entry_path("word/"), Some(PathBuf::from("word")));
        assert_eq!(clean_entry_path("../"), None);
    }

    #[test]
    fn test_extract_cleans_absolute_and_parent_names() {
        let dir = TempDir::new().unwrap();
        write_docx(
            &dir.path().join("file.docx"),
            &[("/word/document.xml", "<w:document/>"), ("../up.xml", "<up/>")],
        );

        DocxReader::new(dir.path(), "file.docx")
            .unwrap()
            .extract()
            .unwrap();

        let templates = dir.path().join(TEMPLATES_DIR);
        assert_eq!(
            fs::read_to_string(templates.join("word").join("document.xml")).unwrap(),
            "<w:document/>"
        );
        assert_eq!(fs::read_to_string(templates.join("up.xml")).unwrap(), "<up/>");
        assert!(!dir.path().join("up.xml").exists());
    }

    #[test]
    fn test_missing_archive() {
        let dir = TempDir::new().unwrap();
        let err = DocxReader::new(dir.path(), "document.docx").unwrap_err();
        assert!(matches!(err, Error::ArchivePathInvalid(_)));
    }

    #[test]
    fn test_directory_named_like_archive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("folder.docx")).unwrap();
        let err = DocxReader::new(dir.path(), "folder.docx").unwrap_err();
        assert!(matches!(err, Error::ArchivePathInvalid(_)));
    }

    #[test]
    fn test_corrupted_archive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("document.docx"), b"plain text, not a zip").unwrap();
        let err = DocxReader::new(dir.path(), "document.docx").unwrap_err();
        assert!(matches!(err, Error::ArchiveCorrupted { .. }));
    }

    #[test]
    fn test_missing_directory_checked_first() {
        let dir = TempDir::new().unwrap();
        let err = DocxReader::new(dir.path().join("nope"), "file.docx").unwrap_err();
        assert!(matches!(err, Error::DirectoryNotFound(_)));
    }

    #[test]
    fn test_entries() {
        let dir = TempDir::new().unwrap();
        write_docx(
            &dir.path().join("file.docx"),
            &[("word/document.xml", "<w:document/>")],
        );

        let reader = DocxReader::new(dir.path(), "file.docx").unwrap();
        let entries = reader.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "word/document.xml");
        assert_eq!(entries[0].size, 13);
        assert!(!entries[0].is_dir);
    }
}
