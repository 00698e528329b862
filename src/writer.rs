//! Packing a working directory back into a DOCX archive.

use crate::error::{Error, Result};
use crate::operation::ArchiveOperation;
use crate::validate::WorkingDir;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Extension appended to output names that do not mention `docx`.
pub const DOCX_EXTENSION: &str = ".docx";

/// Output name used when none is configured.
pub const DEFAULT_OUTPUT_NAME: &str = "default.docx";

/// Append [`DOCX_EXTENSION`] unless `name` already contains `docx`.
///
/// This is a substring test, not a suffix test: `mydocxfile` and
/// `archive.docx.bak` are returned unchanged.
///
/// ```
/// use docxpack::normalize_output_name;
///
/// assert_eq!(normalize_output_name("report"), "report.docx");
/// assert_eq!(normalize_output_name("report.docx"), "report.docx");
/// assert_eq!(normalize_output_name("archive.docx.bak"), "archive.docx.bak");
/// ```
pub fn normalize_output_name(name: &str) -> String {
    if name.contains("docx") {
        name.to_string()
    } else {
        format!("{}{}", name, DOCX_EXTENSION)
    }
}

/// Options for building a [`DocxWriter`].
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// File name of the archive to create
    pub output_name: String,

    /// Directory to save the archive in (default: the source directory)
    pub save_dir: Option<PathBuf>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            save_dir: None,
        }
    }
}

impl WriteOptions {
    /// Create default write options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output file name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Set an alternate directory to save the archive in.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(dir.into());
        self
    }
}

/// Writer that packs every file under a source directory into a DOCX.
///
/// # Example
///
/// ```no_run
/// use docxpack::{DocxWriter, WriteOptions};
///
/// let options = WriteOptions::new().with_output_name("report");
/// DocxWriter::new("tests/templates", options)?.write()?;
/// # Ok::<(), docxpack::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocxWriter {
    source: WorkingDir,
    output_name: String,
    save_dir: Option<PathBuf>,
}

impl DocxWriter {
    /// Validate the source directory and optional save directory.
    pub fn new(source: impl AsRef<Path>, options: WriteOptions) -> Result<Self> {
        let source = WorkingDir::new(source)?;

        // An empty save directory means "not set".
        let save_dir = options.save_dir.filter(|dir| !dir.as_os_str().is_empty());
        if let Some(ref dir) = save_dir {
            if !dir.is_dir() {
                return Err(Error::DirectoryNotFound(dir.clone()));
            }
        }

        Ok(Self {
            source,
            output_name: options.output_name,
            save_dir,
        })
    }

    /// Source directory being packed.
    pub fn source_dir(&self) -> &Path {
        self.source.path()
    }

    /// Path the next call to [`write`](Self::write) will create.
    pub fn destination(&self) -> PathBuf {
        let name = normalize_output_name(&self.output_name);
        match self.save_dir {
            Some(ref dir) if dir.is_dir() => dir.join(name),
            _ => self.source.join(name),
        }
    }

    /// Create the archive, overwriting any existing file at the destination.
    ///
    /// Entries are DEFLATE-compressed and named by their path relative to
    /// the source directory. A failure part-way through can leave a
    /// truncated archive behind.
    pub fn write(&self) -> Result<()> {
        let destination = self.destination();
        info!(
            "Packing {} into {}",
            self.source.path().display(),
            destination.display()
        );

        let file = File::create(&destination)?;
        // Resolved after creation so the destination can be recognised in the walk.
        let skip = fs::canonicalize(&destination)?;
        let root = fs::canonicalize(self.source.path())?;

        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut count = 0usize;
        // Symlinked directories are not descended into; symlinked files are
        // read through their target.
        for entry in WalkDir::new(&root).follow_links(false) {
            let entry = entry?;
            let is_file = if entry.path_is_symlink() {
                fs::metadata(entry.path())?.is_file()
            } else {
                entry.file_type().is_file()
            };
            if !is_file {
                continue;
            }
            if entry.path() == skip {
                warn!(
                    "Skipping {}: it is the archive being written",
                    entry.path().display()
                );
                continue;
            }

            let name = entry_name(&root, entry.path())?;
            zip.start_file(name.as_str(), options)?;
            let mut source = File::open(entry.path())?;
            io::copy(&mut source, &mut zip)?;
            debug!("Added {}", name);
            count += 1;
        }

        zip.finish()?;
        info!("Wrote {} entries to {}", count, destination.display());
        Ok(())
    }
}

impl ArchiveOperation for DocxWriter {
    fn run(&self) -> Result<()> {
        self.write()
    }

    fn describe(&self) -> String {
        format!(
            "pack {} -> {}",
            self.source.path().display(),
            self.destination().display()
        )
    }
}

/// Archive entry name for `path`, relative to `root` and `/`-separated.
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidInput, e)))?;
    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str().to_str().ok_or_else(|| {
                Error::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("file name is not valid UTF-8: {}", path.display()),
                ))
            })
        })
        .collect::<Result<Vec<&str>>>()?;
    Ok(parts.join("/"))
}
