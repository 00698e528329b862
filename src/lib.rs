//! # docxpack
//!
//! Unpack DOCX files into a working directory and pack them back.
//!
//! A DOCX is treated as an opaque ZIP container: entries are extracted and
//! re-packed as-is, with no interpretation of the XML parts inside.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxpack::{DocxReader, DocxWriter, WriteOptions};
//!
//! // Extract tests/file.docx into tests/templates/
//! DocxReader::new("tests", "file.docx")?.extract()?;
//!
//! // Pack tests/templates/ back into tests/templates/report.docx
//! let options = WriteOptions::new().with_output_name("report");
//! DocxWriter::new("tests/templates", options)?.write()?;
//! # Ok::<(), docxpack::Error>(())
//! ```
//!
//! All validation happens when a reader or writer is constructed; `extract`
//! and `write` only fail on I/O.

pub mod config;
pub mod detect;
pub mod error;
pub mod operation;
pub mod reader;
pub mod validate;
pub mod writer;

// Re-exports
pub use config::Config;
pub use detect::{is_zip_file, validate_zip};
pub use error::{Error, Result};
pub use operation::{run_all, ArchiveOperation};
pub use reader::{DocxReader, EntryInfo, TEMPLATES_DIR};
pub use validate::WorkingDir;
pub use writer::{
    normalize_output_name, DocxWriter, WriteOptions, DEFAULT_OUTPUT_NAME, DOCX_EXTENSION,
};

use std::path::Path;

/// Extract `directory/archive_name` into `directory/templates`.
///
/// # Example
///
/// ```no_run
/// docxpack::unpack("tests", "file.docx")?;
/// # Ok::<(), docxpack::Error>(())
/// ```
pub fn unpack(directory: impl AsRef<Path>, archive_name: &str) -> Result<()> {
    DocxReader::new(directory, archive_name)?.extract()
}

/// Pack `source` into `source/default.docx`.
///
/// # Example
///
/// ```no_run
/// docxpack::pack("tests/templates")?;
/// # Ok::<(), docxpack::Error>(())
/// ```
pub fn pack(source: impl AsRef<Path>) -> Result<()> {
    DocxWriter::new(source, WriteOptions::default())?.write()
}

/// Pack `source` using the given options.
pub fn pack_with_options(source: impl AsRef<Path>, options: WriteOptions) -> Result<()> {
    DocxWriter::new(source, options)?.write()
}
