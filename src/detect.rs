//! ZIP container detection for DOCX files.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}

/// Verify that the file at `path` has a readable ZIP central directory.
///
/// Returns the number of entries on success, or a human-readable reason
/// the archive was rejected. The magic bytes alone are not enough: a
/// truncated file still starts with `PK\x03\x04` but has no end record.
///
/// # Example
///
/// ```no_run
/// use docxpack::detect::validate_zip;
///
/// match validate_zip("document.docx") {
///     Ok(count) => println!("{} entries", count),
///     Err(reason) => eprintln!("not a zip: {}", reason),
/// }
/// ```
pub fn validate_zip(path: impl AsRef<Path>) -> std::result::Result<usize, String> {
    let file = File::open(path.as_ref()).map_err(|e| e.to_string())?;
    validate_zip_reader(BufReader::new(file))
}

/// Verify a ZIP central directory from any seekable reader.
pub fn validate_zip_reader<R: Read + Seek>(reader: R) -> std::result::Result<usize, String> {
    zip::ZipArchive::new(reader)
        .map(|archive| archive.len())
        .map_err(|e| e.to_string())
}
