//! Default template location.

use crate::error::{Error, Result};
use crate::reader::{DocxReader, TEMPLATES_DIR};
use crate::writer::DEFAULT_OUTPUT_NAME;
use std::path::{Path, PathBuf};

/// Explicit configuration passed to callers that need a default template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the template DOCX opened when no archive is named
    pub template_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_path: Path::new(TEMPLATES_DIR).join(DEFAULT_OUTPUT_NAME),
        }
    }
}

impl Config {
    /// Create the default configuration (`templates/default.docx`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the template path.
    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    /// Open a reader for the configured template.
    ///
    /// The template's parent directory is used as the working directory,
    /// so extraction lands next to the template file.
    pub fn template_reader(&self) -> Result<DocxReader> {
        let name = self
            .template_path
            .file_name()
            .ok_or_else(|| Error::ArchivePathInvalid(self.template_path.clone()))?
            .to_string_lossy()
            .into_owned();
        let dir = match self.template_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        DocxReader::new(dir, name)
    }
}
