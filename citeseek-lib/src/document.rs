//! Source documents
//!
//! A [`Document`] is the unit of ingestion: the full extracted text of one
//! source file plus a title derived from its filename. Text extraction from
//! richer formats (PDF etc.) happens outside this crate; here the source is
//! read as plain UTF-8 text.

use std::path::Path;

use crate::{Error, Result};

/// A source document, immutable once ingested.
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifier, defaults to the source path (or the title when built in memory)
    pub id: String,
    /// Title derived from the source filename, extension stripped
    pub title: String,
    /// Full extracted text
    pub raw_text: String,
}

impl Document {
    /// Build a document from already-extracted text.
    #[must_use]
    pub fn new(title: impl Into<String>, raw_text: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: title.clone(),
            title,
            raw_text: raw_text.into(),
        }
    }

    /// Read a document from a plain-text file.
    ///
    /// The title is the filename stem. Returns [`Error::NotFound`] if the
    /// path does not exist and [`Error::Input`] if it cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }

        let raw_text = std::fs::read_to_string(path).map_err(|source| Error::Input {
            path: path.display().to_string(),
            source,
        })?;

        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(path = %path.display(), chars = raw_text.len(), "read document");

        Ok(Self {
            id: path.display().to_string(),
            title,
            raw_text,
        })
    }
}
