//! Document file acceptance
//!
//! Only Word `.docx` files are forwarded to the checking API. The check here
//! is the same one the browser picker performs: the reported MIME type must be
//! the OOXML word-processing type. The archive signature check catches files
//! that were merely renamed.

use crate::services::messages::{Locale, Message};
use std::path::Path;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const OCTET_STREAM: &str = "application/octet-stream";

/// ZIP local file header
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Unsupported file type '{content_type}' for '{name}'")]
    UnsupportedType { name: String, content_type: String },

    #[error("File '{0}' is empty")]
    Empty(String),

    #[error("File '{0}' is not a valid .docx archive")]
    NotAnArchive(String),

    #[error("Failed to read '{0}': {1}")]
    Read(String, #[source] std::io::Error),
}

impl FileError {
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            FileError::Read(name, e) => format!("{}: {}", name, e),
            _ => Message::InvalidFileType.text(locale),
        }
    }
}

/// A file selected for checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    /// Read a file from disk, deriving its content type from the extension
    pub fn from_path(path: &Path) -> Result<Self, FileError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| FileError::Read(name.clone(), e))?;

        Ok(Self {
            content_type: content_type_for(&name).to_string(),
            name,
            bytes,
        })
    }

    /// Build from a browser upload. An empty content type falls back to the extension.
    pub fn from_upload(
        name: impl Into<String>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        let name = name.into();
        let content_type = match content_type.map(str::trim) {
            Some(ct) if !ct.is_empty() => ct.to_string(),
            _ => content_type_for(&name).to_string(),
        };
        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// Accept only non-empty `.docx` archives
    pub fn validate(&self) -> Result<(), FileError> {
        if self.content_type != DOCX_MIME {
            return Err(FileError::UnsupportedType {
                name: self.name.clone(),
                content_type: self.content_type.clone(),
            });
        }
        if self.bytes.is_empty() {
            return Err(FileError::Empty(self.name.clone()));
        }
        if !self.bytes.starts_with(ZIP_SIGNATURE) {
            return Err(FileError::NotAnArchive(self.name.clone()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size for display, e.g. `12.34 KB`
    pub fn size_kb(&self) -> String {
        format_kb(self.bytes.len())
    }
}

pub fn format_kb(bytes: usize) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

fn content_type_for(name: &str) -> &'static str {
    let is_docx = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
    if is_docx {
        DOCX_MIME
    } else {
        OCTET_STREAM
    }
}
