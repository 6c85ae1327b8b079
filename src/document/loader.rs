//! Reads a document from local storage and encodes it for transport.

use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::schema::DocumentConfig;
use crate::document::types::{DocumentKind, EncodedDocument};
use crate::error::{SigningError, SigningResult};

/// Loads and checks documents against the configured acceptance rules.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    config: DocumentConfig,
}

impl DocumentLoader {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    /// Load `path` and base64-encode it.
    ///
    /// `name` overrides the document name shown to the signer; the file name
    /// of `path` is used otherwise.
    pub fn load(&self, path: &Path, name: Option<&str>) -> SigningResult<EncodedDocument> {
        let metadata = fs::metadata(path).map_err(|e| read_error(path, e))?;
        if !metadata.is_file() {
            return Err(SigningError::DocumentRead {
                path: path.to_path_buf(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        let size_bytes = metadata.len();
        if size_bytes == 0 {
            return Err(SigningError::Validation(format!(
                "document {} is empty",
                path.display()
            )));
        }
        if size_bytes > self.config.max_size_bytes {
            return Err(SigningError::Validation(format!(
                "document {} is {} bytes, limit is {}",
                path.display(),
                size_bytes,
                self.config.max_size_bytes
            )));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !self
            .config
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
        {
            return Err(SigningError::Validation(format!(
                "document extension '{}' is not accepted (allowed: {})",
                extension,
                self.config.allowed_extensions.join(", ")
            )));
        }

        let bytes = fs::read(path).map_err(|e| read_error(path, e))?;

        if self.config.verify_content {
            if let Some(kind) = DocumentKind::from_extension(&extension) {
                if !kind.matches_content(&bytes) {
                    return Err(SigningError::Validation(format!(
                        "document {} does not look like a .{} file",
                        path.display(),
                        extension
                    )));
                }
            }
        }

        let name = match name {
            Some(n) if !n.trim().is_empty() => n.to_string(),
            _ => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document")
                .to_string(),
        };

        tracing::info!(
            path = %path.display(),
            size_bytes,
            extension = %extension,
            "Document loaded"
        );

        Ok(EncodedDocument {
            name,
            file_extension: extension,
            size_bytes,
            base64: STANDARD.encode(&bytes),
        })
    }
}

fn read_error(path: &Path, e: std::io::Error) -> SigningError {
    if e.kind() == ErrorKind::NotFound {
        SigningError::DocumentNotFound {
            path: path.to_path_buf(),
        }
    } else {
        SigningError::DocumentRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
