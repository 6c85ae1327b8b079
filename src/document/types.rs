//! Document types.

use serde::Serialize;

/// A document read from storage and encoded for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedDocument {
    /// Name shown to the signer.
    pub name: String,
    /// Lowercase file extension without the dot.
    pub file_extension: String,
    /// Size of the raw document.
    pub size_bytes: u64,
    /// Standard base64 with padding.
    #[serde(skip)]
    pub base64: String,
}

/// Document formats with a recognizable file signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    /// Legacy Word (OLE compound file).
    Doc,
    /// Office Open XML (zip container).
    Docx,
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP_MAGIC: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

impl DocumentKind {
    /// Kinds without a signature check (e.g. txt) return `None`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" => Some(DocumentKind::Doc),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn matches_content(&self, bytes: &[u8]) -> bool {
        let magic = match self {
            DocumentKind::Pdf => PDF_MAGIC,
            DocumentKind::Doc => OLE_MAGIC,
            DocumentKind::Docx => ZIP_MAGIC,
        };
        bytes.starts_with(magic)
    }
}
