use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslatorError {
    /// A `TEXT` element carries only one half of a `KEY`/`VALUE` pair.
    #[error("TEXT element in '{document}' at byte {position} has {present} but no {missing}")]
    MalformedEntry {
        document: String,
        position: u64,
        present: &'static str,
        missing: &'static str,
    },

    /// A `SECTION` element has no `NAME` attribute.
    #[error("SECTION element in '{document}' at byte {position} has no NAME")]
    MalformedSection { document: String, position: u64 },

    /// The markup itself is not well-formed.
    #[error("Markup error in '{document}' at byte {position}: {source}")]
    MarkupSyntax {
        document: String,
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The XML declaration names an encoding that is not known.
    #[error("Unknown encoding '{label}' declared in '{document}'")]
    UnknownEncoding { document: String, label: String },

    /// The document bytes are not valid in the detected encoding.
    #[error("'{document}' is not valid {encoding}")]
    Undecodable {
        document: String,
        encoding: &'static str,
    },

    #[error("Linked file does not exist: {}", .path.display())]
    LinkedFileMissing { path: PathBuf },

    #[error("IO error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranslatorError {
    /// The document the error was raised for, if it is tied to one.
    pub fn document(&self) -> Option<&str> {
        match self {
            TranslatorError::MalformedEntry { document, .. }
            | TranslatorError::MalformedSection { document, .. }
            | TranslatorError::MarkupSyntax { document, .. }
            | TranslatorError::UnknownEncoding { document, .. }
            | TranslatorError::Undecodable { document, .. } => Some(document),
            TranslatorError::LinkedFileMissing { .. } | TranslatorError::Io { .. } => None,
        }
    }

    /// Byte offset into the document where the error was detected.
    pub fn position(&self) -> Option<u64> {
        match self {
            TranslatorError::MalformedEntry { position, .. }
            | TranslatorError::MalformedSection { position, .. }
            | TranslatorError::MarkupSyntax { position, .. } => Some(*position),
            TranslatorError::UnknownEncoding { .. }
            | TranslatorError::Undecodable { .. }
            | TranslatorError::LinkedFileMissing { .. }
            | TranslatorError::Io { .. } => None,
        }
    }
}
