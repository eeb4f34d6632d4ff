//! CLI error types rendered with miette.
//!
//! Document errors carry the offending document as source code so the
//! report points at the element that failed.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::{Path, PathBuf};
use thiserror::Error;
use translator_xml::{TranslatorError, decode_document};
use translator_xml_toml::TranslatorConfigError;

/// Error when the translator.toml configuration file is not found.
#[derive(Debug, Diagnostic, Error)]
#[error("translator.toml configuration file not found: {}", .expected_path.display())]
#[diagnostic(
    code(translator_xml::config::not_found),
    help(
        "Create a translator.toml file with the following content:\n\n  \
          data_dir = \"data\"\n  \
          root_document = \"translator_en.xml\"\n\n\
         or pass the root document with --path"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when parsing the translator.toml configuration file.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse translator.toml configuration")]
#[diagnostic(code(translator_xml::config::parse_error))]
pub struct ConfigParseError {
    #[source_code]
    pub src: NamedSource<String>,

    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// Error when a translator document cannot be ingested.
#[derive(Debug, Diagnostic, Error)]
#[error("{message}")]
#[diagnostic(code(translator_xml::document::invalid))]
pub struct DocumentError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: SourceSpan,

    #[help]
    pub help: Option<String>,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] DocumentError),

    #[error("{0}")]
    #[diagnostic(code(translator_xml::config::invalid))]
    Config(TranslatorConfigError),

    #[error("{0}")]
    #[diagnostic(code(translator_xml::load))]
    Load(TranslatorError),
}

impl CliError {
    /// Builds a diagnostic for a configuration error raised for `path`.
    pub fn from_config(error: TranslatorConfigError, path: &Path) -> Self {
        match error {
            TranslatorConfigError::NotFound => ConfigNotFoundError {
                expected_path: path.to_path_buf(),
            }
            .into(),
            TranslatorConfigError::ParseError(parse_error) => {
                let content = fs_err::read_to_string(path).unwrap_or_default();
                ConfigParseError {
                    span: parse_error.span().map(SourceSpan::from),
                    help: parse_error.message().to_string(),
                    src: NamedSource::new(path.display().to_string(), content),
                }
                .into()
            },
            other => CliError::Config(other),
        }
    }

    /// Builds a diagnostic for a load error, pointing into the failing
    /// document when it can be read back. Positions are offsets into the
    /// decoded text, so the document is decoded the same way the loader did.
    pub fn from_translator(error: TranslatorError) -> Self {
        let (Some(document), Some(position)) = (error.document(), error.position()) else {
            return CliError::Load(error);
        };

        let Some(content) = fs_err::read(document)
            .ok()
            .and_then(|bytes| decode_document(document, &bytes).ok())
        else {
            return CliError::Load(error);
        };

        let offset = usize::try_from(position)
            .unwrap_or(usize::MAX)
            .min(content.len());

        DocumentError {
            message: error.to_string(),
            span: SourceSpan::from((offset, 0)),
            help: document_help(&error),
            src: NamedSource::new(document, content),
        }
        .into()
    }
}

fn document_help(error: &TranslatorError) -> Option<String> {
    match error {
        TranslatorError::MalformedEntry { .. } => Some(
            "A TEXT element needs both KEY and VALUE, or a FILE attribute linking another document"
                .to_string(),
        ),
        TranslatorError::MalformedSection { .. } => {
            Some("Give the SECTION element a NAME attribute".to_string())
        },
        TranslatorError::MarkupSyntax { source, .. } => Some(source.to_string()),
        TranslatorError::UnknownEncoding { .. }
        | TranslatorError::Undecodable { .. }
        | TranslatorError::LinkedFileMissing { .. }
        | TranslatorError::Io { .. } => None,
    }
}
