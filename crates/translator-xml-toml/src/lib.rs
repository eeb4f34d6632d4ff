#![doc = include_str!("../README.md")]

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use translator_xml::{LinkBase, LinkedErrorPolicy, LoadOptions};

/// File name looked up by [`TranslatorConfig::from_dir`].
pub const CONFIG_FILE_NAME: &str = "translator.toml";

/// Root document used when `root_document` is not set.
pub const DEFAULT_ROOT_DOCUMENT: &str = "translator_en.xml";

#[derive(Debug, Error)]
pub enum TranslatorConfigError {
    /// Configuration file not found.
    #[error("translator.toml configuration file not found")]
    NotFound,
    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] io::Error),
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The configuration for `translator-xml`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TranslatorConfig {
    /// Directory holding the translator documents, relative to the
    /// configuration file.
    pub data_dir: PathBuf,
    /// The root document, relative to `data_dir`.
    #[serde(default = "default_root_document")]
    pub root_document: PathBuf,
    /// What relative `FILE` links are resolved against.
    ///
    /// ```toml
    /// link_base = "working-dir"
    /// ```
    #[serde(default)]
    pub link_base: LinkBase,
    /// What happens to linked documents that fail to parse.
    ///
    /// ```toml
    /// linked_errors = "fail"
    /// ```
    #[serde(default)]
    pub linked_errors: LinkedErrorPolicy,
}

fn default_root_document() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT_DOCUMENT)
}

impl TranslatorConfig {
    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TranslatorConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TranslatorConfigError::NotFound);
        }

        let content = fs_err::read_to_string(path)?;

        let config: TranslatorConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// Reads `translator.toml` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self, TranslatorConfigError> {
        Self::read_from_path(dir.join(CONFIG_FILE_NAME))
    }

    /// Returns the data directory resolved against `base_dir`.
    pub fn data_dir_from_base(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.data_dir)
    }

    /// Returns the root document resolved against `base_dir`.
    pub fn root_document_from_base(&self, base_dir: &Path) -> PathBuf {
        self.data_dir_from_base(base_dir).join(&self.root_document)
    }

    /// Validates that the data directory exists.
    pub fn validate_data_dir(&self, base_dir: &Path) -> Result<(), TranslatorConfigError> {
        let data_path = self.data_dir_from_base(base_dir);

        if !data_path.exists() {
            return Err(TranslatorConfigError::ReadError(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Data directory '{}' does not exist", data_path.display()),
            )));
        }

        if !data_path.is_dir() {
            return Err(TranslatorConfigError::ReadError(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Data path '{}' is not a directory", data_path.display()),
            )));
        }

        Ok(())
    }

    /// Returns the loader options described by this configuration.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::builder()
            .link_base(self.link_base)
            .linked_errors(self.linked_errors)
            .build()
    }
}
