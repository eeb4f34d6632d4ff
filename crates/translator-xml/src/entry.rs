//! This module provides the translation entry record.

use bon::Builder;
use getset::Getters;

/// One translation record read from a `TEXT` element.
///
/// Entries are never mutated once built. A collection shares the same
/// entry between its section bucket and its key index.
#[derive(Builder, Clone, Debug, Default, Eq, Getters, Hash, PartialEq)]
#[getset(get = "pub")]
pub struct Entry {
    #[builder(into, default)]
    key: String,
    #[builder(into, default)]
    value: String,
    /// Name of the enclosing section, or the root sentinel.
    #[builder(into, default)]
    section: String,
    /// Identity of the document that defined the entry.
    #[builder(into, default)]
    source_file: String,
}

impl Entry {
    /// Returns a copy of this entry carrying `value`, keeping its key,
    /// section and source file.
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }
}
