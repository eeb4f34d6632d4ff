//! This module provides the collection that accumulates entries across one
//! ingestion run.

use crate::entry::Entry;
use crate::event::TextEntry;
use indexmap::IndexMap;
use std::sync::Arc;

/// Section name used for entries that are not inside any `SECTION`.
pub const ROOT_SECTION: &str = "ROOT";

/// Entries indexed by key, in insertion order.
pub type EntryMap = IndexMap<String, Arc<Entry>>;

/// Entries indexed by section name, each bucket in document order.
pub type SectionMap = IndexMap<String, Vec<Arc<Entry>>>;

/// The aggregate store of one ingestion run.
///
/// Keys are expected to be unique. When they are not, the first entry
/// appended for a key is the one indexed by [`Collection::entries`]; later
/// entries with the same key are still kept in their section bucket but
/// never replace the indexed one.
#[derive(Clone, Debug)]
pub struct Collection {
    sections: SectionMap,
    entries: EntryMap,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    pub fn new() -> Self {
        let mut sections = SectionMap::new();
        sections.insert(ROOT_SECTION.to_string(), Vec::new());

        Self {
            sections,
            entries: EntryMap::new(),
        }
    }

    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    pub fn entries(&self) -> &EntryMap {
        &self.entries
    }

    /// Returns the entries of a section in document order.
    pub fn section(&self, name: &str) -> Option<&[Arc<Entry>]> {
        self.sections.get(name).map(Vec::as_slice)
    }

    /// Returns the entry indexed for `key`.
    pub fn get(&self, key: &str) -> Option<&Arc<Entry>> {
        self.entries.get(key)
    }

    /// Number of indexed keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers `section` and, when `text` is given, records a new entry
    /// defined in `file`.
    ///
    /// A section is registered even when no entry follows, so empty sections
    /// still show up in [`Collection::sections`].
    pub fn append(&mut self, file: &str, section: &str, text: Option<TextEntry>) {
        if !self.sections.contains_key(section) {
            self.sections.insert(section.to_string(), Vec::new());
        }

        let Some(TextEntry { key, value }) = text else {
            return;
        };

        let entry = Arc::new(
            Entry::builder()
                .key(key.as_str())
                .value(value)
                .section(section)
                .source_file(file)
                .build(),
        );

        if let Some(bucket) = self.sections.get_mut(section) {
            bucket.push(Arc::clone(&entry));
        }

        self.entries.entry(key).or_insert(entry);
    }

    /// Merges `other` into this collection.
    ///
    /// Only keys indexed in both collections survive. Entries whose key is
    /// not indexed in `other` are dropped from the key index and from their
    /// section bucket; keys only known to `other` are not introduced. Every
    /// surviving entry takes the value `other` indexes for its key while
    /// keeping its own section and source file. Sections stay registered
    /// even when they end up empty.
    pub fn merge(&mut self, other: &Collection) {
        self.entries.retain(|key, _| other.entries.contains_key(key));

        for bucket in self.sections.values_mut() {
            bucket.retain(|entry| other.entries.contains_key(entry.key()));

            for entry in bucket.iter_mut() {
                let Some(theirs) = other.entries.get(entry.key()) else {
                    continue;
                };

                let replaced = Arc::new(entry.with_value(theirs.value().as_str()));

                if let Some(indexed) = self.entries.get_mut(entry.key())
                    && Arc::ptr_eq(indexed, entry)
                {
                    *indexed = Arc::clone(&replaced);
                }

                *entry = replaced;
            }
        }
    }

    /// Groups entries by sheet, the file name of their source document.
    ///
    /// Within a sheet the first entry seen for a key wins.
    pub fn group_by_sheets(entries: &EntryMap) -> IndexMap<String, EntryMap> {
        group_by(entries, |entry| sheet_name(entry.source_file()).to_string())
    }

    /// Groups entries by the section they were defined in.
    ///
    /// Within a section the first entry seen for a key wins.
    pub fn group_by_sections(entries: &EntryMap) -> IndexMap<String, EntryMap> {
        group_by(entries, |entry| entry.section().clone())
    }
}

/// Returns the last path component of `source_file`.
///
/// Both `/` and `\` separate components, so sheets named by Windows paths
/// group the same way on every platform. A path ending in a separator has an
/// empty sheet name.
pub fn sheet_name(source_file: &str) -> &str {
    source_file
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
}

fn group_by(
    entries: &EntryMap,
    group_of: impl Fn(&Entry) -> String,
) -> IndexMap<String, EntryMap> {
    let mut groups: IndexMap<String, EntryMap> = IndexMap::new();

    for (key, entry) in entries {
        groups
            .entry(group_of(entry))
            .or_default()
            .entry(key.clone())
            .or_insert_with(|| Arc::clone(entry));
    }

    groups
}
