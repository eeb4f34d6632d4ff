//! The document parser: a state machine driven by [`TagEvent`]s.

use crate::collection::{Collection, ROOT_SECTION};
use crate::error::TranslatorError;
use crate::event::{TagEvent, TagStream};

/// Parses one document into a shared [`Collection`].
///
/// Sections are flat: closing any `SECTION` returns to the root section,
/// even when the markup nests sections. Linked files are only recorded,
/// never followed; see [`crate::loader::Loader`].
#[derive(Debug)]
pub struct DocumentParser<'c> {
    collection: &'c mut Collection,
    current_section: String,
    linked_files: Vec<String>,
}

impl<'c> DocumentParser<'c> {
    pub fn new(collection: &'c mut Collection) -> Self {
        Self {
            collection,
            current_section: ROOT_SECTION.to_string(),
            linked_files: Vec::new(),
        }
    }

    /// The section that the next entry would be recorded under.
    pub fn current_section(&self) -> &str {
        &self.current_section
    }

    /// Files referenced through `FILE` attributes, in order of appearance.
    pub fn linked_files(&self) -> &[String] {
        &self.linked_files
    }

    pub fn into_linked_files(self) -> Vec<String> {
        self.linked_files
    }

    /// Applies one event read from `document`.
    pub fn handle(&mut self, document: &str, event: TagEvent) {
        match event {
            TagEvent::SectionOpen { name } => {
                self.collection.append(document, &name, None);
                self.current_section = name;
            },
            TagEvent::SectionClose => {
                self.current_section = ROOT_SECTION.to_string();
            },
            TagEvent::TextEntry(text) => {
                self.collection
                    .append(document, &self.current_section, Some(text));
            },
            TagEvent::TextLink { file } => {
                self.linked_files.push(file);
            },
        }
    }

    /// Consumes `stream` up to its end or its first error.
    ///
    /// Entries recorded before an error stay in the collection.
    pub fn parse(&mut self, stream: TagStream<'_>) -> Result<(), TranslatorError> {
        let document = stream.document().to_string();

        for event in stream {
            self.handle(&document, event?);
        }

        Ok(())
    }

    /// Parses `content`, attributing its entries to `document`.
    pub fn parse_str(&mut self, document: &str, content: &str) -> Result<(), TranslatorError> {
        tracing::debug!("Parsing translator document: {}", document);
        self.parse(TagStream::new(document, content))
    }
}
