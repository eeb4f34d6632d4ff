//! Pull-based tag events over a translator document.
//!
//! [`TagStream`] reads markup with `quick-xml` and resolves every `SECTION`
//! and `TEXT` element into a [`TagEvent`] once, so the document parser never
//! has to probe attribute maps itself.

use crate::error::TranslatorError;
use quick_xml::Reader;
use quick_xml::errors::IllFormedError;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;

pub const SECTION_TAG: &[u8] = b"SECTION";
pub const TEXT_TAG: &[u8] = b"TEXT";

const NAME_ATTR: &[u8] = b"NAME";
const KEY_ATTR: &[u8] = b"KEY";
const VALUE_ATTR: &[u8] = b"VALUE";
const FILE_ATTR: &[u8] = b"FILE";

/// The `KEY`/`VALUE` pair of a `TEXT` element.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TextEntry {
    pub key: String,
    pub value: String,
}

impl TextEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A tag of interest in a translator document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagEvent {
    /// `<SECTION NAME="...">`
    SectionOpen { name: String },
    /// `</SECTION>`
    SectionClose,
    /// `<TEXT KEY="..." VALUE="...">`
    TextEntry(TextEntry),
    /// `<TEXT FILE="...">`
    TextLink { file: String },
}

/// Iterator of [`TagEvent`]s read from one document.
///
/// Empty elements are reported as an open immediately followed by a close.
/// `TEXT` elements carrying neither `KEY`, `VALUE` nor `FILE`, closing `TEXT`
/// tags and every other tag produce no event. The stream ends after the first
/// error.
pub struct TagStream<'a> {
    reader: Reader<&'a [u8]>,
    document: String,
    open: Vec<String>,
    finished: bool,
}

impl<'a> TagStream<'a> {
    /// Creates a stream over `content`, identified by `document`.
    pub fn new(document: impl Into<String>, content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        reader.config_mut().expand_empty_elements = true;

        Self {
            reader,
            document: document.into(),
            open: Vec::new(),
            finished: false,
        }
    }

    /// Identity of the document being streamed.
    pub fn document(&self) -> &str {
        &self.document
    }

    fn resolve(
        &self,
        start: &BytesStart<'_>,
        position: u64,
    ) -> Result<Option<TagEvent>, TranslatorError> {
        match start.name().as_ref() {
            SECTION_TAG => {
                let name = self.attribute(start, NAME_ATTR, position)?.ok_or_else(|| {
                    TranslatorError::MalformedSection {
                        document: self.document.clone(),
                        position,
                    }
                })?;
                Ok(Some(TagEvent::SectionOpen { name }))
            },
            TEXT_TAG => {
                let key = self.attribute(start, KEY_ATTR, position)?;
                let value = self.attribute(start, VALUE_ATTR, position)?;
                let file = self.attribute(start, FILE_ATTR, position)?;

                match (key, value, file) {
                    (Some(key), Some(value), _) => {
                        Ok(Some(TagEvent::TextEntry(TextEntry { key, value })))
                    },
                    (Some(_), None, _) => Err(self.malformed_entry(position, "KEY", "VALUE")),
                    (None, _, Some(file)) => Ok(Some(TagEvent::TextLink { file })),
                    (None, Some(_), None) => Err(self.malformed_entry(position, "VALUE", "KEY")),
                    (None, None, None) => Ok(None),
                }
            },
            _ => Ok(None),
        }
    }

    fn attribute(
        &self,
        start: &BytesStart<'_>,
        name: &[u8],
        position: u64,
    ) -> Result<Option<String>, TranslatorError> {
        let attribute = start
            .try_get_attribute(name)
            .map_err(|source| self.syntax_error(position, source.into()))?;

        let Some(attribute) = attribute else {
            return Ok(None);
        };

        let raw = std::str::from_utf8(&attribute.value)
            .map_err(|source| self.syntax_error(position, quick_xml::encoding::EncodingError::from(source).into()))?;

        unescape(&normalize_whitespace(raw))
            .map(|value| Some(value.into_owned()))
            .map_err(|source| self.syntax_error(position, source.into()))
    }

    fn malformed_entry(
        &self,
        position: u64,
        present: &'static str,
        missing: &'static str,
    ) -> TranslatorError {
        TranslatorError::MalformedEntry {
            document: self.document.clone(),
            position,
            present,
            missing,
        }
    }

    fn syntax_error(&self, position: u64, source: quick_xml::Error) -> TranslatorError {
        TranslatorError::MarkupSyntax {
            document: self.document.clone(),
            position,
            source,
        }
    }

    fn fail(&mut self, error: TranslatorError) -> Option<Result<TagEvent, TranslatorError>> {
        self.finished = true;
        Some(Err(error))
    }
}

/// Replaces literal tabs and line breaks in a raw attribute value with spaces.
///
/// A `\r\n` pair counts as a single break. Character references such as
/// `&#10;` are untouched since they are expanded afterwards.
fn normalize_whitespace(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(raw);
    }

    Cow::Owned(raw.replace("\r\n", " ").replace(['\t', '\n', '\r'], " "))
}

impl Iterator for TagStream<'_> {
    type Item = Result<TagEvent, TranslatorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let position = self.reader.buffer_position();

            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(source) => {
                    let position = self.reader.error_position();
                    let error = self.syntax_error(position, source);
                    return self.fail(error);
                },
            };

            match event {
                Event::Start(start) => {
                    self.open
                        .push(String::from_utf8_lossy(start.name().as_ref()).into_owned());

                    match self.resolve(&start, position) {
                        Ok(Some(tag)) => return Some(Ok(tag)),
                        Ok(None) => {},
                        Err(error) => return self.fail(error),
                    }
                },
                Event::End(end) => {
                    self.open.pop();

                    if end.name().as_ref() == SECTION_TAG {
                        return Some(Ok(TagEvent::SectionClose));
                    }
                },
                Event::Eof => {
                    self.finished = true;

                    let unclosed = self.open.pop()?;
                    let error = self.syntax_error(
                        position,
                        quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(unclosed)),
                    );
                    return Some(Err(error));
                },
                _ => {},
            }
        }
    }
}
