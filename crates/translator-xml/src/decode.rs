//! Character decoding of raw translator documents.
//!
//! A byte order mark wins over everything else. Without one, UTF-16 is
//! recognised from the byte pattern of a leading `<?`, and any other document
//! is decoded with the encoding named in its XML declaration, or UTF-8 when
//! it names none.

use crate::error::TranslatorError;
use encoding_rs::{Encoding, REPLACEMENT, UTF_8, UTF_16BE, UTF_16LE};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Decodes the bytes of `document` into text, without its byte order mark.
pub fn decode_document(document: &str, bytes: &[u8]) -> Result<String, TranslatorError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) => (encoding, &bytes[bom_length..]),
        None => (sniff_encoding(document, bytes)?, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| TranslatorError::Undecodable {
            document: document.to_string(),
            encoding: encoding.name(),
        })
}

fn sniff_encoding(document: &str, bytes: &[u8]) -> Result<&'static Encoding, TranslatorError> {
    match bytes {
        [b'<', 0, b'?', 0, ..] => return Ok(UTF_16LE),
        [0, b'<', 0, b'?', ..] => return Ok(UTF_16BE),
        _ => {},
    }

    let Some(label) = declared_encoding(bytes) else {
        return Ok(UTF_8);
    };

    // A declaration readable as ASCII means the bytes are not UTF-16, so a
    // UTF-16 label maps to its ASCII-compatible output encoding.
    match Encoding::for_label(label.as_bytes()) {
        Some(encoding) if encoding != REPLACEMENT => Ok(encoding.output_encoding()),
        _ => Err(TranslatorError::UnknownEncoding {
            document: document.to_string(),
            label,
        }),
    }
}

/// The `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(bytes);

    match reader.read_event() {
        Ok(Event::Decl(decl)) => decl
            .encoding()?
            .ok()
            .map(|label| String::from_utf8_lossy(&label).into_owned()),
        _ => None,
    }
}
