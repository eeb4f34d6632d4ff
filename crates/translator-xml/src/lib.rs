#![doc = include_str!("../README.md")]

pub mod collection;
pub mod decode;
pub mod entry;
pub mod error;
pub mod event;
pub mod loader;
pub mod parser;

pub use collection::{Collection, EntryMap, ROOT_SECTION, SectionMap, sheet_name};
pub use decode::decode_document;
pub use entry::Entry;
pub use error::TranslatorError;
pub use event::{TagEvent, TagStream, TextEntry};
pub use loader::{
    DocumentSource, FsSource, LinkBase, LinkedErrorPolicy, LoadOptions, LoadReport, Loader,
    MemorySource, SkippedLink, load,
};
pub use parser::DocumentParser;
