//! Ingestion of a root document and the files it links to.

use crate::collection::Collection;
use crate::decode::decode_document;
use crate::error::TranslatorError;
use crate::parser::DocumentParser;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where documents are looked up and read from.
pub trait DocumentSource {
    fn exists(&self, path: &Path) -> bool;

    /// Returns the raw bytes of the document; decoding is left to the loader.
    fn read(&self, path: &Path) -> Result<Vec<u8>, TranslatorError>;
}

/// Reads documents from the filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, TranslatorError> {
        fs_err::read(path).map_err(|source| TranslatorError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Serves documents held in memory, keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.documents.insert(path.into(), content.into());
    }
}

impl DocumentSource for MemorySource {
    fn exists(&self, path: &Path) -> bool {
        self.documents.contains_key(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, TranslatorError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| TranslatorError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "document not found"),
            })
    }
}

/// What relative `FILE` references are resolved against.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkBase {
    /// The directory of the root document.
    #[default]
    DocumentDir,
    /// The process working directory.
    WorkingDir,
}

/// What happens when a linked document exists but fails to parse.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkedErrorPolicy {
    /// Report the document as skipped and continue with the next link.
    #[default]
    Skip,
    /// Abort the whole load.
    Fail,
}

#[derive(Builder, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadOptions {
    #[builder(default)]
    pub link_base: LinkBase,
    #[builder(default)]
    pub linked_errors: LinkedErrorPolicy,
}

/// A linked document that was not ingested.
#[derive(Debug)]
pub struct SkippedLink {
    /// The resolved path of the linked document.
    pub path: PathBuf,
    pub error: TranslatorError,
}

/// Outcome of [`Loader::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Documents parsed to completion, root document first.
    pub parsed: Vec<PathBuf>,
    pub skipped: Vec<SkippedLink>,
}

impl LoadReport {
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Drives ingestion of a root document and its linked files.
///
/// Links are followed exactly one level deep: `FILE` references found in a
/// linked document are ignored.
#[derive(Clone, Debug, Default)]
pub struct Loader<S = FsSource> {
    source: S,
    options: LoadOptions,
}

impl Loader<FsSource> {
    pub fn new(options: LoadOptions) -> Self {
        Self::with_source(FsSource, options)
    }
}

impl<S: DocumentSource> Loader<S> {
    pub fn with_source(source: S, options: LoadOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Loads `root` and every file it links to into `collection`.
    ///
    /// A failure of the root document is returned as is. Missing linked
    /// files are always skipped; linked files that fail to parse are skipped
    /// or abort the load according to [`LoadOptions::linked_errors`].
    pub fn load(
        &self,
        root: impl AsRef<Path>,
        collection: &mut Collection,
    ) -> Result<LoadReport, TranslatorError> {
        let root = root.as_ref();
        let mut report = LoadReport::default();

        let links = self.parse_document(root, collection)?;
        report.parsed.push(root.to_path_buf());

        for link in links {
            let path = self.resolve_link(root, &link);

            if !self.source.exists(&path) {
                tracing::warn!("Linked file does not exist: {}", path.display());
                report.skipped.push(SkippedLink {
                    error: TranslatorError::LinkedFileMissing { path: path.clone() },
                    path,
                });
                continue;
            }

            tracing::info!("Processing linked file: {}", path.display());

            // Links found in a linked document are not followed.
            match self.parse_document(&path, collection) {
                Ok(_) => report.parsed.push(path),
                Err(error) if self.options.linked_errors == LinkedErrorPolicy::Skip => {
                    tracing::warn!("Skipping linked file {}: {}", path.display(), error);
                    report.skipped.push(SkippedLink { path, error });
                },
                Err(error) => return Err(error),
            }
        }

        Ok(report)
    }

    /// Parses a single document with a fresh parser and returns its links.
    fn parse_document(
        &self,
        path: &Path,
        collection: &mut Collection,
    ) -> Result<Vec<String>, TranslatorError> {
        let bytes = self.source.read(path)?;
        let document = path.display().to_string();
        let content = decode_document(&document, &bytes)?;

        let mut parser = DocumentParser::new(collection);
        parser.parse_str(&document, &content)?;

        Ok(parser.into_linked_files())
    }

    /// Resolves a `FILE` reference found in `root`.
    ///
    /// Relative references may separate components with `/` or `\` on every
    /// platform.
    pub fn resolve_link(&self, root: &Path, link: &str) -> PathBuf {
        if Path::new(link).is_absolute() {
            return PathBuf::from(link);
        }

        let link: PathBuf = link
            .split(['/', '\\'])
            .filter(|component| !component.is_empty())
            .collect();

        match self.options.link_base {
            LinkBase::DocumentDir => root
                .parent()
                .map(|dir| dir.join(&link))
                .unwrap_or(link),
            LinkBase::WorkingDir => link,
        }
    }
}

/// Loads `root` from the filesystem with default options.
pub fn load(
    root: impl AsRef<Path>,
    collection: &mut Collection,
) -> Result<LoadReport, TranslatorError> {
    Loader::new(LoadOptions::default()).load(root, collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ROOT: &str = r#"<TRANSLATOR>
    <SECTION NAME="UI">
        <TEXT KEY="OK_BUTTON" VALUE="OK"/>
    </SECTION>
    <TEXT FILE="strings2.xml"/>
</TRANSLATOR>"#;

    const STRINGS2: &str = r#"<TRANSLATOR>
    <SECTION NAME="DIALOG">
        <TEXT KEY="CANCEL_BUTTON" VALUE="Cancel"/>
    </SECTION>
</TRANSLATOR>"#;

    fn loader(source: MemorySource) -> Loader<MemorySource> {
        Loader::with_source(source, LoadOptions::default())
    }

    #[test]
    fn test_load_root_and_linked_file() {
        let source = MemorySource::new()
            .with_document("data/translator_en.xml", ROOT)
            .with_document("data/strings2.xml", STRINGS2);

        let mut collection = Collection::new();
        let report = loader(source)
            .load("data/translator_en.xml", &mut collection)
            .unwrap();

        assert_eq!(
            report.parsed,
            vec![
                PathBuf::from("data/translator_en.xml"),
                PathBuf::from("data/strings2.xml")
            ]
        );
        assert!(!report.has_skipped());

        let cancel = collection.get("CANCEL_BUTTON").unwrap();
        assert_eq!(cancel.section(), "DIALOG");
        assert_eq!(cancel.source_file(), "data/strings2.xml");

        let names: Vec<&String> = collection.sections().keys().collect();
        assert_eq!(names, vec!["ROOT", "UI", "DIALOG"]);
    }

    #[test]
    fn test_missing_link_is_skipped() {
        let source = MemorySource::new().with_document("data/translator_en.xml", ROOT);

        let mut collection = Collection::new();
        let report = loader(source)
            .load("data/translator_en.xml", &mut collection)
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, PathBuf::from("data/strings2.xml"));
        assert!(matches!(
            report.skipped[0].error,
            TranslatorError::LinkedFileMissing { .. }
        ));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_links_are_followed_one_level_only() {
        let source = MemorySource::new()
            .with_document("root.xml", r#"<T><TEXT FILE="first.xml"/></T>"#)
            .with_document(
                "first.xml",
                r#"<T><TEXT KEY="FIRST" VALUE="1"/><TEXT FILE="second.xml"/></T>"#,
            )
            .with_document("second.xml", r#"<T><TEXT KEY="SECOND" VALUE="2"/></T>"#);

        let mut collection = Collection::new();
        let report = loader(source).load("root.xml", &mut collection).unwrap();

        assert!(collection.get("FIRST").is_some());
        assert!(collection.get("SECOND").is_none());
        assert_eq!(report.parsed.len(), 2);
    }

    #[test]
    fn test_backslash_link_is_followed() {
        let source = MemorySource::new()
            .with_document("data/root.xml", r#"<T><TEXT FILE="sub\s.xml"/></T>"#)
            .with_document("data/sub/s.xml", r#"<T><TEXT KEY="K" VALUE="V"/></T>"#);

        let mut collection = Collection::new();
        let report = loader(source)
            .load("data/root.xml", &mut collection)
            .unwrap();

        assert!(!report.has_skipped());
        assert!(collection.get("K").is_some());
    }

    #[test]
    fn test_documents_are_decoded_before_parsing() {
        let source = MemorySource::new().with_document(
            "root.xml",
            &b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><T><TEXT KEY=\"CAFE\" VALUE=\"caf\xE9\"/></T>"[..],
        );

        let mut collection = Collection::new();
        loader(source).load("root.xml", &mut collection).unwrap();

        assert_eq!(collection.get("CAFE").unwrap().value(), "café");
    }

    #[test]
    fn test_undecodable_root_aborts() {
        let source = MemorySource::new()
            .with_document("root.xml", &b"<T><TEXT KEY=\"K\" VALUE=\"\xFF\"/></T>"[..]);

        let mut collection = Collection::new();
        let result = loader(source).load("root.xml", &mut collection);

        assert!(matches!(result, Err(TranslatorError::Undecodable { .. })));
    }

    #[test]
    fn test_root_failure_aborts() {
        let source = MemorySource::new().with_document("root.xml", "<T><TEXT KEY=\"K\"/></T>");

        let mut collection = Collection::new();
        let result = loader(source).load("root.xml", &mut collection);

        assert!(matches!(result, Err(TranslatorError::MalformedEntry { .. })));
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let mut collection = Collection::new();
        let result = loader(MemorySource::new()).load("root.xml", &mut collection);

        assert!(matches!(result, Err(TranslatorError::Io { .. })));
    }

    #[rstest]
    #[case(LinkedErrorPolicy::Skip, true)]
    #[case(LinkedErrorPolicy::Fail, false)]
    fn test_linked_failure_policy(#[case] policy: LinkedErrorPolicy, #[case] completes: bool) {
        let source = MemorySource::new()
            .with_document(
                "root.xml",
                r#"<T><TEXT FILE="broken.xml"/><TEXT FILE="good.xml"/></T>"#,
            )
            .with_document("broken.xml", "<T><SECTION NAME=\"X\"></T>")
            .with_document("good.xml", r#"<T><TEXT KEY="GOOD" VALUE="yes"/></T>"#);

        let options = LoadOptions::builder().linked_errors(policy).build();
        let mut collection = Collection::new();
        let result = Loader::with_source(source, options).load("root.xml", &mut collection);

        assert_eq!(result.is_ok(), completes);
        if let Ok(report) = result {
            assert_eq!(report.skipped.len(), 1);
            assert!(matches!(
                report.skipped[0].error,
                TranslatorError::MarkupSyntax { .. }
            ));
            assert!(collection.get("GOOD").is_some());
        }
    }

    #[rstest]
    #[case(LinkBase::DocumentDir, "data/root.xml", "strings2.xml", "data/strings2.xml")]
    #[case(LinkBase::DocumentDir, "root.xml", "strings2.xml", "strings2.xml")]
    #[case(LinkBase::DocumentDir, "data/root.xml", "sub/s.xml", "data/sub/s.xml")]
    #[case(LinkBase::DocumentDir, "data/root.xml", "sub\\s.xml", "data/sub/s.xml")]
    #[case(LinkBase::WorkingDir, "data/root.xml", "strings2.xml", "strings2.xml")]
    #[case(LinkBase::WorkingDir, "data/root.xml", "sub\\s.xml", "sub/s.xml")]
    fn test_resolve_link(
        #[case] link_base: LinkBase,
        #[case] root: &str,
        #[case] link: &str,
        #[case] expected: &str,
    ) {
        let options = LoadOptions::builder().link_base(link_base).build();
        let loader = Loader::with_source(MemorySource::new(), options);

        assert_eq!(
            loader.resolve_link(Path::new(root), link),
            PathBuf::from(expected)
        );
    }

    #[test]
    fn test_resolve_absolute_link() {
        let loader = loader(MemorySource::new());
        let absolute = std::env::temp_dir().join("strings2.xml");

        assert_eq!(
            loader.resolve_link(Path::new("data/root.xml"), &absolute.to_string_lossy()),
            absolute
        );
    }
}
