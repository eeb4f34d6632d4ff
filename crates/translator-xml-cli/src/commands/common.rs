use crate::error::CliError;
use crate::utils::ui;
use clap::Args;
use std::path::{Path, PathBuf};
use translator_xml::{Collection, LoadOptions, LoadReport, Loader};
use translator_xml_toml::{CONFIG_FILE_NAME, TranslatorConfig};

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Root translator document (takes precedence over the configuration).
    #[arg(short, long)]
    pub path: Option<PathBuf>,
    /// Path to translator.toml (defaults to ./translator.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// A collection loaded from one root document.
#[derive(Debug)]
pub struct LoadedSet {
    pub root: PathBuf,
    pub collection: Collection,
    pub report: LoadReport,
}

impl InputArgs {
    /// Resolves the root document and the loader options.
    ///
    /// With `--path`, the configuration is only read when `--config` is
    /// given explicitly. Without it, the root document comes from the
    /// configuration, resolved against the configuration file's directory.
    pub fn resolve(&self) -> Result<(PathBuf, LoadOptions), CliError> {
        if let Some(path) = &self.path {
            let options = match &self.config {
                Some(config_path) => read_config(config_path)?.load_options(),
                None => LoadOptions::default(),
            };
            return Ok((path.clone(), options));
        }

        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        let config = read_config(&config_path)?;
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new(""));

        config
            .validate_data_dir(base_dir)
            .map_err(|e| CliError::from_config(e, &config_path))?;

        Ok((
            config.root_document_from_base(base_dir),
            config.load_options(),
        ))
    }

    /// Resolves and loads the root document with its linked files, then
    /// prints what was loaded.
    pub fn load(&self) -> Result<LoadedSet, CliError> {
        let (root, options) = self.resolve()?;
        let loaded = load_set(root, options)?;
        loaded.print_summary();
        Ok(loaded)
    }
}

impl LoadedSet {
    /// Prints the parsed and skipped documents and the entry count.
    pub fn print_summary(&self) {
        ui::print_loaded(&self.report, self.collection.len());

        if self.collection.is_empty() {
            ui::print_no_entries(&self.root);
        }
    }
}

fn read_config(path: &Path) -> Result<TranslatorConfig, CliError> {
    TranslatorConfig::read_from_path(path).map_err(|e| CliError::from_config(e, path))
}

/// Loads `root` into a fresh collection.
pub fn load_set(root: PathBuf, options: LoadOptions) -> Result<LoadedSet, CliError> {
    tracing::debug!("Loading root document {} with {:?}", root.display(), options);

    let mut collection = Collection::new();
    let report = Loader::new(options)
        .load(&root, &mut collection)
        .map_err(CliError::from_translator)?;

    Ok(LoadedSet {
        root,
        collection,
        report,
    })
}
