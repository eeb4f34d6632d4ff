use super::common::{InputArgs, load_set};
use crate::error::CliError;
use crate::utils::ui;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the merge command.
#[derive(Debug, Clone, Args)]
pub struct MergeArgs {
    /// Root document of the set whose values are merged in.
    pub other: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Loads both document sets, keeps the keys they share with the values of
/// `other`, and prints the result.
pub fn run_merge(args: MergeArgs) -> Result<(), CliError> {
    let (root, options) = args.input.resolve()?;
    let mut primary = load_set(root, options)?;
    primary.print_summary();
    let other = load_set(args.other, options)?;
    other.print_summary();

    let before = primary.collection.len();
    primary.collection.merge(&other.collection);
    let kept = primary.collection.len();

    ui::print_merge_summary(kept, before - kept, &other.root);
    ui::print_entries(primary.collection.entries());

    Ok(())
}
