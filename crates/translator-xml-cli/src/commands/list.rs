use super::common::InputArgs;
use crate::error::CliError;
use crate::utils::ui;
use clap::Args;

/// Arguments for the list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Prints every indexed entry as `key: value`, in index order.
pub fn run_list(args: ListArgs) -> Result<(), CliError> {
    let loaded = args.input.load()?;
    ui::print_entries(loaded.collection.entries());
    Ok(())
}
