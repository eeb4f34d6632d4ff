use super::common::InputArgs;
use crate::error::CliError;
use crate::utils::ui;
use clap::Args;
use translator_xml::Collection;

/// How entries are grouped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupBy {
    /// By the file name of the document defining the entry.
    Sheet,
    /// By the section enclosing the entry.
    Section,
}

/// Arguments for the sheets and sections commands.
#[derive(Debug, Clone, Args)]
pub struct GroupArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Only print this group.
    #[arg(long)]
    pub only: Option<String>,
}

pub fn run_group(args: GroupArgs, group_by: GroupBy) -> Result<(), CliError> {
    let loaded = args.input.load()?;
    let entries = loaded.collection.entries();

    let groups = match group_by {
        GroupBy::Sheet => Collection::group_by_sheets(entries),
        GroupBy::Section => Collection::group_by_sections(entries),
    };

    for (name, group) in &groups {
        if args.only.as_ref().is_some_and(|only| only != name) {
            continue;
        }
        ui::print_group(name, group);
    }

    Ok(())
}
