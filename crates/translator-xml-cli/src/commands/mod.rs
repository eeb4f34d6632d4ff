//! CLI command implementations.

mod common;
mod group;
mod list;
mod merge;

pub use common::{InputArgs, LoadedSet, load_set};
pub use group::{GroupArgs, GroupBy, run_group};
pub use list::{ListArgs, run_list};
pub use merge::{MergeArgs, run_merge};
