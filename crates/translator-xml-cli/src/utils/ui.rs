// CLI output formatting with consistent styling using colored.
// Listings go to stdout so they can be piped; status lines go to stderr.

use colored::Colorize as _;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use translator_xml::{EntryMap, LoadReport};

static PLAIN_MODE: AtomicBool = AtomicBool::new(false);

/// Disable colors for deterministic output.
pub fn set_plain_mode(enabled: bool) {
    PLAIN_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_plain() -> bool {
    PLAIN_MODE.load(Ordering::SeqCst)
}

/// Install the tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!is_plain())
        .try_init()
        .ok();
}

pub fn print_loaded(report: &LoadReport, entry_count: usize) {
    for path in &report.parsed {
        eprintln!("{} {}", "Loaded".dimmed(), path.display());
    }

    for skipped in &report.skipped {
        eprintln!(
            "{} {}: {}",
            "Skipped".yellow(),
            skipped.path.display(),
            skipped.error
        );
    }

    eprintln!(
        "{} {}",
        "Collected".dimmed(),
        format!("{} entr(ies)", entry_count).green()
    );
}

pub fn print_no_entries(root: &Path) {
    eprintln!(
        "{} {}",
        "No entries found in".yellow(),
        root.display().to_string().white().bold()
    );
}

pub fn print_entries(entries: &EntryMap) {
    for entry in entries.values() {
        println!("{}: {}", entry.key().green(), entry.value());
    }
}

pub fn print_group(name: &str, entries: &EntryMap) {
    let label = if name.is_empty() { "(unnamed)" } else { name };
    println!(
        "{} {}",
        format!("[{}]", label).cyan().bold(),
        format!("({})", entries.len()).dimmed()
    );

    for entry in entries.values() {
        println!("  {}: {}", entry.key().green(), entry.value());
    }
}

pub fn print_merge_summary(kept: usize, dropped: usize, other: &Path) {
    eprintln!(
        "{} {} kept, {} dropped (values from {})",
        "Merged:".green(),
        kept,
        dropped,
        other.display()
    );
}
