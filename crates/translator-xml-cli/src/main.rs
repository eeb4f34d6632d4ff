use clap::{Parser, Subcommand};
use miette::Result as MietteResult;
use translator_xml_cli::commands::{
    GroupArgs, GroupBy, ListArgs, MergeArgs, run_group, run_list, run_merge,
};
use translator_xml_cli::utils::ui;

#[derive(Parser)]
#[command(name = "translator-xml")]
#[command(about = "Inspect translator XML documents and their linked sheets")]
#[command(version)]
struct Cli {
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every entry as `key: value`
    List(ListArgs),

    /// Print entries grouped by sheet (source file name)
    Sheets(GroupArgs),

    /// Print entries grouped by section
    Sections(GroupArgs),

    /// Keep the keys shared with another document set, taking its values
    Merge(MergeArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();

    ui::set_plain_mode(cli.no_color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(!ui::is_plain())
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .color(!ui::is_plain())
                .build(),
        )
    }))
    .ok();

    ui::init_logging();

    let result = match cli.command {
        Commands::List(args) => run_list(args),
        Commands::Sheets(args) => run_group(args, GroupBy::Sheet),
        Commands::Sections(args) => run_group(args, GroupBy::Section),
        Commands::Merge(args) => run_merge(args),
    };

    result.map_err(miette::Report::new)
}
