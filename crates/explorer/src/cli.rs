use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "explorer")]
#[command(about = "Browse a searchable catalog of UI widgets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub tui: TuiArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the catalog, optionally filtered
    List(ListArgs),

    /// Print a single entry
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Start with this search query
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Hide sections with no matching entries
    #[arg(long)]
    pub hide_empty: bool,

    /// Redraw rate cap
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: u32,

    /// Write logs to this file (the terminal is busy with the UI)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Draw inline instead of in the alternate screen
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Program used to open reference links
    #[arg(long, env = "EXPLORER_OPENER", value_name = "PROGRAM")]
    pub opener: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only print entries whose name or description contains this text
    #[arg(default_value = "")]
    pub query: String,

    /// Hide sections with no matching entries
    #[arg(long)]
    pub hide_empty: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Entry name, e.g. "Slider"
    pub name: String,
}
