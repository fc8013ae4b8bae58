use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mhhs_model::CategoryFilter;

#[derive(Parser)]
#[command(
    name = "mhhs",
    version,
    about = "Browse the MHHS interface catalogue",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub locations: LocationArgs,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub color: colorchoice_clap::Color,

    /// Override log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct LocationArgs {
    /// Catalogue document (defaults to MHHS_CATALOGUE or interfaceData.json)
    #[arg(long = "catalogue", value_name = "PATH", global = true)]
    pub catalogue: Option<PathBuf>,

    /// Settings file (defaults to mhhs.toml when present)
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for saved preferences such as favorites
    #[arg(long = "prefs-dir", value_name = "DIR", global = true)]
    pub prefs_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List interfaces, optionally filtered and searched
    List(ListArgs),

    /// Show an interface with its data items and rejection codes
    Show {
        /// Interface id (e.g. IF-001)
        id: String,
    },

    /// Search the rejection code reference
    Codes {
        /// Text matched against code, description, reason and resolution
        term: Option<String>,
    },

    /// Suggest query completions for partial input
    Suggest {
        partial: String,
    },

    /// Print the data entry fields for an interface
    Form {
        id: String,
    },

    /// Validate values for an interface and write the JSON payload
    Export(ExportArgs),

    /// Add or remove an interface from favorites
    Favorite {
        id: String,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Search query
    #[arg(short = 's', long = "search", default_value = "")]
    pub search: String,

    /// Category filter (all, supplier_send, supplier_receive, supplier_both, none)
    #[arg(short = 'f', long = "filter", default_value = "all", value_parser = parse_filter)]
    pub filter: CategoryFilter,

    /// Only show favorites
    #[arg(long = "favorites")]
    pub favorites_only: bool,

    /// Print query completions above the table
    #[arg(long = "suggest")]
    pub suggest: bool,
}

#[derive(Args)]
pub struct ExportArgs {
    pub id: String,

    /// Values as inline JSON or a path to a JSON file
    #[arg(long = "values", value_name = "JSON")]
    pub values: String,

    /// Directory to write the payload into
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Print the payload instead of writing a file
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_filter(value: &str) -> Result<CategoryFilter, String> {
    value.parse().map_err(|error| format!("{error}"))
}
