//! CLI argument definitions for the `arsel` binary.

use std::path::PathBuf;

use arsel_cli::logging::LogFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "arsel",
    version,
    about = "Dual-list selection manager - pick, order and alias catalog items",
    long_about = "Pick items from a master catalog into an ordered, aliased selection.\n\n\
                  Selections are stored as raw,alias CSV pair files and can be edited\n\
                  with a small line-oriented script."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the available pool and the selected sequence.
    Show(SessionArgs),

    /// Apply a script of list operations, then print the result.
    Run(RunArgs),

    /// Check that a file is a well-formed raw,alias pair file.
    Check {
        /// Pair file to inspect.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct SessionArgs {
    /// Catalog file: one `name[,tooltip]` per line.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,

    /// Eligible catalog positions for the short list (comma separated).
    #[arg(long = "mask", value_name = "LIST", value_delimiter = ',')]
    pub mask: Vec<usize>,

    /// Pair file to preload as the selection.
    #[arg(long = "selection", value_name = "FILE")]
    pub selection: Option<PathBuf>,

    /// Replace characters outside `[A-Za-z0-9_]` in aliases.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Start in full mode even when a short list is available.
    #[arg(long = "full")]
    pub full: bool,

    /// Print the final state as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Script with one list operation per line.
    #[arg(long = "script", value_name = "FILE")]
    pub script: PathBuf,

    /// Write the resulting selection to this pair file.
    #[arg(long = "save", value_name = "FILE")]
    pub save: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
