//! CLI argument definitions for the ligand merger.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ligand-merge",
    version,
    about = "Merge SD ligand files with a pharmacology sheet",
    long_about = "Merge one or more SD files exported from a registry search with the\n\
                  matching ligand pharmacology sheet.\n\n\
                  Writes a full merged table (one row per ligand) and, when a\n\
                  measurement parameter is available, a parameter-focused table\n\
                  (one row per matching observation) as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Merge SD files with an optional pharmacology sheet and export CSV tables.
    Merge(MergeArgs),

    /// List the measurement parameters offered by a pharmacology sheet.
    Parameters(ParametersArgs),
}

#[derive(Parser)]
pub struct MergeArgs {
    /// SD files to merge, in order.
    #[arg(value_name = "SDF", required = true)]
    pub sdf_files: Vec<PathBuf>,

    /// Pharmacology sheet (.xlsx, .xls, .ods, .csv or .tsv).
    #[arg(long = "pharmacology", short = 'p', value_name = "PATH")]
    pub pharmacology: Option<PathBuf>,

    /// Measurement parameter for the parameter-focused table
    /// (default: the preferred parameter, else the first available).
    #[arg(long = "parameter", value_name = "NAME")]
    pub parameter: Option<String>,

    /// Output directory for CSV files (default: <first SDF directory>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run the merge and print the summary without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the status signals and tables of the run as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Number of rows shown in each table preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 5)]
    pub preview_rows: usize,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

#[derive(Parser)]
pub struct ParametersArgs {
    /// Pharmacology sheet to inspect.
    #[arg(value_name = "PATH")]
    pub pharmacology: PathBuf,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Property and label names the merge keys on.
#[derive(Parser)]
pub struct ColumnArgs {
    /// SD property holding the registry identifier.
    #[arg(long = "identifier-property", value_name = "NAME", default_value = "cas.rn")]
    pub identifier_property: String,

    /// SD property holding the ligand display name.
    #[arg(
        long = "display-name-property",
        value_name = "NAME",
        default_value = "cas.index.name"
    )]
    pub display_name_property: String,

    /// Label in the first sheet column that marks the header row.
    #[arg(long = "sheet-label", value_name = "LABEL", default_value = "Ligand CAS RN")]
    pub sheet_label: String,

    /// Parameter picked automatically when none is given.
    #[arg(long = "preferred-parameter", value_name = "NAME", default_value = "IC50")]
    pub preferred_parameter: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
