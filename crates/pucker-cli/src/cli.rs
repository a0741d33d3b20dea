use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "pucker - Cremer-Pople ring-puckering analysis and conformation classification for six-membered rings.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze every structure of a dataset tree and write a puckering report.
    Analyze(AnalyzeArgs),
    /// Analyze the six-membered ring of a single XYZ file.
    Ring(RingArgs),
    /// List the systems known to the ring-index registry.
    Systems(SystemsArgs),
}

/// Output formats for the puckering report.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Dataset root, laid out as <DATA_DIR>/<chirality>/<system>/**/*.xyz
    #[arg(required = true, value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Directory the report files are written to.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to an analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// TOML file of `name = [i0, ..., i5]` ring-index entries, overriding the built-in table.
    #[arg(short, long, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Chirality folders to analyze (comma-separated).
    #[arg(long = "chirality", value_name = "LABEL", value_delimiter = ',')]
    pub chiralities: Vec<String>,

    /// Report formats to write (comma-separated).
    #[arg(short, long = "format", value_name = "FORMAT", value_delimiter = ',')]
    pub formats: Vec<ReportFormat>,

    /// Ignore the built-in diketopiperazine ring-index table.
    #[arg(long)]
    pub no_builtin: bool,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S output.directory=results
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `ring` subcommand.
#[derive(Args, Debug)]
pub struct RingArgs {
    /// Path to the input XYZ file.
    #[arg(required = true, value_name = "XYZ")]
    pub input: PathBuf,

    /// Registered system whose ring indices select the ring atoms.
    #[arg(short, long, value_name = "NAME", required_unless_present = "indices")]
    pub system: Option<String>,

    /// Explicit ring-atom indices, in traversal order (comma-separated, 0-based).
    #[arg(
        short,
        long,
        value_name = "I0,...,I5",
        value_delimiter = ',',
        conflicts_with = "system"
    )]
    pub indices: Option<Vec<usize>>,

    /// TOML file of additional ring-index entries.
    #[arg(short, long, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Flip the mean-plane normal to point towards this direction (comma-separated x,y,z).
    #[arg(long, value_name = "X,Y,Z", value_delimiter = ',', allow_negative_numbers = true)]
    pub towards: Option<Vec<f64>>,
}

/// Arguments for the `systems` subcommand.
#[derive(Args, Debug)]
pub struct SystemsArgs {
    /// TOML file of additional ring-index entries.
    #[arg(short, long, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Ignore the built-in diketopiperazine ring-index table.
    #[arg(long)]
    pub no_builtin: bool,
}
