use crate::utils::parser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;
use threedi::engine::config::PartnerStrategy;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The threedi developers",
    version,
    about = "threedi CLI - Encode protein structures into the 3Di structural alphabet.",
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
    /// Encode every chain of one or more PDB files as 3Di sequences.
    Encode(EncodeArgs),
    /// Print the nearest-partner table of every residue.
    Partners(PartnersArgs),
    /// Manage the local data directory holding codebooks.
    Data(DataArgs),
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One `>structure_chain` record per chain
    Fasta,
    /// Tab-separated `structure chain length sequence` lines
    Tsv,
}

/// Settings shared by every command that runs the encoder.
#[derive(Args, Debug, Clone, Default)]
pub struct EncoderArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Partner search strategy ('kd-tree' or 'brute-force').
    #[arg(long, value_name = "STRATEGY", value_parser = parser::parse_partner_strategy)]
    pub partner_strategy: Option<PartnerStrategy>,

    /// Exclude residues within this many positions from being partners.
    #[arg(long, value_name = "INT")]
    pub sequence_exclusion: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S partners.sequence-exclusion=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Input structure file(s) in PDB format.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub input: Vec<PathBuf>,

    /// Write sequences to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only encode the chain with this identifier.
    #[arg(long, value_name = "ID")]
    pub chain: Option<char>,

    /// Codebook to use. Can be a manifest path or a logical name (e.g., '3di').
    #[arg(long, value_name = "NAME_OR_PATH")]
    pub codebook: Option<String>,

    /// Character printed for residues without a state.
    #[arg(long, value_name = "CHAR")]
    pub unknown_char: Option<char>,

    /// Output format.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub encoder: EncoderArgs,
}

/// Arguments for the `partners` subcommand.
#[derive(Args, Debug)]
pub struct PartnersArgs {
    /// Input structure file(s) in PDB format.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub input: Vec<PathBuf>,

    /// Write the table to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only report the chain with this identifier.
    #[arg(long, value_name = "ID")]
    pub chain: Option<char>,

    #[command(flatten)]
    pub encoder: EncoderArgs,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing data files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}
