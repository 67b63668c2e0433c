//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use idrule_core::{Fingerprint, RedactionKind};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits one aligned line per input to stdout. `Json` emits one JSON
/// object per input (NDJSON).
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, optionally colored output (default).
    Human,
    /// Structured NDJSON output.
    Json,
}

/// Kind of value passed to `redact`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    /// 11-digit mobile phone number.
    Phone,
    /// 18-character resident identity number.
    PersonalId,
}

impl From<KindArg> for RedactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Phone => RedactionKind::Phone,
            KindArg::PersonalId => RedactionKind::PersonalId,
        }
    }
}

/// Values given on the command line and/or in a newline-separated file.
#[derive(clap::Args, Clone, Debug)]
pub struct Inputs {
    /// Values to process.
    #[arg(value_name = "VALUE")]
    pub values: Vec<String>,
    /// Read additional newline-separated values from FILE, or `-` for stdin.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathOrStdin>,
}

/// All top-level subcommands exposed by the `idrule` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Validate resident identity numbers and print district, birth date and sex.
    Person {
        #[command(flatten)]
        inputs: Inputs,
        /// Date that birth dates must not be later than (default: today).
        ///
        /// Can also be set via the `IDRULE_TODAY` environment variable.
        #[arg(long, value_name = "YYYY-MM-DD", env = "IDRULE_TODAY")]
        today: Option<NaiveDate>,
    },

    /// Validate unified social credit codes.
    Org {
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Mask values for display and print the fingerprint of each original.
    Redact {
        /// Kind of value being redacted (required).
        #[arg(long)]
        kind: KindArg,
        #[command(flatten)]
        inputs: Inputs,
    },

    /// Check that a value has the given fingerprint.
    Verify {
        /// Fingerprint printed by `redact` (32 hex characters).
        #[arg(long, value_name = "HEX")]
        fingerprint: Fingerprint,
        /// The original, unmasked value.
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

/// Root CLI struct for the `idrule` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "idrule",
    version,
    about = "Identity number and credit code checker",
    long_about = "Validates 18-character resident identity numbers and unified\n\
                  social credit codes, and redacts phone numbers and identity\n\
                  numbers for display."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(
        long,
        short = 'f',
        default_value = "human",
        global = true,
        env = "IDRULE_FORMAT"
    )]
    pub format: OutputFormat,

    /// Suppress the summary line and all log output below errors
    /// (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log rejection reasons and timing to stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum size in bytes of a `--file` input.
    ///
    /// Can also be set via the `IDRULE_MAX_FILE_SIZE` environment variable.
    /// The CLI flag takes precedence over the environment variable.
    /// Default: 16777216 (16 MB).
    #[arg(
        long,
        global = true,
        env = "IDRULE_MAX_FILE_SIZE",
        default_value = "16777216"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Also respects the `NO_COLOR` environment variable per
    /// <https://no-color.org>.
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}
