/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `idrule` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The tool could not read the values at
///   all, so nothing was checked.
/// - Exit code **1**: logical failure. Every value was processed but at least
///   one was invalid, could not be redacted, or did not match.
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `idrule` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes, if known (disk files only).
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// Neither positional values nor a non-empty `--file` were given.
    NoInput,

    // --- Exit code 1: logical failures ---
    /// One or more identifiers failed validation. Per-value results have
    /// already been printed.
    InvalidIdentifiers {
        /// Number of invalid values.
        invalid: usize,
        /// Number of values checked.
        total: usize,
    },

    /// One or more values had the wrong length for redaction.
    RedactionFailed {
        /// Number of values that could not be redacted.
        failed: usize,
        /// Number of values processed.
        total: usize,
    },

    /// The value does not have the supplied fingerprint.
    FingerprintMismatch,
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::NoInput => 2,

            Self::InvalidIdentifiers { .. }
            | Self::RedactionFailed { .. }
            | Self::FingerprintMismatch => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::NoInput => "error: no values given; pass VALUE arguments or --file".to_owned(),
            Self::InvalidIdentifiers { invalid, total } => {
                format!("error: {invalid} of {total} values are invalid")
            }
            Self::RedactionFailed { failed, total } => {
                format!("error: {failed} of {total} values could not be redacted")
            }
            Self::FingerprintMismatch => {
                "error: value does not match the fingerprint".to_owned()
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
