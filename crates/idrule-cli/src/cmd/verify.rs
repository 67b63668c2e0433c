//! Implementation of `idrule verify --fingerprint <HEX> <VALUE>`.
//!
//! Exit codes:
//! - 0 = the value has the given fingerprint
//! - 1 = it does not
//! - 2 = the fingerprint is not 32 hex characters (rejected by clap)
use std::io::Write as _;

use idrule_core::Fingerprint;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::FormatterConfig;

/// Runs the `verify` command.
///
/// # Errors
///
/// - [`CliError::FingerprintMismatch`] when the digests differ.
/// - [`CliError::IoError`] when stdout cannot be written.
pub fn run(
    fingerprint: &Fingerprint,
    value: &str,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let matched = fingerprint.matches(value);
    tracing::debug!(matched, "fingerprint compared");

    let line = match config.mode {
        OutputFormat::Human if matched => "match".to_owned(),
        OutputFormat::Human => "mismatch".to_owned(),
        OutputFormat::Json => json!({
            "fingerprint": fingerprint,
            "matches": matched,
        })
        .to_string(),
    };
    writeln!(std::io::stdout().lock(), "{line}").map_err(write_failed("stdout"))?;

    if matched {
        Ok(())
    } else {
        Err(CliError::FingerprintMismatch)
    }
}
