//! Implementation of `idrule redact --kind <KIND> <VALUE>...`.
//!
//! Prints the masked form of each value together with the fingerprint of
//! the original. Values of the wrong length are reported by their 1-based
//! position only; the raw value never reaches the output.
//!
//! Exit codes:
//! - 0 = every value was redacted
//! - 1 = at least one value had the wrong length
//! - 2 = input could not be read
use std::io::Write;

use idrule_core::{RedactionKind, redact};

use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_redacted, write_summary};

/// Runs the `redact` command.
///
/// # Errors
///
/// - [`CliError::RedactionFailed`] when any value has the wrong length.
/// - [`CliError::IoError`] when stdout or stderr cannot be written.
pub fn run(
    kind: RedactionKind,
    values: &[String],
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let failed =
        redact_all(&mut stdout.lock(), kind, values, config).map_err(write_failed("stdout"))?;

    tracing::info!(kind = kind.as_str(), total = values.len(), failed, "redaction finished");

    let stderr = std::io::stderr();
    write_summary(&mut stderr.lock(), values.len(), failed, config)
        .map_err(write_failed("stderr"))?;

    if failed > 0 {
        Err(CliError::RedactionFailed {
            failed,
            total: values.len(),
        })
    } else {
        Ok(())
    }
}

fn redact_all<W: Write>(
    out: &mut W,
    kind: RedactionKind,
    values: &[String],
    config: &FormatterConfig,
) -> std::io::Result<usize> {
    let mut failed = 0;
    for (i, raw) in values.iter().enumerate() {
        let result = redact(kind, raw);
        if result.is_err() {
            failed += 1;
        }
        write_redacted(out, i + 1, kind, &result, config)?;
    }
    Ok(failed)
}
