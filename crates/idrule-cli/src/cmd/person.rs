//! Implementation of `idrule person <ID>...`.
//!
//! Validates resident identity numbers and prints district, birth date and
//! sex for each. Birth dates later than today are rejected; `--today` pins
//! the date for reproducible runs.
//!
//! Exit codes:
//! - 0 = every value is valid
//! - 1 = at least one value is invalid
//! - 2 = input could not be read
use std::io::Write;
use std::time::Instant;

use chrono::NaiveDate;
use idrule_core::{Clock, FixedClock, PersonalId, SystemClock};

use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_person, write_summary};

/// Runs the `person` command.
///
/// # Errors
///
/// - [`CliError::InvalidIdentifiers`] when any value is invalid.
/// - [`CliError::IoError`] when stdout or stderr cannot be written.
pub fn run(
    values: &[String],
    today: Option<NaiveDate>,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let started = Instant::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let invalid = match today {
        Some(date) => check_all(&mut out, values, &FixedClock(date), config),
        None => check_all(&mut out, values, &SystemClock, config),
    }
    .map_err(write_failed("stdout"))?;

    tracing::info!(
        total = values.len(),
        invalid,
        elapsed_us = started.elapsed().as_micros(),
        "person check finished"
    );

    let stderr = std::io::stderr();
    write_summary(&mut stderr.lock(), values.len(), invalid, config)
        .map_err(write_failed("stderr"))?;

    if invalid > 0 {
        Err(CliError::InvalidIdentifiers {
            invalid,
            total: values.len(),
        })
    } else {
        Ok(())
    }
}

/// Checks every value against `clock`, writing one result line each.
/// Returns the number of invalid values.
fn check_all<W: Write, C: Clock>(
    out: &mut W,
    values: &[String],
    clock: &C,
    config: &FormatterConfig,
) -> std::io::Result<usize> {
    let mut invalid = 0;
    for raw in values {
        let id = PersonalId::with_clock(raw, clock);
        if !id.valid() {
            invalid += 1;
        }
        write_person(out, raw, &id, config)?;
    }
    Ok(invalid)
}
