//! Implementation of `idrule org <CODE>...`.
//!
//! Validates unified social credit codes. On a checksum mismatch the JSON
//! output carries the check character the body implies.
//!
//! Exit codes:
//! - 0 = every code is valid
//! - 1 = at least one code is invalid
//! - 2 = input could not be read
use std::io::Write;
use std::time::Instant;

use idrule_core::OrganizationId;

use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_org, write_summary};

/// Runs the `org` command.
///
/// # Errors
///
/// - [`CliError::InvalidIdentifiers`] when any code is invalid.
/// - [`CliError::IoError`] when stdout or stderr cannot be written.
pub fn run(values: &[String], config: &FormatterConfig) -> Result<(), CliError> {
    let started = Instant::now();
    let stdout = std::io::stdout();
    let invalid = check_all(&mut stdout.lock(), values, config).map_err(write_failed("stdout"))?;

    tracing::info!(
        total = values.len(),
        invalid,
        elapsed_us = started.elapsed().as_micros(),
        "org check finished"
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

fn check_all<W: Write>(
    out: &mut W,
    values: &[String],
    config: &FormatterConfig,
) -> std::io::Result<usize> {
    let mut invalid = 0;
    for raw in values {
        let code = OrganizationId::new(raw.as_str());
        let result = code.verify();
        if result.is_err() {
            invalid += 1;
        }
        write_org(out, &code, &result, config)?;
    }
    Ok(invalid)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::cli::OutputFormat;

    #[test]
    fn lowercase_codes_pass_and_pilot_codes_fail() {
        let config = FormatterConfig {
            mode: OutputFormat::Human,
            colors: false,
            quiet: true,
        };
        let values = vec![
            "91110000600037341l".to_owned(),
            "91350100M0001TGQXM".to_owned(),
        ];
        let mut buf = Vec::new();
        let invalid = check_all(&mut buf, &values, &config).expect("write to Vec");
        assert_eq!(invalid, 1);
        let out = String::from_utf8(buf).expect("utf8");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("[OK]"), "{out}");
        assert!(lines[1].starts_with("[INVALID]"), "{out}");
    }
}
