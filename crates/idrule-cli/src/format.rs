/// Result formatting: human-readable lines and NDJSON.
///
/// Per-value results go to stdout, one line each. The closing summary line
/// goes to stderr so that stdout stays machine-consumable.
///
/// - **Human mode** (default): a `[OK]`/`[INVALID]` tag, color-coded when
///   stdout is a TTY and neither `--no-color` nor `NO_COLOR` is set.
/// - **JSON mode**: one self-contained JSON object per line.
use std::io::{IsTerminal as _, Write};

use idrule_core::{
    OrganizationId, OrganizationIdError, PersonalId, PersonalIdError, RedactError, Redacted,
    RedactionKind,
};
use serde_json::json;

use crate::cli::OutputFormat;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stdout.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the result formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Output mode.
    pub mode: OutputFormat,
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress the summary line.
    pub quiet: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(mode: OutputFormat, no_color_flag: bool, quiet: bool) -> Self {
        Self {
            mode,
            colors: colors_enabled(no_color_flag),
            quiet,
        }
    }

    fn tag(&self, ok: bool) -> String {
        let (tag, color) = if ok {
            ("[OK]", ANSI_GREEN)
        } else {
            ("[INVALID]", ANSI_RED)
        };
        if self.colors {
            format!("{color}{tag}{ANSI_RESET}")
        } else {
            tag.to_owned()
        }
    }
}

// ---------------------------------------------------------------------------
// Per-value results
// ---------------------------------------------------------------------------

/// Writes the result of parsing one resident identity number.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_person<W: Write>(
    writer: &mut W,
    raw: &str,
    id: &PersonalId,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match config.mode {
        OutputFormat::Human => match id.rejection() {
            None => writeln!(
                writer,
                "{} {raw}  district={} birth_date={} sex={}",
                config.tag(true),
                id.district_id(),
                id.birth_date(),
                id.sex(),
            ),
            Some(reason) => writeln!(
                writer,
                "{} {raw}  {}: {reason}",
                config.tag(false),
                reason.code()
            ),
        },
        OutputFormat::Json => {
            let value = json!({
                "input": raw,
                "valid": id.valid(),
                "district_id": id.district_id(),
                "birth_date": id.birth_date(),
                "sex": id.sex(),
                "reason": id.rejection().map(PersonalIdError::code),
                "message": id.rejection().map(ToString::to_string),
            });
            writeln!(writer, "{value}")
        }
    }
}

/// Writes the result of verifying one unified social credit code.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_org<W: Write>(
    writer: &mut W,
    code: &OrganizationId,
    result: &Result<(), OrganizationIdError>,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match config.mode {
        OutputFormat::Human => match result {
            Ok(()) => writeln!(writer, "{} {code}", config.tag(true)),
            Err(reason) => writeln!(
                writer,
                "{} {code}  {}: {reason}",
                config.tag(false),
                reason.code()
            ),
        },
        OutputFormat::Json => {
            let reason = result.as_ref().err();
            let value = json!({
                "input": code.as_str(),
                "valid": result.is_ok(),
                "reason": reason.map(OrganizationIdError::code),
                "message": reason.map(ToString::to_string),
                "expected_check_char": code.expected_check_char().map(String::from),
            });
            writeln!(writer, "{value}")
        }
    }
}

/// Writes the result of redacting the value at 1-based `index`.
///
/// Failed values are identified by index only so the raw value is never
/// echoed.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_redacted<W: Write>(
    writer: &mut W,
    index: usize,
    kind: RedactionKind,
    result: &Result<Redacted, RedactError>,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match (config.mode, result) {
        (OutputFormat::Human, Ok(r)) => writeln!(writer, "{}  {}", r.masked, r.fingerprint),
        (OutputFormat::Human, Err(e)) => {
            writeln!(writer, "{} #{index}  {e}", config.tag(false))
        }
        (OutputFormat::Json, Ok(r)) => {
            let value = json!({
                "index": index,
                "kind": kind,
                "masked": r.masked,
                "fingerprint": r.fingerprint,
            });
            writeln!(writer, "{value}")
        }
        (OutputFormat::Json, Err(e)) => {
            let value = json!({
                "index": index,
                "kind": kind,
                "error": "wrong_length",
                "message": e.to_string(),
            });
            writeln!(writer, "{value}")
        }
    }
}

/// Writes the summary line. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    total: usize,
    failed: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match config.mode {
        OutputFormat::Human => writeln!(writer, "{total} checked, {failed} failed"),
        OutputFormat::Json => writeln!(
            writer,
            "{}",
            json!({ "summary": { "checked": total, "failed": failed } })
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use chrono::NaiveDate;
    use idrule_core::{FixedClock, redact_phone};

    use super::*;

    fn config(mode: OutputFormat) -> FormatterConfig {
        FormatterConfig {
            mode,
            colors: false,
            quiet: false,
        }
    }

    fn person(raw: &str) -> PersonalId {
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 2, 19).expect("date"));
        PersonalId::with_clock(raw, &clock)
    }

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("write to Vec");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn human_valid_person() {
        let raw = "11010519491231002X";
        let out = capture(|w| write_person(w, raw, &person(raw), &config(OutputFormat::Human)));
        assert_eq!(
            out,
            "[OK] 11010519491231002X  district=110105 birth_date=1949-12-31 sex=female\n"
        );
    }

    #[test]
    fn human_invalid_person_shows_reason() {
        let raw = "110101199003077456";
        let out = capture(|w| write_person(w, raw, &person(raw), &config(OutputFormat::Human)));
        assert!(out.starts_with("[INVALID] 110101199003077456  checksum_mismatch:"), "{out}");
    }

    #[test]
    fn json_person_is_one_object_per_line() {
        let raw = "110101199003077456";
        let out = capture(|w| write_person(w, raw, &person(raw), &config(OutputFormat::Json)));
        assert_eq!(out.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v["valid"], false);
        assert_eq!(v["district_id"], 110_101);
        assert_eq!(v["birth_date"], "1990-03-07");
        assert_eq!(v["sex"], "male");
        assert_eq!(v["reason"], "checksum_mismatch");
    }

    #[test]
    fn json_org_reports_expected_check_char() {
        let code = OrganizationId::new("91350100M0001TGQXM");
        let out = capture(|w| write_org(w, &code, &code.verify(), &config(OutputFormat::Json)));
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v["valid"], false);
        assert_eq!(v["expected_check_char"], "1");
        assert_eq!(v["reason"], "checksum_mismatch");
    }

    #[test]
    fn human_valid_org() {
        let code = OrganizationId::new("91310000MA1FL1MMXL");
        let out = capture(|w| write_org(w, &code, &code.verify(), &config(OutputFormat::Human)));
        assert_eq!(out, "[OK] 91310000MA1FL1MMXL\n");
    }

    #[test]
    fn human_redaction_never_echoes_failed_input() {
        let result = redact_phone("1380013800");
        let out = capture(|w| {
            write_redacted(w, 2, RedactionKind::Phone, &result, &config(OutputFormat::Human))
        });
        assert!(out.contains("#2"), "{out}");
        assert!(!out.contains("1380013800"), "{out}");
    }

    #[test]
    fn json_redaction() {
        let result = redact_phone("13800138000");
        let out = capture(|w| {
            write_redacted(w, 1, RedactionKind::Phone, &result, &config(OutputFormat::Json))
        });
        let v: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(v["masked"], "138****8000");
        assert_eq!(v["fingerprint"], "7945bd83237335e5376ff44d62e4f0ae");
        assert_eq!(v["kind"], "phone");
    }

    #[test]
    fn summary_suppressed_when_quiet() {
        let quiet = FormatterConfig {
            quiet: true,
            ..config(OutputFormat::Human)
        };
        assert_eq!(capture(|w| write_summary(w, 3, 1, &quiet)), "");
        assert_eq!(
            capture(|w| write_summary(w, 3, 1, &config(OutputFormat::Human))),
            "3 checked, 1 failed\n"
        );
    }

    #[test]
    fn colored_tags_wrap_in_ansi() {
        let colored = FormatterConfig {
            colors: true,
            ..config(OutputFormat::Human)
        };
        assert_eq!(colored.tag(true), format!("{ANSI_GREEN}[OK]{ANSI_RESET}"));
        assert_eq!(colored.tag(false), format!("{ANSI_RED}[INVALID]{ANSI_RESET}"));
    }
}
