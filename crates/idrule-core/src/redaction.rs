/// Display masking for phone numbers and resident identity numbers.
///
/// Each redaction returns the masked string together with the
/// [`Fingerprint`] of the original, so the original can later be checked for
/// equality without being stored. Inputs must have the exact fixed length of
/// their kind; nothing else about them is validated.
///
/// | kind          | length | kept                          | masked        |
/// |---------------|--------|-------------------------------|---------------|
/// | phone         | 11     | 1–3, 8–11                     | 4–7 → `****`  |
/// | personal id   | 18     | 1–3, 7–14 (birth date), 18    | 4–6, 15–17 → `***` |
use std::fmt;

use serde::Serialize;

use crate::fingerprint::Fingerprint;
use crate::personal_id::PERSONAL_ID_LEN;

/// Mask replacing the middle four digits of a phone number.
const PHONE_MASK: &str = "****";

/// Mask replacing each hidden segment of a resident identity number.
const SEGMENT_MASK: &str = "***";

/// Number of characters in a mobile phone number.
pub const PHONE_LEN: usize = 11;

/// The kinds of value that can be redacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionKind {
    /// An 11-digit mobile phone number.
    Phone,
    /// An 18-character resident identity number.
    PersonalId,
}

impl RedactionKind {
    /// The exact number of characters an input of this kind must have.
    pub fn expected_len(self) -> usize {
        match self {
            Self::Phone => PHONE_LEN,
            Self::PersonalId => PERSONAL_ID_LEN,
        }
    }

    /// Returns the `snake_case` name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::PersonalId => "personal_id",
        }
    }
}

impl fmt::Display for RedactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the redaction functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedactError {
    /// The input does not have the fixed length of its kind.
    WrongLength {
        /// The kind that was requested.
        kind: RedactionKind,
        /// The required number of characters.
        expected: usize,
        /// The number of characters supplied.
        got: usize,
    },
}

impl fmt::Display for RedactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength {
                kind,
                expected,
                got,
            } => write!(f, "cannot redact {kind}: expected {expected} characters, got {got}"),
        }
    }
}

impl std::error::Error for RedactError {}

/// A masked display value and the fingerprint of its original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redacted {
    /// The display-safe string.
    pub masked: String,
    /// Fingerprint of the original, unmasked value.
    pub fingerprint: Fingerprint,
}

/// Redacts `raw` according to `kind`.
///
/// # Errors
///
/// Returns [`RedactError::WrongLength`] if `raw` does not have
/// [`RedactionKind::expected_len`] characters.
pub fn redact(kind: RedactionKind, raw: &str) -> Result<Redacted, RedactError> {
    let chars: Vec<char> = raw.chars().collect();
    let expected = kind.expected_len();
    if chars.len() != expected {
        return Err(RedactError::WrongLength {
            kind,
            expected,
            got: chars.len(),
        });
    }

    let keep = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();
    let masked = match kind {
        RedactionKind::Phone => format!("{}{PHONE_MASK}{}", keep(0..3), keep(7..11)),
        RedactionKind::PersonalId => format!(
            "{}{SEGMENT_MASK}{}{SEGMENT_MASK}{}",
            keep(0..3),
            keep(6..14),
            keep(17..18)
        ),
    };

    Ok(Redacted {
        masked,
        fingerprint: Fingerprint::of(raw),
    })
}

/// Redacts an 11-character phone number, keeping the first three and last
/// four characters.
///
/// ```
/// use idrule_core::redact_phone;
///
/// # fn main() -> Result<(), idrule_core::RedactError> {
/// let r = redact_phone("13800138000")?;
/// assert_eq!(r.masked, "138****8000");
/// assert_eq!(r.fingerprint.to_string(), "7945bd83237335e5376ff44d62e4f0ae");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`RedactError::WrongLength`] unless `raw` has exactly 11 characters.
pub fn redact_phone(raw: &str) -> Result<Redacted, RedactError> {
    redact(RedactionKind::Phone, raw)
}

/// Redacts an 18-character resident identity number, keeping the first three
/// characters, the birth date and the check character.
///
/// # Errors
///
/// Returns [`RedactError::WrongLength`] unless `raw` has exactly 18 characters.
pub fn redact_personal_id(raw: &str) -> Result<Redacted, RedactError> {
    redact(RedactionKind::PersonalId, raw)
}
