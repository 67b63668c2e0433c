//! Unified social credit code (GB 32100) validation.
//!
//! The code is 18 symbols from a 31-character alphabet; the last symbol is a
//! MOD 31-3 check character over the first 17. Input is case-folded to
//! upper-case before any check, and validity is recomputed on every call.
//!
//! Some codes issued by early pilot programmes are legally valid yet fail the
//! checksum (e.g. `91350100M0001TGQXM`). They are reported as invalid; callers
//! that must accept them should treat a [`OrganizationIdError::ChecksumMismatch`]
//! as suspicious rather than fraudulent.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::check_digits::{gb32100_check_char, org_char_value};

/// Number of symbols in a unified social credit code.
pub const ORG_ID_LEN: usize = 18;

/// Shape check applied after case folding.
static ORG_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{18}$").unwrap_or_else(|_| {
        Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken"))
    })
});

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why a unified social credit code was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizationIdError {
    /// The input is not exactly 18 characters long.
    WrongLength {
        /// Number of characters in the input.
        got: usize,
    },
    /// A character is not an ASCII letter or digit.
    InvalidCharacter {
        /// 1-indexed position of the first offending character.
        position: usize,
        /// The offending character.
        found: char,
    },
    /// A body character is one of the unassigned letters `I`, `O`, `S`, `V`, `Z`.
    UnassignedCharacter {
        /// 1-indexed position of the first offending character.
        position: usize,
        /// The offending character, upper-cased.
        found: char,
    },
    /// The check character does not match the weighted sum.
    ChecksumMismatch {
        /// Check character implied by the first 17 symbols.
        expected: char,
        /// Character found at position 18, upper-cased.
        found: char,
    },
}

impl OrganizationIdError {
    /// Returns a stable `snake_case` reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongLength { .. } => "wrong_length",
            Self::InvalidCharacter { .. } => "invalid_character",
            Self::UnassignedCharacter { .. } => "unassigned_character",
            Self::ChecksumMismatch { .. } => "checksum_mismatch",
        }
    }
}

impl fmt::Display for OrganizationIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { got } => {
                write!(f, "expected {ORG_ID_LEN} characters, got {got}")
            }
            Self::InvalidCharacter { position, found } => {
                write!(f, "character {found:?} at position {position} is not A-Z or 0-9")
            }
            Self::UnassignedCharacter { position, found } => {
                write!(
                    f,
                    "character {found:?} at position {position} is not a code symbol"
                )
            }
            Self::ChecksumMismatch { expected, found } => {
                write!(f, "check character is {found:?}, expected {expected:?}")
            }
        }
    }
}

impl std::error::Error for OrganizationIdError {}

// ---------------------------------------------------------------------------
// OrganizationId
// ---------------------------------------------------------------------------

/// A unified social credit code, stored exactly as supplied.
///
/// ```
/// use idrule_core::OrganizationId;
///
/// assert!(OrganizationId::new("91310000MA1FL1MMXL").is_valid());
/// assert!(OrganizationId::new("91310000ma1fl1mmxl").is_valid());
/// assert!(!OrganizationId::new("91310000MA1FL1MMXM").is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Wraps a raw code. No checks run until [`OrganizationId::verify`].
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the code as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the code passes every structural and checksum check.
    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    /// Runs every check and reports the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`OrganizationIdError`] of the first failing check.
    pub fn verify(&self) -> Result<(), OrganizationIdError> {
        self.check().inspect_err(|e| {
            tracing::debug!(reason = e.code(), "unified social credit code rejected");
        })
    }

    fn check(&self) -> Result<(), OrganizationIdError> {
        let code = self.0.to_ascii_uppercase();

        let got = code.chars().count();
        if got != ORG_ID_LEN {
            return Err(OrganizationIdError::WrongLength { got });
        }

        if !ORG_ID_RE.is_match(&code) {
            let (index, found) = code
                .chars()
                .enumerate()
                .find(|(_, c)| !c.is_ascii_uppercase() && !c.is_ascii_digit())
                .unwrap_or((0, '\0'));
            return Err(OrganizationIdError::InvalidCharacter {
                position: index + 1,
                found,
            });
        }

        // The regex guarantees 18 ASCII bytes from here on.
        let bytes = code.as_bytes();
        let Some(expected) = gb32100_check_char(&code[..17]) else {
            let index = bytes[..17]
                .iter()
                .position(|&b| org_char_value(b).is_none())
                .unwrap_or(0);
            return Err(OrganizationIdError::UnassignedCharacter {
                position: index + 1,
                found: char::from(bytes[index]),
            });
        };

        let found = char::from(bytes[17]);
        if expected == found {
            Ok(())
        } else {
            Err(OrganizationIdError::ChecksumMismatch { expected, found })
        }
    }

    /// Returns the check character implied by the first 17 symbols, or `None`
    /// when the code is not 18 characters or its body contains a non-symbol.
    ///
    /// ```
    /// use idrule_core::OrganizationId;
    ///
    /// // A pilot-programme code whose printed check character is `M`.
    /// let code = OrganizationId::new("91350100M0001TGQXM");
    /// assert_eq!(code.expected_check_char(), Some('1'));
    /// ```
    pub fn expected_check_char(&self) -> Option<char> {
        let code = self.0.to_ascii_uppercase();
        if code.len() != ORG_ID_LEN {
            return None;
        }
        gb32100_check_char(code.get(..17)?)
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OrganizationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrganizationId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for OrganizationId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
