//! Resident identity number (GB 11643) parsing and validation.
//!
//! Layout of the 18 characters (1-indexed):
//!
//! | positions | content                              |
//! |-----------|--------------------------------------|
//! | 1–6       | administrative district code         |
//! | 7–14      | birth date, `YYYYMMDD`               |
//! | 15–17     | sequence code; parity encodes sex    |
//! | 18        | MOD 11-2 check character (`0-9`/`X`) |
//!
//! [`PersonalId`] never fails to construct. Invalid input yields a value with
//! `valid() == false` and a [`PersonalIdError`] reason.
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::check_digits::gb11643_check_char;
use crate::clock::{Clock, SystemClock};
use crate::enums::Sex;

/// Number of characters in a resident identity number.
pub const PERSONAL_ID_LEN: usize = 18;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why a resident identity number was rejected.
///
/// Variants are listed in the order the checks run; the first failing check
/// wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalIdError {
    /// The input is not exactly 18 characters long.
    WrongLength {
        /// Number of characters in the input.
        got: usize,
    },
    /// Positions 7–14 are not a real `YYYYMMDD` calendar date.
    InvalidBirthDate,
    /// The birth date lies after the current date.
    FutureBirthDate {
        /// The encoded birth date.
        birth_date: NaiveDate,
        /// The date validation ran against.
        today: NaiveDate,
    },
    /// Positions 1–6 do not parse as a non-negative integer.
    InvalidDistrict,
    /// Positions 15–17 do not parse as an integer.
    InvalidSequence,
    /// A character in positions 1–17 is not an ASCII digit.
    NonDigit {
        /// 1-indexed position of the first offending character.
        position: usize,
    },
    /// The check character does not match the weighted sum.
    ChecksumMismatch {
        /// Check character implied by positions 1–17.
        expected: char,
        /// Character found at position 18.
        found: char,
    },
}

impl PersonalIdError {
    /// Returns a stable `snake_case` reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongLength { .. } => "wrong_length",
            Self::InvalidBirthDate => "invalid_birth_date",
            Self::FutureBirthDate { .. } => "future_birth_date",
            Self::InvalidDistrict => "invalid_district",
            Self::InvalidSequence => "invalid_sequence",
            Self::NonDigit { .. } => "non_digit",
            Self::ChecksumMismatch { .. } => "checksum_mismatch",
        }
    }
}

impl fmt::Display for PersonalIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { got } => {
                write!(f, "expected {PERSONAL_ID_LEN} characters, got {got}")
            }
            Self::InvalidBirthDate => f.write_str("birth date is not a real calendar date"),
            Self::FutureBirthDate { birth_date, today } => {
                write!(f, "birth date {birth_date} is later than {today}")
            }
            Self::InvalidDistrict => f.write_str("district code is not a non-negative integer"),
            Self::InvalidSequence => f.write_str("sequence code is not an integer"),
            Self::NonDigit { position } => {
                write!(f, "non-digit character at position {position}")
            }
            Self::ChecksumMismatch { expected, found } => {
                write!(f, "check character is {found:?}, expected {expected:?}")
            }
        }
    }
}

impl std::error::Error for PersonalIdError {}

// ---------------------------------------------------------------------------
// PersonalId
// ---------------------------------------------------------------------------

/// A parsed resident identity number.
///
/// Fields are filled in check order. When a check fails, the field it would
/// have produced and every later field keep their zero values (`0`, `""`,
/// [`Sex::Unknown`]); a checksum failure therefore leaves all three fields
/// populated. Fields are only meaningful when [`PersonalId::valid`] is `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonalId {
    valid: bool,
    district_id: u64,
    birth_date: String,
    sex: Sex,
    #[serde(skip)]
    rejection: Option<PersonalIdError>,
}

impl PersonalId {
    /// Parses `raw`, rejecting birth dates later than the local system date.
    ///
    /// ```
    /// use idrule_core::{PersonalId, Sex};
    ///
    /// let id = PersonalId::new("11010519491231002X");
    /// assert!(id.valid());
    /// assert_eq!(id.district_id(), 110105);
    /// assert_eq!(id.birth_date(), "1949-12-31");
    /// assert_eq!(id.sex(), Sex::Female);
    /// ```
    pub fn new(raw: &str) -> Self {
        Self::with_clock(raw, &SystemClock)
    }

    /// Parses `raw`, taking "today" from `clock`.
    pub fn with_clock<C: Clock + ?Sized>(raw: &str, clock: &C) -> Self {
        let mut id = Self::default();
        match id.populate(raw, clock.today()) {
            Ok(()) => id.valid = true,
            Err(reason) => {
                tracing::debug!(reason = reason.code(), "resident identity number rejected");
                id.rejection = Some(reason);
            }
        }
        id
    }

    /// Runs the checks in order, filling fields as each one passes.
    fn populate(&mut self, raw: &str, today: NaiveDate) -> Result<(), PersonalIdError> {
        let chars = match <[char; PERSONAL_ID_LEN]>::try_from(raw.chars().collect::<Vec<_>>()) {
            Ok(chars) => chars,
            Err(chars) => return Err(PersonalIdError::WrongLength { got: chars.len() }),
        };

        let birth_date =
            parse_birth_date(&chars[6..14]).ok_or(PersonalIdError::InvalidBirthDate)?;
        if birth_date > today {
            return Err(PersonalIdError::FutureBirthDate { birth_date, today });
        }
        self.birth_date = birth_date.format("%Y-%m-%d").to_string();

        self.district_id = collect(&chars[..6])
            .parse::<u64>()
            .map_err(|_| PersonalIdError::InvalidDistrict)?;

        let sequence = collect(&chars[14..17])
            .parse::<u32>()
            .map_err(|_| PersonalIdError::InvalidSequence)?;
        self.sex = Sex::from_sequence(sequence);

        let Some(expected) = gb11643_check_char(&collect(&chars[..17])) else {
            let position = chars
                .iter()
                .position(|c| !c.is_ascii_digit())
                .map_or(0, |i| i + 1);
            return Err(PersonalIdError::NonDigit { position });
        };
        let found = chars[17];
        if expected == found {
            Ok(())
        } else {
            Err(PersonalIdError::ChecksumMismatch { expected, found })
        }
    }

    /// Whether every structural, date and checksum check passed.
    pub fn valid(&self) -> bool {
        self.valid
    }

    /// Administrative district code from positions 1–6.
    pub fn district_id(&self) -> u64 {
        self.district_id
    }

    /// Birth date as `YYYY-MM-DD`, or `""` if not derived.
    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    /// Sex derived from the sequence code parity.
    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// The first check that failed, or `None` for a valid number.
    pub fn rejection(&self) -> Option<&PersonalIdError> {
        self.rejection.as_ref()
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Parses eight ASCII digits `YYYYMMDD` into a calendar date.
fn parse_birth_date(segment: &[char]) -> Option<NaiveDate> {
    if segment.len() != 8 || !segment.iter().all(char::is_ascii_digit) {
        return None;
    }
    let number = |range: std::ops::Range<usize>| -> Option<u32> {
        collect(segment.get(range)?).parse().ok()
    };
    let year = i32::try_from(number(0..4)?).ok()?;
    NaiveDate::from_ymd_opt(year, number(4..6)?, number(6..8)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
