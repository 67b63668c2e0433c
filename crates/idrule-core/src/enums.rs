/// Closed vocabularies shared by the identifier types.
///
/// Each enum serializes to/from `snake_case` JSON strings.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sex classification carried by a resident identity number.
///
/// The numeric codes follow the zero-value-as-default convention:
/// [`Sex::Unknown`] is both `0` and the [`Default`]. The parser only ever
/// produces `Unknown`, `Male` or `Female`; [`Sex::Other`] belongs to the public
/// vocabulary for records whose classification comes from elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Sex {
    /// Not derived, or derivation failed.
    #[default]
    Unknown = 0,
    /// Odd sequence code.
    Male = 1,
    /// Even sequence code.
    Female = 2,
    /// Non-binary classification; never derived from an identifier.
    Other = 255,
}

impl Sex {
    /// Classifies a sequence code by parity: even is female, odd is male.
    pub fn from_sequence(sequence: u32) -> Self {
        if sequence % 2 == 0 {
            Self::Female
        } else {
            Self::Male
        }
    }

    /// Returns the stable numeric code of the variant.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the `snake_case` name used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
