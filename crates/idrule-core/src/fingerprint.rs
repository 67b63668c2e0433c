/// 128-bit content fingerprints for redacted values.
///
/// A [`Fingerprint`] is the MD5 digest of the exact UTF-8 bytes of the
/// original value. It travels alongside a masked display string so that a
/// holder of the original can later prove equality without the masked form
/// revealing it. The digest is rendered as 32 lowercase hex characters.
use std::fmt;
use std::str::FromStr;

use md5::{Digest, Md5};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Length of a fingerprint in bytes.
pub const FINGERPRINT_LEN: usize = 16;

/// Errors produced when parsing a fingerprint from its hex form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    /// The string is not exactly 32 characters long.
    WrongLength {
        /// Number of bytes in the input.
        got: usize,
    },
    /// A character is not a hex digit.
    InvalidHex {
        /// 0-indexed byte offset of the offending character.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
}

impl fmt::Display for FingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { got } => write!(
                f,
                "invalid fingerprint: expected {} hex chars, got {got}",
                FINGERPRINT_LEN * 2
            ),
            Self::InvalidHex { offset, byte } => write!(
                f,
                "invalid fingerprint: byte 0x{byte:02x} at offset {offset} is not a hex digit"
            ),
        }
    }
}

impl std::error::Error for FingerprintError {}

/// MD5 digest of an original, unredacted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Fingerprints the UTF-8 bytes of `value`.
    ///
    /// ```
    /// use idrule_core::Fingerprint;
    ///
    /// assert_eq!(
    ///     Fingerprint::of("13800138000").to_string(),
    ///     "7945bd83237335e5376ff44d62e4f0ae"
    /// );
    /// ```
    pub fn of(value: &str) -> Self {
        let digest = Md5::digest(value.as_bytes());
        let mut out = [0u8; FINGERPRINT_LEN];
        out.copy_from_slice(&digest);
        Self(out)
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Returns `true` if `value` has this fingerprint.
    pub fn matches(&self, value: &str) -> bool {
        Self::of(value) == *self
    }

    /// Encodes the digest as 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

/// Encodes a byte slice as a lowercase hexadecimal string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_CHARS[(b >> 4) as usize] as char);
        out.push(HEX_CHARS[(b & 0x0f) as usize] as char);
    }
    out
}

/// Returns the numeric value of a single hex ASCII byte of either case.
fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    /// Parses 32 hex characters; upper-case digits are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != FINGERPRINT_LEN * 2 {
            return Err(FingerprintError::WrongLength { got: bytes.len() });
        }
        let nibble = |offset: usize| {
            let byte = bytes[offset];
            hex_nibble(byte).ok_or(FingerprintError::InvalidHex { offset, byte })
        };
        let mut out = [0u8; FINGERPRINT_LEN];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (nibble(2 * i)? << 4) | nibble(2 * i + 1)?;
        }
        Ok(Self(out))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(de::Error::custom)
    }
}
