//! Pure check-character computation for the two 18-character identifier
//! formats.
//!
//! Both algorithms are weighted modular checksums over the first 17
//! characters, driven by fixed tables that live in `const`/`static` data and
//! are never rebuilt per call. No function here allocates.
//!
//! # References
//!
//! - ISO 7064 MOD 11-2 for the resident identity number (GB 11643).
//! - MOD 31-3 for the unified social credit code (GB 32100).

// ---------------------------------------------------------------------------
// Resident identity number tables
// ---------------------------------------------------------------------------

/// Weight applied to each of the 17 body positions (`2^(17 - i) mod 11`).
pub const PERSONAL_WEIGHTS: [u32; 17] = [7, 9, 10, 5, 8, 4, 2, 1, 6, 3, 7, 9, 10, 5, 8, 4, 2];

/// Check character indexed by `weighted_sum mod 11`.
pub const PERSONAL_CHECK_CHARS: [u8; 11] = *b"10X98765432";

// ---------------------------------------------------------------------------
// Unified social credit code tables
// ---------------------------------------------------------------------------

/// The 31 code symbols in value order: `0-9`, then `A-Y` without
/// `I`, `O`, `S`, `V` and `Z`. Indexing by value yields the symbol.
pub const ORG_CHARSET: [u8; 31] = *b"0123456789ABCDEFGHJKLMNPQRTUWXY";

/// Weight applied to each of the 17 body positions (`3^i mod 31`).
pub const ORG_WEIGHTS: [u32; 17] = [
    1, 3, 9, 27, 19, 26, 16, 17, 20, 29, 25, 13, 8, 24, 10, 30, 28,
];

/// Marker for ASCII bytes that are not code symbols.
const UNASSIGNED: u8 = u8::MAX;

/// Inverse of [`ORG_CHARSET`]: ASCII byte to symbol value.
static ORG_VALUES: [u8; 128] = build_org_values();

const fn build_org_values() -> [u8; 128] {
    let mut table = [UNASSIGNED; 128];
    let mut i = 0;
    while i < ORG_CHARSET.len() {
        table[ORG_CHARSET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the value (0–30) of a unified social credit code symbol, or
/// `None` if `byte` is not one of the 31 upper-case symbols.
///
/// ```
/// use idrule_core::check_digits::org_char_value;
///
/// assert_eq!(org_char_value(b'7'), Some(7));
/// assert_eq!(org_char_value(b'J'), Some(18));
/// assert_eq!(org_char_value(b'I'), None);
/// assert_eq!(org_char_value(b'a'), None);
/// ```
pub fn org_char_value(byte: u8) -> Option<u8> {
    match ORG_VALUES.get(usize::from(byte)) {
        Some(&v) if v != UNASSIGNED => Some(v),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// MOD 11-2
// ---------------------------------------------------------------------------

/// Computes the check character for a 17-digit resident identity body.
///
/// Returns `None` when `body` is not exactly 17 ASCII digits. The result is
/// one of `0`–`9` or upper-case `X`.
///
/// # Algorithm
///
/// `sum = Σ digit[i] * PERSONAL_WEIGHTS[i]` over the 17 body digits; the
/// check character is `PERSONAL_CHECK_CHARS[sum mod 11]`.
///
/// ```
/// use idrule_core::check_digits::gb11643_check_char;
///
/// assert_eq!(gb11643_check_char("11010519491231002"), Some('X'));
/// assert_eq!(gb11643_check_char("1101051949123100"), None);
/// ```
pub fn gb11643_check_char(body: &str) -> Option<char> {
    let bytes = body.as_bytes();
    if bytes.len() != PERSONAL_WEIGHTS.len() {
        return None;
    }

    let mut sum: u32 = 0;
    for (byte, weight) in bytes.iter().zip(PERSONAL_WEIGHTS) {
        if !byte.is_ascii_digit() {
            return None;
        }
        sum += u32::from(byte - b'0') * weight;
    }

    PERSONAL_CHECK_CHARS
        .get((sum % 11) as usize)
        .map(|&c| char::from(c))
}

/// Verifies the check character of a full 18-character resident identity
/// number. The comparison is case-sensitive: a trailing lower-case `x` fails.
///
/// ```
/// use idrule_core::check_digits::gb11643;
///
/// assert!(gb11643("11010519491231002X"));
/// assert!(!gb11643("11010519491231002x"));
/// assert!(!gb11643("110101199003077456"));
/// ```
pub fn gb11643(id: &str) -> bool {
    let Some(body) = id.get(..17) else {
        return false;
    };
    let Some(found) = id.get(17..) else {
        return false;
    };
    match gb11643_check_char(body) {
        Some(expected) => found.len() == 1 && found.starts_with(expected),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// MOD 31-3
// ---------------------------------------------------------------------------

/// Computes the check character for a 17-symbol unified social credit body.
///
/// The body must already be upper-case. Returns `None` when `body` is not
/// exactly 17 bytes or contains a byte outside [`ORG_CHARSET`].
///
/// # Algorithm
///
/// `sum = Σ value[i] * ORG_WEIGHTS[i]`; the check value is
/// `(31 - sum mod 31) mod 31`, mapped back through [`ORG_CHARSET`]. A zero
/// remainder therefore yields `'0'`, never an out-of-range 31.
///
/// ```
/// use idrule_core::check_digits::gb32100_check_char;
///
/// assert_eq!(gb32100_check_char("91110000600037341"), Some('L'));
/// assert_eq!(gb32100_check_char("9111000060003734I"), None);
/// ```
pub fn gb32100_check_char(body: &str) -> Option<char> {
    let bytes = body.as_bytes();
    if bytes.len() != ORG_WEIGHTS.len() {
        return None;
    }

    let mut sum: u32 = 0;
    for (&byte, weight) in bytes.iter().zip(ORG_WEIGHTS) {
        sum += u32::from(org_char_value(byte)?) * weight;
    }

    let check_value = (31 - sum % 31) % 31;
    ORG_CHARSET
        .get(check_value as usize)
        .map(|&c| char::from(c))
}

/// Verifies the check character of a full 18-character, upper-case unified
/// social credit code.
///
/// ```
/// use idrule_core::check_digits::gb32100;
///
/// assert!(gb32100("91310000MA1FL1MMXL"));
/// assert!(!gb32100("91310000MA1FL1MMXM"));
/// ```
pub fn gb32100(code: &str) -> bool {
    let (Some(body), Some(found)) = (code.get(..17), code.get(17..)) else {
        return false;
    };
    match gb32100_check_char(body) {
        Some(expected) => found.len() == 1 && found.starts_with(expected),
        None => false,
    }
}
