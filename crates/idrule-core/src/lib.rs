#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod check_digits;
pub mod clock;
pub mod enums;
pub mod fingerprint;
pub mod organization_id;
pub mod personal_id;
pub mod redaction;

pub use check_digits::{gb11643, gb11643_check_char, gb32100, gb32100_check_char};
pub use clock::{Clock, FixedClock, SystemClock};
pub use enums::Sex;
pub use fingerprint::{Fingerprint, FingerprintError};
pub use organization_id::{ORG_ID_LEN, OrganizationId, OrganizationIdError};
pub use personal_id::{PERSONAL_ID_LEN, PersonalId, PersonalIdError};
pub use redaction::{
    PHONE_LEN, RedactError, Redacted, RedactionKind, redact, redact_personal_id, redact_phone,
};

/// Returns the current version of the idrule-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
