/// Command module for the `idrule` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the collected values and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod org;
pub mod person;
pub mod redact;
pub mod verify;

use crate::error::CliError;

/// Maps a failed write on `stream` to [`CliError::IoError`].
pub(crate) fn write_failed(stream: &str) -> impl Fn(std::io::Error) -> CliError + '_ {
    move |e| CliError::IoError {
        source: stream.to_owned(),
        detail: e.to_string(),
    }
}
