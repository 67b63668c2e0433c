/// Input gathering: positional values plus an optional newline-separated file.
///
/// This module is the single entry point for all input I/O in the `idrule`
/// binary. `idrule-core` never touches the filesystem; all reading happens
/// here.
///
/// Key behaviours:
/// - Disk files: size checked via `std::fs::metadata` before any read.
/// - Stdin: buffered with a `Read::take` cap so allocation is bounded.
/// - UTF-8 validation via `std::str::from_utf8` with byte-offset reporting.
/// - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::{ErrorKind, Read as _};
use std::path::Path;

use crate::cli::{Inputs, PathOrStdin};
use crate::error::CliError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Collects the values to process: positional arguments first, then the
/// non-blank lines of `--file` (trimmed), in order.
///
/// # Errors
///
/// Returns any error from [`read_input`], or [`CliError::NoInput`] when no
/// values remain.
pub fn collect_values(inputs: &Inputs, max_size: u64) -> Result<Vec<String>, CliError> {
    let mut values = inputs.values.clone();
    if let Some(source) = &inputs.file {
        let content = read_input(source, max_size)?;
        values.extend(split_lines(&content));
    }
    if values.is_empty() {
        return Err(CliError::NoInput);
    }
    Ok(values)
}

/// Reads the entire contents of `source` into a `String`.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for:
/// - file not found
/// - permission denied
/// - file or stdin stream exceeds `max_size`
/// - any other I/O error
/// - invalid UTF-8 (includes byte offset of the first bad sequence)
pub fn read_input(source: &PathOrStdin, max_size: u64) -> Result<String, CliError> {
    match source {
        PathOrStdin::Path(path) => read_file(path, max_size),
        PathOrStdin::Stdin => read_stdin(max_size),
    }
}

/// Splits file content into trimmed, non-blank lines.
fn split_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
}

// ---------------------------------------------------------------------------
// Disk file reading
// ---------------------------------------------------------------------------

/// Reads a disk file, enforcing the size limit and UTF-8 requirement.
fn read_file(path: &Path, max_size: u64) -> Result<String, CliError> {
    let file_size = std::fs::metadata(path)
        .map_err(|e| io_error_to_cli(&e, path))?
        .len();

    if file_size > max_size {
        return Err(CliError::FileTooLarge {
            source: path.display().to_string(),
            limit: max_size,
            actual: Some(file_size),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
    bytes_to_string(&bytes, &path.display().to_string())
}

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    let kind = e.kind();
    if kind == ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if kind == ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Stdin reading
// ---------------------------------------------------------------------------

/// Reads the entire stdin stream, capped at `max_size` bytes.
///
/// If the stream produces exactly `max_size` bytes one more byte is read to
/// distinguish "exactly at the limit" from "over the limit".
fn read_stdin(max_size: u64) -> Result<String, CliError> {
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();

    let mut buf: Vec<u8> = Vec::new();
    (&mut handle)
        .take(max_size)
        .read_to_end(&mut buf)
        .map_err(|e| CliError::StdinReadError {
            detail: e.to_string(),
        })?;

    if buf.len() as u64 == max_size {
        let mut probe = [0u8; 1];
        let extra = handle
            .read(&mut probe)
            .map_err(|e| CliError::StdinReadError {
                detail: e.to_string(),
            })?;
        if extra > 0 {
            return Err(CliError::FileTooLarge {
                source: "-".to_owned(),
                limit: max_size,
                actual: None,
            });
        }
    }

    bytes_to_string(&buf, "-")
}

// ---------------------------------------------------------------------------
// UTF-8 conversion
// ---------------------------------------------------------------------------

/// Converts a byte buffer to a `String`, returning a [`CliError`] with the
/// byte offset of the first invalid sequence on failure.
fn bytes_to_string(bytes: &[u8], source_label: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            source: source_label.to_owned(),
            byte_offset: e.valid_up_to(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
