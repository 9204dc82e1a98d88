//! Trace input sources.
//!
//! - File loading for a trace passed on the command line
//! - Stdin for piped traces
//! - [`InputSource`] unifying both

use crate::model::error::InputError;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Where the trace comes from. Exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// Trace file named on the command line.
    File(FileSource),
    /// Trace piped into stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// All raw trace lines, in order.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors while reading stdin.
    pub fn read_lines(&mut self) -> Result<Vec<String>, InputError> {
        match self {
            InputSource::File(f) => Ok(f.drain_lines()),
            InputSource::Stdin(s) => s.read_to_end(),
        }
    }
}

/// Pick the input source.
///
/// 1. If a file path is provided: read that file
/// 2. Else if stdin is piped: read stdin
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is a TTY.
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for I/O errors during file reading.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
