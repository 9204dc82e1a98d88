//! Stdin-based trace source for piped input.
//!
//! `cat swipe.jsonl | pageswipe` replays a trace without a file argument.

use crate::model::error::InputError;
use std::io::{BufRead, BufReader, IsTerminal, Read};

/// Piped trace input, read to EOF on demand.
pub struct StdinSource<R: Read> {
    reader: BufReader<R>,
    complete: bool,
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource")
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

impl StdinSource<std::io::Stdin> {
    /// Wrap the process's stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY, so the replay does
    /// not sit waiting for someone to type a trace.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }
}

impl<R: Read> StdinSource<R> {
    /// Build from any reader, bypassing the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            complete: false,
        }
    }

    /// Read every remaining line until EOF.
    ///
    /// A final line without a trailing newline is still returned.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn read_to_end(&mut self) -> Result<Vec<String>, InputError> {
        let mut lines = Vec::new();
        if self.complete {
            return Ok(lines);
        }

        let mut buffer = String::new();
        loop {
            buffer.clear();
            if self.reader.read_line(&mut buffer)? == 0 {
                break;
            }
            let line = buffer.strip_suffix('\n').unwrap_or(&buffer);
            let line = line.strip_suffix('\r').unwrap_or(line);
            lines.push(line.to_string());
        }

        self.complete = true;
        Ok(lines)
    }

    /// True once EOF has been reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lines_and_strips_line_endings() {
        let data = b"one\r\ntwo\nthree";
        let mut source = StdinSource::from_reader(&data[..]);

        assert!(!source.is_complete());
        assert_eq!(source.read_to_end().unwrap(), vec!["one", "two", "three"]);
        assert!(source.is_complete());
    }

    #[test]
    fn second_read_after_eof_is_empty() {
        let mut source = StdinSource::from_reader(&b"only\n"[..]);
        assert_eq!(source.read_to_end().unwrap().len(), 1);
        assert!(source.read_to_end().unwrap().is_empty());
    }

    #[test]
    fn empty_input_yields_no_lines() {
        let mut source = StdinSource::from_reader(&b""[..]);
        assert!(source.read_to_end().unwrap().is_empty());
        assert!(source.is_complete());
    }
}
