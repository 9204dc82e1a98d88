//! File-based trace source.

use crate::model::error::InputError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A trace file, read once in full.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    lines: Vec<String>,
}

impl FileSource {
    /// Open and read `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    /// Returns `InputError::Io` for other I/O errors.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Path the lines were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hand over the lines read at construction. Later calls return nothing.
    pub fn drain_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_all_lines_including_unterminated_last_line() {
        let test_file = std::env::temp_dir().join("pageswipe_file_source_lines.jsonl");
        fs::write(&test_file, "first\nsecond\nthird").unwrap();

        let mut source = FileSource::new(&test_file).unwrap();
        let _ = fs::remove_file(&test_file);

        assert_eq!(source.drain_lines(), vec!["first", "second", "third"]);
        assert!(source.drain_lines().is_empty());
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let missing = std::env::temp_dir().join("pageswipe_missing_trace_98765.jsonl");
        match FileSource::new(&missing) {
            Err(InputError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }
}
