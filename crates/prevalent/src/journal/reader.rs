// SPDX-License-Identifier: MIT

//! Journal reader for sequential record iteration
//!
//! Decode is strictly sequential: a clean end-of-stream while expecting the
//! next record terminates the sequence normally. Any other failure (a
//! malformed line, a torn final write, a checksum mismatch) is surfaced as
//! an error and is fatal to the load.

use super::record::Record;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading journal records
#[derive(Debug, Error)]
pub enum JournalReadError {
    #[error("corrupted record at line {line}: {reason}")]
    Corrupted { line: u64, reason: String },
    #[error("checksum mismatch at line {line}")]
    ChecksumMismatch { line: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Sequential reader over a journal file
pub struct JournalReader {
    path: PathBuf,
}

impl JournalReader {
    /// Create a reader; a non-existent file reads as empty.
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Iterate over records in file order.
    pub fn records(&self) -> Result<RecordIter, JournalReadError> {
        RecordIter::new(&self.path)
    }

    /// Count records, stopping at the first invalid one.
    pub fn count(&self) -> Result<u64, JournalReadError> {
        let mut count = 0;
        for record in self.records()? {
            record?;
            count += 1;
        }
        Ok(count)
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Iterator over journal records with checksum verification
pub struct RecordIter {
    reader: Option<BufReader<File>>,
    line_number: u64,
}

impl RecordIter {
    fn new(path: &Path) -> Result<Self, JournalReadError> {
        let reader = if path.exists() {
            Some(BufReader::new(File::open(path)?))
        } else {
            None
        };

        Ok(Self {
            reader,
            line_number: 0,
        })
    }
}

impl Iterator for RecordIter {
    type Item = Result<Record, JournalReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => return None, // clean end-of-data
                Ok(_) => {
                    self.line_number += 1;

                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    // A final line without a terminator is a torn write and
                    // fails to parse below.
                    let record = match Record::from_line(trimmed) {
                        Ok(r) => r,
                        Err(e) => {
                            return Some(Err(JournalReadError::Corrupted {
                                line: self.line_number,
                                reason: e.to_string(),
                            }));
                        }
                    };

                    match record.verify() {
                        Ok(true) => {}
                        Ok(false) => {
                            return Some(Err(JournalReadError::ChecksumMismatch {
                                line: self.line_number,
                            }));
                        }
                        Err(e) => {
                            return Some(Err(JournalReadError::Corrupted {
                                line: self.line_number,
                                reason: e.to_string(),
                            }));
                        }
                    }

                    return Some(Ok(record));
                }
                Err(e) => return Some(Err(JournalReadError::Io(e))),
            }
        }
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
