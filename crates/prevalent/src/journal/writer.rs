// SPDX-License-Identifier: MIT

//! Journal writer for durable append operations
//!
//! The writer owns the append stream opened at end-of-file during load.
//! With [`FlushPolicy::EveryTransaction`] every append is fsync'd before
//! returning; with [`FlushPolicy::Buffered`] durability is deferred to the
//! OS until [`sync`](JournalWriter::sync) is called.

use super::record::Record;
use crate::config::FlushPolicy;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when writing journal records
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only writer over the journal file
#[derive(Debug)]
pub struct JournalWriter {
    path: PathBuf,
    file: File,
    flush: FlushPolicy,
    bytes_written: u64,
}

impl JournalWriter {
    /// Open the journal for appending, positioned at end-of-file.
    ///
    /// Creates the file (and parent directories) if missing.
    pub fn open(path: &Path, flush: FlushPolicy) -> Result<Self, JournalError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            flush,
            bytes_written: 0,
        })
    }

    /// Append one record to the journal.
    ///
    /// On success the record is on the stream; whether it has reached disk
    /// depends on the flush policy. On failure nothing is guaranteed to have
    /// been written and the caller must not apply the command.
    pub fn append(&mut self, record: &Record) -> Result<(), JournalError> {
        let line = record.to_line()?;

        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;

        if self.flush == FlushPolicy::EveryTransaction {
            self.file.sync_all()?;
        }

        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    /// Force sync to disk.
    ///
    /// A no-op in effect under `EveryTransaction`; under `Buffered` this is
    /// the only durability point.
    pub fn sync(&mut self) -> Result<(), JournalError> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Bytes written since open.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Path to the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
