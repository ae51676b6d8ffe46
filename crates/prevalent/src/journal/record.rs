// SPDX-License-Identifier: MIT

//! Persisted record structure with checksum verification
//!
//! A journal file holds exactly one snapshot record at the head, followed by
//! one command record per journaled transaction. Each record carries a CRC32
//! checksum of its payload for integrity verification.

use super::writer::JournalError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single record in the journal file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    /// Full serialized copy of the system state, written at the file head.
    Snapshot {
        state: Value,
        /// CRC32 of the serialized state
        checksum: u32,
    },
    /// One serialized command, appended after the snapshot in file order.
    Command {
        /// Variant identifier used to look up the concrete type on decode
        tag: String,
        data: Value,
        /// CRC32 of the serialized payload
        checksum: u32,
    },
}

impl Record {
    /// Create a snapshot record for the given state.
    pub fn snapshot<S: Serialize>(state: &S) -> Result<Self, JournalError> {
        let state = serde_json::to_value(state)?;
        let checksum = checksum_of(&state)?;
        Ok(Self::Snapshot { state, checksum })
    }

    /// Create a command record from a tag and serialized payload.
    pub fn command(tag: &str, data: Value) -> Result<Self, JournalError> {
        let checksum = checksum_of(&data)?;
        Ok(Self::Command {
            tag: tag.to_string(),
            data,
            checksum,
        })
    }

    /// Verify the checksum matches the payload.
    pub fn verify(&self) -> Result<bool, JournalError> {
        let (payload, stored) = match self {
            Self::Snapshot { state, checksum } => (state, *checksum),
            Self::Command { data, checksum, .. } => (data, *checksum),
        };
        Ok(checksum_of(payload)? == stored)
    }

    /// Serialize to newline-delimited JSON (one line).
    pub fn to_line(&self) -> Result<String, JournalError> {
        serde_json::to_string(self).map_err(JournalError::from)
    }

    /// Parse from a single line of JSON.
    pub fn from_line(line: &str) -> Result<Self, JournalError> {
        serde_json::from_str(line).map_err(JournalError::from)
    }
}

/// CRC32 of the payload's compact JSON encoding.
///
/// `serde_json` writes object keys in sorted order for `Value`, so the
/// encoding is deterministic and the checksum is stable across round trips.
fn checksum_of(payload: &Value) -> Result<u32, JournalError> {
    let json = serde_json::to_string(payload)?;
    Ok(crc32fast::hash(json.as_bytes()))
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
