// SPDX-License-Identifier: MIT

//! Recovery replayer
//!
//! Folds journaled command records into a running state during load. Decode
//! failures are always fatal; apply failures are handled per
//! [`ReplayPolicy`]. The original prevalent pattern discards them and
//! replays on, which `Ignore` preserves.

use crate::command::CommandError;
use crate::config::ReplayPolicy;
use crate::journal::{JournalReadError, Record};
use crate::registry::{CommandRegistry, DispatchError};
use thiserror::Error;

/// Errors that can occur while replaying the journal
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("journal read error: {0}")]
    Read(#[from] JournalReadError),
    #[error("unexpected snapshot record after journal head")]
    UnexpectedSnapshot,
    #[error("unknown command tag: {tag}")]
    UnknownTag { tag: String },
    #[error("command payload decode failed: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("replayed command apply failed: {0}")]
    Apply(CommandError),
}

/// Apply journaled command records to `state` until end-of-data.
///
/// `records` must be positioned after the snapshot record. Returns the
/// number of commands replayed.
pub(crate) fn replay<S>(
    records: impl Iterator<Item = Result<Record, JournalReadError>>,
    registry: &CommandRegistry<S>,
    state: &mut S,
    policy: ReplayPolicy,
) -> Result<u64, ReplayError> {
    let mut replayed = 0;

    for record in records {
        let (tag, data) = match record? {
            Record::Command { tag, data, .. } => (tag, data),
            Record::Snapshot { .. } => return Err(ReplayError::UnexpectedSnapshot),
        };

        match registry.dispatch(&tag, data, state) {
            Ok(()) => {}
            Err(DispatchError::UnknownTag { tag }) => {
                return Err(ReplayError::UnknownTag { tag });
            }
            Err(DispatchError::Decode(e)) => return Err(ReplayError::Decode(e)),
            Err(DispatchError::Apply(e)) => match policy {
                ReplayPolicy::Ignore => {
                    tracing::warn!(tag = %tag, error = %e, "discarding apply error during replay");
                }
                ReplayPolicy::Fail => return Err(ReplayError::Apply(e)),
            },
        }

        replayed += 1;
    }

    Ok(replayed)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
