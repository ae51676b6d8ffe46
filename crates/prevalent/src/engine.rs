// SPDX-License-Identifier: MIT

//! Prevalent engine: load, transact, query
//!
//! The engine owns one state value, one open append stream, and one
//! transaction lock. Load reconstructs state from disk, compacts the file to
//! a single fresh snapshot via an atomic rename, and opens the append stream
//! used by every subsequent transaction.

use crate::command::{Command, CommandError, Query};
use crate::config::EngineConfig;
use crate::journal::{JournalError, JournalReadError, JournalReader, JournalWriter, Record};
use crate::registry::CommandRegistry;
use crate::replay::{self, ReplayError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};
use thiserror::Error;

/// Errors from engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("journal write error: {0}")]
    Journal(#[from] JournalError),
    #[error("journal read error: {0}")]
    Read(#[from] JournalReadError),
    #[error("replay error: {0}")]
    Replay(#[from] ReplayError),
    #[error("journal does not begin with a snapshot record")]
    MissingSnapshot,
    #[error("command apply failed: {0}")]
    Apply(CommandError),
}

/// A prevalent system: in-memory state with a durable command journal.
///
/// At most one live engine should exist per journal file; no cross-process
/// file locking is provided.
#[derive(Debug)]
pub struct Engine<S> {
    state: RwLock<S>,
    writer: Mutex<JournalWriter>,
}

impl<S> Engine<S>
where
    S: Serialize + DeserializeOwned,
{
    /// Load with the default configuration. See [`load_with`](Self::load_with).
    pub fn load(
        path: impl AsRef<Path>,
        initial: S,
        registry: &CommandRegistry<S>,
    ) -> Result<Self, EngineError> {
        Self::load_with(path, initial, registry, EngineConfig::default())
    }

    /// Restore state from disk and return a live engine handle.
    ///
    /// The journal at `path` is decoded (snapshot, then each journaled
    /// command in file order) on top of `initial`; an absent or empty file
    /// means `initial` is used unchanged. The post-replay state is then
    /// written as a fresh snapshot to a staging file and atomically renamed
    /// over `path`, so the journal always holds exactly one snapshot and
    /// zero entries immediately after a successful load.
    ///
    /// If only the staging file exists, a previous load crashed between
    /// writing it and the rename; it is complete and is used as the source.
    /// A crash can therefore never leave a torn primary file behind.
    ///
    /// `registry` must already contain every command variant the journal may
    /// hold. Any I/O or decode failure (other than clean end-of-data) aborts
    /// the load; no partial handle is returned.
    pub fn load_with(
        path: impl AsRef<Path>,
        initial: S,
        registry: &CommandRegistry<S>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let staging = staging_path(path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let source = if path.exists() {
            path
        } else {
            staging.as_path()
        };

        let reader = JournalReader::open(source);
        let mut records = reader.records()?;

        let mut state = match records.next() {
            None => initial,
            Some(Ok(Record::Snapshot { state, .. })) => serde_json::from_value(state)?,
            Some(Ok(Record::Command { .. })) => return Err(EngineError::MissingSnapshot),
            Some(Err(e)) => return Err(e.into()),
        };

        let replayed = replay::replay(records, registry, &mut state, config.replay_errors)?;

        // Compaction: fold snapshot plus replayed entries into one fresh
        // snapshot, staged then atomically swapped into place.
        let snapshot = Record::snapshot(&state)?;
        {
            let mut file = File::create(&staging)?;
            file.write_all(snapshot.to_line()?.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&staging, path)?;

        let writer = JournalWriter::open(path, config.flush)?;

        tracing::info!(path = %path.display(), replayed, "state loaded and compacted");

        Ok(Self {
            state: RwLock::new(state),
            writer: Mutex::new(writer),
        })
    }
}

impl<S> Engine<S> {
    /// Journal the given command, then apply it to the in-memory state.
    ///
    /// Transactions on a handle are strictly serialized: the journal lock is
    /// held across the whole append-then-apply sequence, so the order
    /// commands reach memory matches the order they reach the journal.
    ///
    /// If the append fails the state is left untouched and the command is
    /// not applied. If the append succeeds, the command's own apply error
    /// (if any) is returned to the caller, but the command is already
    /// durably recorded and will be replayed on the next load.
    pub fn transact<C: Command<S>>(&self, command: C) -> Result<(), EngineError> {
        let record = Record::command(C::TAG, serde_json::to_value(&command)?)?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.append(&record)?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        command.apply(&mut state).map_err(EngineError::Apply)
    }

    /// Execute a read-only query against the current state.
    ///
    /// Never journaled. Queries take a shared read lock: they block only
    /// while a transaction's apply step holds the write lock, and they may
    /// observe state that does not yet include a concurrently journaled
    /// command. This is the documented weak read isolation.
    pub fn query<Q: Query<S>>(&self, query: Q) -> Q::Output {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        query.query(&state)
    }

    /// Execute a read-only closure against the current state.
    ///
    /// Same isolation as [`query`](Self::query).
    pub fn query_fn<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Force buffered journal appends to disk.
    ///
    /// Only meaningful under [`FlushPolicy::Buffered`](crate::FlushPolicy);
    /// with the default policy every transaction is already synced.
    pub fn flush(&self) -> Result<(), EngineError> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.sync()?;
        Ok(())
    }
}

/// Staging file used for snapshot compaction: `<path>.tmp`.
fn staging_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
