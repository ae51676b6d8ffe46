// SPDX-License-Identifier: MIT

//! prevalent: in-memory state with command journaling and crash recovery
//!
//! An implementation of the prevalent system pattern: the application's
//! entire state stays resident in memory (the "prevalent hypothesis": the
//! working set fits in RAM), and durability comes from journaling every
//! mutation as a deterministic, replayable command rather than persisting
//! objects individually.
//!
//! This crate provides:
//! - A tagged JSON codec and [`CommandRegistry`] for an open command set
//! - A single-file journal (snapshot head + appended command records) with
//!   per-record checksums and atomic snapshot compaction at load time
//! - A recovery replayer that folds journaled commands into state
//! - Serialized transactions and lock-free-of-journal read-only queries
//!
//! ## Example
//!
//! ```
//! use prevalent::{Command, CommandError, CommandRegistry, Engine};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Counter {
//!     value: i64,
//! }
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Increment {
//!     by: i64,
//! }
//!
//! impl Command<Counter> for Increment {
//!     const TAG: &'static str = "increment";
//!
//!     fn apply(&self, state: &mut Counter) -> Result<(), CommandError> {
//!         state.value += self.by;
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("counter.journal");
//! let registry = CommandRegistry::new().register::<Increment>();
//!
//! let engine = Engine::load(&path, Counter::default(), &registry)?;
//! engine.transact(Increment { by: 2 })?;
//! engine.transact(Increment { by: 3 })?;
//! assert_eq!(engine.query_fn(|c| c.value), 5);
//! # Ok(())
//! # }
//! ```
//!
//! Commands must be deterministic: they are replayed verbatim on every
//! load, so side effects (emails, charges, clock reads) do not belong in
//! `apply`. The engine documents this contract; it cannot enforce it.

pub mod command;
pub mod config;
pub mod engine;
pub mod journal;
pub mod registry;
pub mod replay;

pub use command::{Command, CommandError, Query};
pub use config::{EngineConfig, FlushPolicy, ReplayPolicy};
pub use engine::{Engine, EngineError};
pub use journal::{JournalError, JournalReadError, JournalReader, JournalWriter, Record};
pub use registry::{CommandRegistry, DispatchError};
pub use replay::ReplayError;
