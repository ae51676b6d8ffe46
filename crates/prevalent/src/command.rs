// SPDX-License-Identifier: MIT

//! Command and query traits for prevalent state
//!
//! Commands are the only way to mutate state and are journaled before they
//! are applied. Queries are read-only projections and are never journaled.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error reported by a command's apply step.
///
/// The engine does not interpret apply errors; it journals the command first
/// and surfaces whatever the command reports.
pub type CommandError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A deterministic, serializable state mutation.
///
/// Commands are appended to the journal before they are applied, and are
/// replayed from the journal on every load. They must therefore be
/// deterministic: the same command applied to the same state must always
/// produce the same effect. Do not perform side effects (network calls,
/// clock reads, random draws) inside `apply`; they will happen again on
/// every recovery. This contract is documented, not enforced.
pub trait Command<S>: Serialize + DeserializeOwned + Send + 'static {
    /// Variant identifier persisted with every journaled instance.
    ///
    /// Tags must be unique within a [`CommandRegistry`] and stable across
    /// releases: changing a tag orphans existing journal entries.
    ///
    /// [`CommandRegistry`]: crate::registry::CommandRegistry
    const TAG: &'static str;

    /// Apply this command to the state.
    fn apply(&self, state: &mut S) -> Result<(), CommandError>;
}

/// A read-only projection over prevalent state.
///
/// Queries never touch the journal and never mutate state.
pub trait Query<S> {
    /// The projected value.
    type Output;

    /// Compute the projection against the current state.
    fn query(&self, state: &S) -> Self::Output;
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
