// SPDX-License-Identifier: MIT

//! Tag-to-constructor registry for command decoding
//!
//! The journal stores commands as a variant tag plus a JSON payload. The
//! registry maps each tag back to its concrete command type so replay can
//! reconstruct and apply journaled commands. It must hold every variant the
//! journal may contain before any decode is attempted; dispatching an
//! unregistered tag is a fatal decode error.

use crate::command::{Command, CommandError};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors from dispatching a journaled command through the registry
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown command tag: {tag}")]
    UnknownTag { tag: String },
    #[error("command payload decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("command apply failed: {0}")]
    Apply(CommandError),
}

type DispatchFn<S> = Box<dyn Fn(Value, &mut S) -> Result<(), DispatchError> + Send + Sync>;

/// Maps command tags to decode-and-apply closures.
///
/// One [`register`](Self::register) call per command variant, before load:
///
/// ```ignore
/// let registry = CommandRegistry::new()
///     .register::<Deposit>()
///     .register::<Withdraw>();
/// ```
pub struct CommandRegistry<S> {
    handlers: HashMap<&'static str, DispatchFn<S>>,
}

impl<S> CommandRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a command variant under its [`Command::TAG`].
    ///
    /// Registering the same tag twice replaces the earlier handler.
    pub fn register<C: Command<S>>(mut self) -> Self {
        self.handlers.insert(
            C::TAG,
            Box::new(|data, state| {
                let command: C = serde_json::from_value(data)?;
                command.apply(state).map_err(DispatchError::Apply)
            }),
        );
        self
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Decode the payload for `tag` and apply it to `state`.
    pub(crate) fn dispatch(
        &self,
        tag: &str,
        data: Value,
        state: &mut S,
    ) -> Result<(), DispatchError> {
        let handler = self
            .handlers
            .get(tag)
            .ok_or_else(|| DispatchError::UnknownTag {
                tag: tag.to_string(),
            })?;
        handler(data, state)
    }
}

impl<S> Default for CommandRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
