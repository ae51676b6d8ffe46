// SPDX-License-Identifier: MIT

//! Engine configuration

/// When journal appends are flushed to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// `fsync` after every append. A transaction is durable before its
    /// apply step runs and before the call returns.
    #[default]
    EveryTransaction,
    /// Leave flushing to the OS. Appends survive a process crash but not a
    /// host crash until [`Engine::flush`](crate::engine::Engine::flush) is
    /// called. Higher throughput, weaker durability.
    Buffered,
}

/// How command apply errors are handled during replay at load time.
///
/// Live `transact` always surfaces apply errors to the caller. The original
/// prevalent pattern silently discards apply errors during replay instead;
/// `Ignore` preserves that behavior, `Fail` unifies the two paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayPolicy {
    /// Log and skip entries whose apply step fails; replay continues.
    #[default]
    Ignore,
    /// Abort the load on the first apply failure.
    Fail,
}

/// Configuration for [`Engine::load_with`](crate::engine::Engine::load_with).
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub flush: FlushPolicy,
    pub replay_errors: ReplayPolicy,
}

impl EngineConfig {
    pub fn with_flush(mut self, flush: FlushPolicy) -> Self {
        self.flush = flush;
        self
    }

    pub fn with_replay_errors(mut self, policy: ReplayPolicy) -> Self {
        self.replay_errors = policy;
        self
    }
}
