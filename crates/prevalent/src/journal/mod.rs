// SPDX-License-Identifier: MIT

//! Journal module: the on-disk representation
//!
//! A journal file is newline-delimited JSON: one snapshot record at the head
//! followed by zero or more command records, in append order.
//!
//! ```text
//! Command → Record → JournalWriter → disk (one file)
//!                                       ↓
//!                          JournalReader → replay → state
//! ```
//!
//! Durability is governed by [`FlushPolicy`](crate::config::FlushPolicy);
//! every record carries a CRC32 checksum so bit flips and torn writes are
//! detected on read.

pub mod reader;
pub mod record;
pub mod writer;

pub use reader::{JournalReadError, JournalReader, RecordIter};
pub use record::Record;
pub use writer::{JournalError, JournalWriter};
