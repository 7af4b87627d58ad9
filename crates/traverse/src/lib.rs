//! Sequential cursor traversal for the combinator layer.
//!
//! A cursor is an opaque, one-shot handle to an ordered sequence of
//! elements. This crate defines the contract every cursor owner must
//! satisfy, and ships the providers used by tests and simple deployments.
//!
//! # Architecture
//!
//! - [`Traverse`] is the provider interface. Implementors expose a cursor as
//!   an ordered [`Stream`](futures::Stream) and get the two traversal
//!   primitives, [`Traverse::for_each_async`] and [`Traverse::while_async`],
//!   for free.
//! - [`ChannelTraversal`] serves cursors fed by a producer over a bounded
//!   channel, with cancellation and an optional deadline.
//! - [`mem::MemTraversal`] serves cursors held in memory.
//!
//! # Example
//!
//! ```ignore
//! use cursor_traverse::{Traverse, mem::{MemCursor, MemTraversal}};
//!
//! let provider = MemTraversal::new();
//! let mut seen = Vec::new();
//! let visited = provider
//!     .while_async(MemCursor::from(vec![1, 2, 3]), |x| {
//!         seen.push(x);
//!         x < 2
//!     })
//!     .await?;
//! assert_eq!(visited, 2);
//! ```
//!
//! # Feature Flags
//!
//! - **`in-memory`**: enables [`mem`].
//! - **`test-utils`**: enables [`conformance`] (implies `in-memory`).

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{TraverseError, TraverseResult};

/// Configuration for channel-backed traversal.
pub mod config;
pub use config::{ConfigError, TraverseConfig};

mod channel;
pub use channel::{ChannelCursor, ChannelTraversal, CursorSender, cursor_channel};

mod traits;
pub use traits::Traverse;

/// Conformance tests for traversal providers.
#[cfg(any(test, feature = "test-utils"))]
pub mod conformance;

#[cfg(any(test, feature = "in-memory"))]
pub mod mem;
