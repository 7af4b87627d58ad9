//! Core trait definition for traversal providers.
//!
//! The [`Traverse`] trait defines the interface that the combinator layer
//! requires from whatever owns a cursor. Providers are responsible for the
//! cursor's lifecycle, storage, and any timeouts - the trait only describes
//! how elements are handed out.

use crate::TraverseResult;
use std::{future::Future, pin::pin};
use tokio_stream::{Stream, StreamExt};

/// Sequential traversal provider.
///
/// A provider turns a cursor into an ordered stream of elements and offers two
/// traversal primitives on top of it:
///
/// - [`for_each_async`](Traverse::for_each_async) visits every element.
/// - [`while_async`](Traverse::while_async) visits elements until the visitor
///   asks to stop.
///
/// Both resolve exactly once, after the last visit, with the number of visits
/// performed. Visits never overlap and always follow cursor order.
///
/// # Implementation Guide
///
/// Implementers only need [`open`](Traverse::open). They must ensure:
///
/// - **Ordering**: elements are yielded in cursor order, with no reordering
///   and no duplication.
/// - **One-shot**: a cursor is consumed by `open`. Stopping early drops the
///   stream, which must release whatever the cursor holds.
/// - **Terminal errors**: an `Err` item ends the traversal. Anything yielded
///   after it is never polled.
pub trait Traverse: Send + Sync + 'static {
    /// The cursor handle consumed by a traversal.
    type Cursor: Send + 'static;

    /// The element type produced by a cursor.
    type Item: Send + 'static;

    /// Open a cursor as an ordered stream of elements.
    fn open(&self, cursor: Self::Cursor) -> impl Stream<Item = TraverseResult<Self::Item>> + Send;

    /// Visit every element of the cursor, in order.
    ///
    /// Resolves with the number of elements visited. A present but empty
    /// cursor resolves with `0` without calling `visit`.
    fn for_each_async<F>(
        &self,
        cursor: Self::Cursor,
        mut visit: F,
    ) -> impl Future<Output = TraverseResult<usize>> + Send
    where
        F: FnMut(Self::Item) + Send,
    {
        async move {
            let mut elements = pin!(self.open(cursor));
            let mut visited = 0;
            while let Some(item) = elements.next().await {
                visit(item?);
                visited += 1;
            }
            Ok(visited)
        }
    }

    /// Visit elements in order until `visit` returns `false` or the cursor is
    /// exhausted.
    ///
    /// The element on which `visit` returns `false` counts as visited. The
    /// stream is dropped as soon as the traversal stops, so no further
    /// elements are pulled from the cursor.
    fn while_async<F>(
        &self,
        cursor: Self::Cursor,
        mut visit: F,
    ) -> impl Future<Output = TraverseResult<usize>> + Send
    where
        F: FnMut(Self::Item) -> bool + Send,
    {
        async move {
            let mut elements = pin!(self.open(cursor));
            let mut visited = 0;
            while let Some(item) = elements.next().await {
                let item = item?;
                visited += 1;
                if !visit(item) {
                    break;
                }
            }
            Ok(visited)
        }
    }
}
