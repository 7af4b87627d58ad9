//! In-memory traversal provider for testing.
//!
//! Cursors are plain vectors. The provider counts every element it hands
//! out, which lets tests check that an early-exit traversal really stopped
//! pulling from the cursor.

use crate::{Traverse, TraverseError, TraverseResult};
use core::marker::PhantomData;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use tokio_stream::{Stream, StreamExt};

/// Error injected by [`MemCursor::failing_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("injected failure after {0} elements")]
pub struct InjectedFailure(pub usize);

/// An in-memory cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemCursor<T> {
    items: Vec<T>,
    fail_after: Option<usize>,
}

impl<T> MemCursor<T> {
    /// Create a cursor over `items`.
    pub const fn new(items: Vec<T>) -> Self {
        Self { items, fail_after: None }
    }

    /// Create a cursor that yields the first `n` of `items`, then fails with
    /// an [`InjectedFailure`] backend error.
    pub const fn failing_after(items: Vec<T>, n: usize) -> Self {
        Self { items, fail_after: Some(n) }
    }

    /// Number of elements the cursor would yield before ending or failing.
    pub fn len(&self) -> usize {
        self.fail_after.map_or(self.items.len(), |n| n.min(self.items.len()))
    }

    /// Returns `true` if the cursor yields no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> From<Vec<T>> for MemCursor<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for MemCursor<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// In-memory traversal provider.
///
/// Clones share the pull counter.
pub struct MemTraversal<T> {
    pulled: Arc<AtomicUsize>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemTraversal<T> {
    /// Create a new provider with a zeroed pull counter.
    pub fn new() -> Self {
        Self { pulled: Arc::new(AtomicUsize::new(0)), _marker: PhantomData }
    }

    /// Total number of elements pulled from cursors opened by this provider.
    ///
    /// Injected failures are not counted.
    pub fn pulled(&self) -> usize {
        self.pulled.load(Ordering::Relaxed)
    }
}

impl<T> Default for MemTraversal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MemTraversal<T> {
    fn clone(&self) -> Self {
        Self { pulled: Arc::clone(&self.pulled), _marker: PhantomData }
    }
}

impl<T> std::fmt::Debug for MemTraversal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemTraversal").field("pulled", &self.pulled()).finish()
    }
}

impl<T: Send + 'static> Traverse for MemTraversal<T> {
    type Cursor = MemCursor<T>;
    type Item = T;

    fn open(&self, cursor: Self::Cursor) -> impl Stream<Item = TraverseResult<T>> + Send {
        let pulled = Arc::clone(&self.pulled);
        let MemCursor { items, fail_after } = cursor;
        let failure = fail_after.map(|n| Err(TraverseError::backend(InjectedFailure(n))));

        let elements = items
            .into_iter()
            .take(fail_after.unwrap_or(usize::MAX))
            .map(Ok::<T, TraverseError>)
            .chain(failure);

        tokio_stream::iter(elements).map(move |item| {
            if item.is_ok() {
                pulled.fetch_add(1, Ordering::Relaxed);
            }
            item
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn while_stops_pulling() {
        let provider = MemTraversal::new();
        let visited = provider.while_async(MemCursor::from(vec![1, 2, 3, 4]), |x| x < 2).await;
        assert_eq!(visited.unwrap(), 2);
        assert_eq!(provider.pulled(), 2);
    }

    #[tokio::test]
    async fn injected_failure_ends_traversal() {
        let provider = MemTraversal::new();
        let mut seen = Vec::new();
        let err = provider
            .for_each_async(MemCursor::failing_after(vec![1, 2, 3], 1), |x| seen.push(x))
            .await
            .unwrap_err();

        assert!(matches!(err, TraverseError::Backend(_)));
        assert_eq!(seen, vec![1]);
        assert_eq!(provider.pulled(), 1);
    }

    #[tokio::test]
    async fn collected_cursor_keeps_order() {
        let provider = MemTraversal::new();
        let cursor: MemCursor<u32> = (1..4).collect();

        let mut seen = Vec::new();
        provider.for_each_async(cursor, |x| seen.push(x)).await.unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn cursor_len() {
        assert_eq!(MemCursor::new(vec![1, 2, 3]).len(), 3);
        assert_eq!(MemCursor::failing_after(vec![1, 2, 3], 1).len(), 1);
        assert_eq!(MemCursor::failing_after(vec![1], 5).len(), 1);
        assert!(MemCursor::<u8>::new(vec![]).is_empty());
    }

    #[test]
    fn clones_share_counter() {
        let provider = MemTraversal::<u8>::new();
        let clone = provider.clone();
        provider.pulled.fetch_add(3, Ordering::Relaxed);
        assert_eq!(clone.pulled(), 3);
    }
}
