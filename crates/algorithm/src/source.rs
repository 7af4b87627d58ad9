//! Shared traversal driver for every combinator.
//!
//! Each combinator is a [`Source`] plus a [`Reduce`] implementation. The
//! reducer decides which primitive runs, what happens on each visit, and what
//! the terminal call resolves to; [`Source::reduce`] does the rest.

use cursor_traverse::{Traverse, TraverseResult};
use tracing::{debug, trace};

/// Which traversal primitive a reducer is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Traversal {
    /// [`Traverse::for_each_async`]. The visit result is ignored.
    Every,
    /// [`Traverse::while_async`]. Traversal stops when a visit returns
    /// `false`.
    While,
}

/// Per-combinator visit and finalize logic.
pub(crate) trait Reduce<T>: Send + Sized {
    /// The value the terminal call resolves to.
    type Output;

    /// The primitive that drives this reducer.
    const TRAVERSAL: Traversal;

    /// Visit one element. Returns whether the traversal should continue.
    fn visit(&mut self, item: T) -> bool;

    /// Resolve after the traversal completed.
    fn finish(self) -> Self::Output;

    /// Resolve without traversing, when the cursor is absent.
    fn absent(self) -> Self::Output {
        self.finish()
    }
}

/// A provider and the cursor a combinator will consume.
pub(crate) struct Source<'a, P: Traverse> {
    provider: &'a P,
    cursor: Option<P::Cursor>,
}

impl<P: Traverse> std::fmt::Debug for Source<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source").field("absent", &self.cursor.is_none()).finish_non_exhaustive()
    }
}

impl<'a, P: Traverse> Source<'a, P> {
    pub(crate) const fn new(provider: &'a P, cursor: Option<P::Cursor>) -> Self {
        Self { provider, cursor }
    }

    /// Consume the cursor with `reducer`.
    ///
    /// An absent cursor resolves with [`Reduce::absent`] and never reaches
    /// the provider.
    pub(crate) async fn reduce<R>(self, mut reducer: R) -> TraverseResult<R::Output>
    where
        R: Reduce<P::Item>,
    {
        let Some(cursor) = self.cursor else {
            trace!("cursor absent, resolving with default");
            return Ok(reducer.absent());
        };

        let visited = match R::TRAVERSAL {
            Traversal::Every => {
                self.provider
                    .for_each_async(cursor, |item| {
                        reducer.visit(item);
                    })
                    .await?
            }
            Traversal::While => {
                self.provider.while_async(cursor, |item| reducer.visit(item)).await?
            }
        };
        debug!(visited, "traversal complete");

        Ok(reducer.finish())
    }
}

/// Define a combinator that only wraps a [`Source`].
macro_rules! combinator {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<'a, P: cursor_traverse::Traverse> {
            source: crate::source::Source<'a, P>,
        }

        impl<'a, P: cursor_traverse::Traverse> $name<'a, P> {
            pub(crate) const fn new(source: crate::source::Source<'a, P>) -> Self {
                Self { source }
            }
        }

        impl<P: cursor_traverse::Traverse> std::fmt::Debug for $name<'_, P> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).field("source", &self.source).finish()
            }
        }
    };
}
pub(crate) use combinator;

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_traverse::mem::{MemCursor, MemTraversal};

    /// Records visits and stops after `limit` of them.
    struct Recorder {
        seen: Vec<u32>,
        limit: usize,
    }

    impl Reduce<u32> for Recorder {
        type Output = Option<Vec<u32>>;
        const TRAVERSAL: Traversal = Traversal::While;

        fn visit(&mut self, item: u32) -> bool {
            self.seen.push(item);
            self.seen.len() < self.limit
        }

        fn finish(self) -> Self::Output {
            Some(self.seen)
        }

        fn absent(self) -> Self::Output {
            None
        }
    }

    #[tokio::test]
    async fn absent_cursor_skips_provider() {
        let provider = MemTraversal::<u32>::new();
        let out = Source::new(&provider, None).reduce(Recorder { seen: vec![], limit: 1 }).await;
        assert_eq!(out.unwrap(), None);
        assert_eq!(provider.pulled(), 0);
    }

    #[tokio::test]
    async fn while_reducer_stops_early() {
        let provider = MemTraversal::<u32>::new();
        let cursor = MemCursor::from(vec![1, 2, 3, 4]);
        let recorder = Recorder { seen: vec![], limit: 2 };
        let out = Source::new(&provider, Some(cursor)).reduce(recorder).await;
        assert_eq!(out.unwrap(), Some(vec![1, 2]));
        assert_eq!(provider.pulled(), 2);
    }

    #[tokio::test]
    async fn empty_cursor_finishes() {
        let provider = MemTraversal::<u32>::new();
        let cursor = MemCursor::from(vec![]);
        let recorder = Recorder { seen: vec![], limit: 2 };
        let out = Source::new(&provider, Some(cursor)).reduce(recorder).await;
        assert_eq!(out.unwrap(), Some(vec![]));
    }
}
