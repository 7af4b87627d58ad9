//! First-match search.

use crate::source::{Reduce, Traversal, combinator};
use cursor_traverse::{Traverse, TraverseResult};
use tracing::instrument;

combinator!(
    /// Finds the first element satisfying a predicate.
    Find
);

impl<P: Traverse> Find<'_, P> {
    /// Return the first element for which `predicate` returns `true`.
    ///
    /// The traversal stops at the match. Resolves to `None` if nothing
    /// matches or the cursor is absent.
    #[instrument(skip_all, name = "find")]
    pub async fn matching<F>(self, predicate: F) -> TraverseResult<Option<P::Item>>
    where
        F: FnMut(&P::Item) -> bool + Send,
    {
        self.source.reduce(Search { predicate, found: None }).await
    }
}

struct Search<F, T> {
    predicate: F,
    found: Option<T>,
}

impl<T, F> Reduce<T> for Search<F, T>
where
    T: Send,
    F: FnMut(&T) -> bool + Send,
{
    type Output = Option<T>;
    const TRAVERSAL: Traversal = Traversal::While;

    fn visit(&mut self, item: T) -> bool {
        if (self.predicate)(&item) {
            self.found = Some(item);
            return false;
        }
        true
    }

    fn finish(self) -> Option<T> {
        self.found
    }
}

#[cfg(test)]
mod tests {
    use crate::Algorithms;
    use cursor_traverse::mem::{MemCursor, MemTraversal};

    #[tokio::test]
    async fn finds_first_match() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let cursor = MemCursor::from(vec![1, 2, 3]);
        let found = algorithms.find(Some(cursor)).matching(|x| *x > 1).await;
        assert_eq!(found.unwrap(), Some(2));
        assert_eq!(provider.pulled(), 2);
    }

    #[tokio::test]
    async fn no_match_is_none() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let cursor = MemCursor::from(vec![1, 2, 3]);
        let found = algorithms.find(Some(cursor)).matching(|x| *x > 9).await;
        assert_eq!(found.unwrap(), None);
        assert_eq!(provider.pulled(), 3);
    }

    #[tokio::test]
    async fn find_first() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let first = algorithms.find_first(Some(MemCursor::from(vec![7, 8]))).await;
        assert_eq!(first.unwrap(), Some(7));
        let first = algorithms.find_first(Some(MemCursor::from(vec![]))).await;
        assert_eq!(first.unwrap(), None);
        assert_eq!(algorithms.find_first(None).await.unwrap(), None);
        assert_eq!(provider.pulled(), 1);
    }

    #[tokio::test]
    async fn absent_cursor_skips_predicate() {
        let provider = MemTraversal::<i32>::new();
        let algorithms = Algorithms::new(&provider);

        let mut calls = 0;
        let found = algorithms
            .find(None)
            .matching(|_| {
                calls += 1;
                true
            })
            .await;
        assert_eq!(found.unwrap(), None);
        assert_eq!(calls, 0);
    }
}
