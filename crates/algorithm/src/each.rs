//! Combinators that visit every element: [`ForEach`], [`Transform`],
//! [`Accumulate`] and [`Collect`].
//!
//! All four are driven by [`Traverse::for_each_async`] and cannot stop
//! early. Use the quantifiers, [`Find`](crate::Find) or
//! [`Select`](crate::Select) when the answer may be known before the cursor
//! is exhausted.

use crate::source::{Reduce, Traversal, combinator};
use cursor_traverse::{Traverse, TraverseResult};
use tracing::instrument;

combinator!(
    /// Visits every element for side effects only.
    ForEach
);

impl<P: Traverse> ForEach<'_, P> {
    /// Call `f` on every element, in cursor order.
    ///
    /// Resolves once the traversal completes. An absent cursor resolves
    /// immediately without calling `f`.
    #[instrument(skip_all, name = "for_each")]
    pub async fn callback<F>(self, f: F) -> TraverseResult<()>
    where
        F: FnMut(P::Item) + Send,
    {
        self.source.reduce(Visit(f)).await
    }
}

struct Visit<F>(F);

impl<T, F> Reduce<T> for Visit<F>
where
    F: FnMut(T) + Send,
{
    type Output = ();
    const TRAVERSAL: Traversal = Traversal::Every;

    fn visit(&mut self, item: T) -> bool {
        (self.0)(item);
        true
    }

    fn finish(self) {}
}

combinator!(
    /// Maps every element, collecting the results in cursor order.
    Transform
);

impl<P: Traverse> Transform<'_, P> {
    /// Apply `f` to every element and collect the results.
    ///
    /// `f` runs exactly once per element. An absent cursor resolves to an
    /// empty vector.
    #[instrument(skip_all, name = "transform")]
    pub async fn callback<U, F>(self, f: F) -> TraverseResult<Vec<U>>
    where
        U: Send,
        F: FnMut(P::Item) -> U + Send,
    {
        self.source.reduce(Map { f, out: Vec::new() }).await
    }
}

struct Map<F, U> {
    f: F,
    out: Vec<U>,
}

impl<T, U, F> Reduce<T> for Map<F, U>
where
    U: Send,
    F: FnMut(T) -> U + Send,
{
    type Output = Vec<U>;
    const TRAVERSAL: Traversal = Traversal::Every;

    fn visit(&mut self, item: T) -> bool {
        self.out.push((self.f)(item));
        true
    }

    fn finish(self) -> Vec<U> {
        self.out
    }
}

combinator!(
    /// Left-folds every element into a running value.
    Accumulate
);

impl<P: Traverse> Accumulate<'_, P> {
    /// Fold the cursor, starting from `seed`.
    ///
    /// Each element replaces the running value with
    /// `combine(running, element)`, in cursor order. An absent cursor
    /// resolves to `seed` unchanged.
    #[instrument(skip_all, name = "accumulate")]
    pub async fn callback<A, F>(self, seed: A, combine: F) -> TraverseResult<A>
    where
        A: Send,
        F: FnMut(A, P::Item) -> A + Send,
    {
        self.source.reduce(Fold { combine, acc: Some(seed) }).await
    }
}

struct Fold<F, A> {
    combine: F,
    // Only `None` while `combine` runs.
    acc: Option<A>,
}

impl<T, A, F> Reduce<T> for Fold<F, A>
where
    A: Send,
    F: FnMut(A, T) -> A + Send,
{
    type Output = A;
    const TRAVERSAL: Traversal = Traversal::Every;

    fn visit(&mut self, item: T) -> bool {
        if let Some(acc) = self.acc.take() {
            self.acc = Some((self.combine)(acc, item));
        }
        true
    }

    fn finish(self) -> A {
        // `acc` is only empty if `combine` panicked, and that panic is
        // already unwinding through the traversal.
        self.acc.expect("accumulator is restored after every combine")
    }
}

combinator!(
    /// Keeps the elements that satisfy a predicate, in cursor order.
    Collect
);

impl<P: Traverse> Collect<'_, P> {
    /// Collect every element for which `predicate` returns `true`.
    ///
    /// An absent cursor resolves to an empty vector.
    #[instrument(skip_all, name = "collect")]
    pub async fn matching<F>(self, predicate: F) -> TraverseResult<Vec<P::Item>>
    where
        F: FnMut(&P::Item) -> bool + Send,
    {
        self.source.reduce(Keep { predicate, out: Vec::new() }).await
    }
}

struct Keep<F, T> {
    predicate: F,
    out: Vec<T>,
}

impl<T, F> Reduce<T> for Keep<F, T>
where
    T: Send,
    F: FnMut(&T) -> bool + Send,
{
    type Output = Vec<T>;
    const TRAVERSAL: Traversal = Traversal::Every;

    fn visit(&mut self, item: T) -> bool {
        if (self.predicate)(&item) {
            self.out.push(item);
        }
        true
    }

    fn finish(self) -> Vec<T> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use crate::Algorithms;
    use cursor_traverse::mem::{MemCursor, MemTraversal};

    #[tokio::test]
    async fn for_each_visits_in_order() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let mut seen = Vec::new();
        let cursor = MemCursor::from(vec![3, 1, 2]);
        algorithms.for_each(Some(cursor)).callback(|x| seen.push(x)).await.unwrap();
        assert_eq!(seen, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn transform_doubles() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let cursor = MemCursor::from(vec![1, 2, 3]);
        let out = algorithms.transform(Some(cursor)).callback(|x| x * 2).await;
        assert_eq!(out.unwrap(), vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn transform_is_repeatable() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let source = vec!["a", "bb", "ccc"];
        let lengths = |items: Vec<&'static str>| {
            algorithms.transform(Some(MemCursor::from(items))).callback(str::len)
        };
        let first = lengths(source.clone()).await;
        let second = lengths(source.clone()).await;
        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(source, vec!["a", "bb", "ccc"]);
    }

    #[tokio::test]
    async fn accumulate_sums() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let cursor = MemCursor::from(vec![1, 2, 3]);
        let sum = algorithms.accumulate(Some(cursor)).callback(0, |a, b| a + b).await;
        assert_eq!(sum.unwrap(), 6);
    }

    #[tokio::test]
    async fn accumulate_folds_left() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let joined = algorithms
            .accumulate(Some(MemCursor::from(vec!["a", "b", "c"])))
            .callback(String::from(">"), |mut acc, s| {
                acc.push_str(s);
                acc
            })
            .await;
        assert_eq!(joined.unwrap(), ">abc");
    }

    #[tokio::test]
    async fn collect_evens() {
        let provider = MemTraversal::new();
        let algorithms = Algorithms::new(&provider);

        let cursor = MemCursor::from(vec![1, 2, 3, 4]);
        let evens = algorithms.collect(Some(cursor)).matching(|x| x % 2 == 0).await;
        assert_eq!(evens.unwrap(), vec![2, 4]);
    }

    #[tokio::test]
    async fn absent_cursor_defaults() {
        let provider = MemTraversal::<i32>::new();
        let algorithms = Algorithms::new(&provider);
        let mut calls = 0;

        algorithms.for_each(None).callback(|_| calls += 1).await.unwrap();
        let mapped = algorithms
            .transform(None)
            .callback(|x| {
                calls += 1;
                x
            })
            .await
            .unwrap();
        let folded = algorithms
            .accumulate(None)
            .callback(7, |a, b| {
                calls += 1;
                a + b
            })
            .await
            .unwrap();
        let kept = algorithms
            .collect(None)
            .matching(|_| {
                calls += 1;
                true
            })
            .await
            .unwrap();

        assert!(mapped.is_empty());
        assert_eq!(folded, 7);
        assert!(kept.is_empty());
        assert_eq!(calls, 0);
        assert_eq!(provider.pulled(), 0);
    }
}
