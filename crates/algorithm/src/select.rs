//! Bounded, filtered, projected selection.

use crate::source::{Reduce, Source, Traversal};
use cursor_traverse::{Traverse, TraverseResult};
use tracing::instrument;

type Predicate<'f, T> = Box<dyn FnMut(&T) -> bool + Send + 'f>;

/// Filter of a [`SelectOptions`], tagged by what it inspects.
enum Filter<'f, T, U> {
    /// Inspects the raw element; survivors are projected afterwards.
    Raw(Predicate<'f, T>),
    /// Inspects the projected value, which is also what gets emitted.
    Projected(Predicate<'f, U>),
}

/// Filter and projection order for [`Select::project`].
///
/// By default every element passes and projection runs after filtering.
/// `T` is the cursor's element type and `U` the projection's output.
pub struct SelectOptions<'f, T, U> {
    filter: Filter<'f, T, U>,
}

impl<T, U> Default for SelectOptions<'_, T, U> {
    fn default() -> Self {
        Self { filter: Filter::Raw(Box::new(|_: &T| true)) }
    }
}

impl<T, U> std::fmt::Debug for SelectOptions<'_, T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectOptions").field("pre_project", &self.is_pre_projected()).finish()
    }
}

impl<'f, T, U> SelectOptions<'f, T, U> {
    /// Select every element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select elements whose raw value satisfies `predicate`, then project
    /// them.
    pub fn matching<F>(predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'f,
    {
        Self { filter: Filter::Raw(Box::new(predicate)) }
    }

    /// Project every element first, then select the projected values that
    /// satisfy `predicate`.
    pub fn matching_projected<F>(predicate: F) -> Self
    where
        F: FnMut(&U) -> bool + Send + 'f,
    {
        Self { filter: Filter::Projected(Box::new(predicate)) }
    }

    /// Whether projection runs before filtering.
    pub const fn is_pre_projected(&self) -> bool {
        matches!(self.filter, Filter::Projected(_))
    }
}

/// Collects up to `count` projected elements.
pub struct Select<'a, P: Traverse> {
    source: Source<'a, P>,
    count: usize,
}

impl<P: Traverse> std::fmt::Debug for Select<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Select").field("source", &self.source).field("count", &self.count).finish()
    }
}

impl<'a, P: Traverse> Select<'a, P> {
    pub(crate) const fn new(source: Source<'a, P>, count: usize) -> Self {
        Self { source, count }
    }

    /// Maximum number of results.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Scan the cursor until `count` elements pass the filter, projecting
    /// each with `projection`.
    ///
    /// Results keep cursor order. Neither the filter nor the projection runs
    /// once `count` results are collected; with a `count` of zero they never
    /// run. An absent cursor resolves to an empty vector.
    #[instrument(skip_all, fields(count = self.count, pre_project = options.is_pre_projected()))]
    pub async fn project<U, G>(
        self,
        options: SelectOptions<'_, P::Item, U>,
        projection: G,
    ) -> TraverseResult<Vec<U>>
    where
        U: Send,
        G: FnMut(P::Item) -> U + Send,
    {
        let take = Take { filter: options.filter, projection, count: self.count, out: Vec::new() };
        self.source.reduce(take).await
    }
}

struct Take<'f, T, U, G> {
    filter: Filter<'f, T, U>,
    projection: G,
    count: usize,
    out: Vec<U>,
}

impl<T, U, G> Reduce<T> for Take<'_, T, U, G>
where
    U: Send,
    G: FnMut(T) -> U + Send,
{
    type Output = Vec<U>;
    const TRAVERSAL: Traversal = Traversal::While;

    fn visit(&mut self, item: T) -> bool {
        if self.out.len() >= self.count {
            return false;
        }

        match &mut self.filter {
            Filter::Raw(predicate) => {
                if predicate(&item) {
                    self.out.push((self.projection)(item));
                }
            }
            Filter::Projected(predicate) => {
                let projected = (self.projection)(item);
                if predicate(&projected) {
                    self.out.push(projected);
                }
            }
        }

        self.out.len() < self.count
    }

    fn finish(self) -> Vec<U> {
        self.out
    }
}
