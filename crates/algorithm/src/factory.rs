//! Entry point building one combinator per call.

use crate::{
    Accumulate, Collect, Find, ForEach, Quantifier, Quantify, Select, Transform, source::Source,
};
use cursor_traverse::{Traverse, TraverseResult};

/// Combinator factory bound to a traversal provider.
///
/// Every method takes the cursor to consume, either bare or as an `Option`
/// where `None` means there is nothing to traverse. An absent cursor never
/// reaches the provider and resolves to the combinator's documented default.
pub struct Algorithms<'a, P> {
    provider: &'a P,
}

impl<P> Clone for Algorithms<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Algorithms<'_, P> {}

impl<P> std::fmt::Debug for Algorithms<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Algorithms").finish_non_exhaustive()
    }
}

impl<'a, P: Traverse> Algorithms<'a, P> {
    /// Create a factory for `provider`.
    pub const fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// The provider every combinator traverses with.
    pub const fn provider(&self) -> &'a P {
        self.provider
    }

    fn source(&self, cursor: impl Into<Option<P::Cursor>>) -> Source<'a, P> {
        Source::new(self.provider, cursor.into())
    }

    /// Visit every element for side effects.
    pub fn for_each(&self, cursor: impl Into<Option<P::Cursor>>) -> ForEach<'a, P> {
        ForEach::new(self.source(cursor))
    }

    /// Map every element.
    pub fn transform(&self, cursor: impl Into<Option<P::Cursor>>) -> Transform<'a, P> {
        Transform::new(self.source(cursor))
    }

    /// Left-fold every element.
    pub fn accumulate(&self, cursor: impl Into<Option<P::Cursor>>) -> Accumulate<'a, P> {
        Accumulate::new(self.source(cursor))
    }

    /// Keep the elements matching a predicate.
    pub fn collect(&self, cursor: impl Into<Option<P::Cursor>>) -> Collect<'a, P> {
        Collect::new(self.source(cursor))
    }

    /// Test whether any element matches.
    pub fn any_of(&self, cursor: impl Into<Option<P::Cursor>>) -> Quantify<'a, P> {
        Quantify::new(self.source(cursor), Quantifier::AnyOf)
    }

    /// Test whether every element matches.
    pub fn all_of(&self, cursor: impl Into<Option<P::Cursor>>) -> Quantify<'a, P> {
        Quantify::new(self.source(cursor), Quantifier::AllOf)
    }

    /// Test whether no element matches.
    pub fn none_of(&self, cursor: impl Into<Option<P::Cursor>>) -> Quantify<'a, P> {
        Quantify::new(self.source(cursor), Quantifier::NoneOf)
    }

    /// Find the first matching element.
    pub fn find(&self, cursor: impl Into<Option<P::Cursor>>) -> Find<'a, P> {
        Find::new(self.source(cursor))
    }

    /// Return the first element of the cursor, if any.
    pub async fn find_first(
        &self,
        cursor: impl Into<Option<P::Cursor>>,
    ) -> TraverseResult<Option<P::Item>> {
        self.find(cursor).matching(|_| true).await
    }

    /// Select up to `count` elements.
    pub fn select(&self, cursor: impl Into<Option<P::Cursor>>, count: usize) -> Select<'a, P> {
        Select::new(self.source(cursor), count)
    }
}
