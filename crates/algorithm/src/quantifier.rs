//! Boolean quantifiers over a cursor: any, all and none.
//!
//! All three are driven by [`Traverse::while_async`] and stop at the first
//! element that decides the answer.

use crate::source::{Reduce, Source, Traversal};
use cursor_traverse::{Traverse, TraverseResult};
use tracing::instrument;

/// Which quantifier a [`Quantify`] evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// `true` if some element satisfies the predicate. Stops at the first
    /// match.
    AnyOf,
    /// `true` if every visited element satisfies the predicate. Stops at the
    /// first mismatch.
    ///
    /// A present but empty cursor resolves to `false`, not the vacuous
    /// `true`.
    AllOf,
    /// `true` if no element satisfies the predicate. Stops at the first
    /// match.
    ///
    /// An absent cursor resolves to `false`, while a present but empty cursor
    /// resolves to `true`.
    NoneOf,
}

impl Quantifier {
    /// Whether to keep scanning after the predicate returned `matched`.
    const fn proceed(self, matched: bool) -> bool {
        match self {
            Self::AnyOf | Self::NoneOf => !matched,
            Self::AllOf => matched,
        }
    }

    /// The answer, given the predicate result on the last visited element.
    const fn resolve(self, last: bool) -> bool {
        match self {
            Self::AnyOf | Self::AllOf => last,
            Self::NoneOf => !last,
        }
    }
}

/// Evaluates a [`Quantifier`] over a cursor.
pub struct Quantify<'a, P: Traverse> {
    source: Source<'a, P>,
    quantifier: Quantifier,
}

impl<P: Traverse> std::fmt::Debug for Quantify<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quantify")
            .field("source", &self.source)
            .field("quantifier", &self.quantifier)
            .finish()
    }
}

impl<'a, P: Traverse> Quantify<'a, P> {
    pub(crate) const fn new(source: Source<'a, P>, quantifier: Quantifier) -> Self {
        Self { source, quantifier }
    }

    /// The quantifier this combinator evaluates.
    pub const fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Evaluate the quantifier with `predicate`.
    ///
    /// An absent cursor resolves to `false` for every quantifier without
    /// calling `predicate`.
    #[instrument(skip_all, fields(quantifier = ?self.quantifier))]
    pub async fn matching<F>(self, predicate: F) -> TraverseResult<bool>
    where
        F: FnMut(&P::Item) -> bool + Send,
    {
        self.source.reduce(Check { quantifier: self.quantifier, predicate, last: false }).await
    }
}

struct Check<F> {
    quantifier: Quantifier,
    predicate: F,
    last: bool,
}

impl<T, F> Reduce<T> for Check<F>
where
    F: FnMut(&T) -> bool + Send,
{
    type Output = bool;
    const TRAVERSAL: Traversal = Traversal::While;

    fn visit(&mut self, item: T) -> bool {
        self.last = (self.predicate)(&item);
        self.quantifier.proceed(self.last)
    }

    fn finish(self) -> bool {
        self.quantifier.resolve(self.last)
    }

    fn absent(self) -> bool {
        false
    }
}
