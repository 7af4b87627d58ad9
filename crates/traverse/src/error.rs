//! Error types for cursor traversal.

/// Result type alias for traversal operations.
pub type TraverseResult<T, E = TraverseError> = Result<T, E>;

/// Error type for traversal operations.
///
/// Every variant ends the traversal that produced it. Elements visited before
/// the error are not reported back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum TraverseError {
    /// The cursor's backing store failed while producing an element.
    #[error("Backend error: {0}")]
    Backend(#[from] Box<dyn core::error::Error + Send + Sync + 'static>),

    /// The traversal was cancelled by its provider.
    #[error("Traversal cancelled")]
    Cancelled,

    /// The traversal ran past its deadline.
    #[error("Traversal deadline exceeded")]
    DeadlineExceeded,
}

impl TraverseError {
    /// Create a new backend error from any error type.
    pub fn backend<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(error))
    }

    /// Returns `true` if the error came from the provider shutting the
    /// traversal down rather than from the cursor's data.
    pub const fn is_shutdown(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
