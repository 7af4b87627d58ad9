//! Channel-backed traversal provider.
//!
//! A producer task feeds a cursor through a bounded channel while a
//! traversal consumes it. The provider owns the shutdown policy: a
//! cancellation token shared by every traversal it serves, and an optional
//! per-traversal deadline.

use crate::{Traverse, TraverseConfig, TraverseError, TraverseResult};
use core::marker::PhantomData;
use std::time::Duration;
use tokio::{sync::mpsc, time::Instant};
use tokio_stream::Stream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Create a cursor channel using the buffer size from `config`.
///
/// The [`ChannelCursor`] is handed to a traversal; the [`CursorSender`] is
/// kept by the producer. Dropping every sender ends the cursor.
pub fn cursor_channel<T>(config: &TraverseConfig) -> (CursorSender<T>, ChannelCursor<T>) {
    let (sender, receiver) = mpsc::channel(config.buffer.get());
    (CursorSender { sender }, ChannelCursor { receiver })
}

/// Producer half of a cursor channel.
pub struct CursorSender<T> {
    sender: mpsc::Sender<TraverseResult<T>>,
}

impl<T> Clone for CursorSender<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T> std::fmt::Debug for CursorSender<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorSender").field("closed", &self.is_closed()).finish()
    }
}

impl<T> CursorSender<T> {
    /// Send the next element, waiting for buffer space.
    ///
    /// Returns [`TraverseError::Cancelled`] once the traversal has stopped
    /// consuming the cursor, whether it finished early or was shut down.
    pub async fn send(&self, item: T) -> TraverseResult<()> {
        self.sender.send(Ok(item)).await.map_err(|_| TraverseError::Cancelled)
    }

    /// End the cursor with a backend error.
    ///
    /// The traversal fails with [`TraverseError::Backend`] after visiting
    /// every element sent before this call.
    pub async fn fail<E>(self, error: E)
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        let _ = self.sender.send(Err(TraverseError::backend(error))).await;
    }

    /// Returns `true` if the traversal has stopped consuming the cursor.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer half of a cursor channel.
pub struct ChannelCursor<T> {
    receiver: mpsc::Receiver<TraverseResult<T>>,
}

impl<T> std::fmt::Debug for ChannelCursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelCursor").field("buffered", &self.receiver.len()).finish()
    }
}

/// State carried between elements of an open channel cursor.
struct OpenCursor<T> {
    receiver: mpsc::Receiver<TraverseResult<T>>,
    cancel_token: CancellationToken,
    deadline: Option<Instant>,
}

impl<T> OpenCursor<T> {
    /// Wait for the next element, the cancellation signal, or the deadline.
    ///
    /// Returns `None` once the producer is gone. A shutdown error is the
    /// last item the cursor yields.
    async fn next(&mut self) -> Option<(TraverseResult<T>, bool)> {
        tokio::select! {
            biased;

            _ = self.cancel_token.cancelled() => {
                debug!("Traversal received cancellation signal");
                Some((Err(TraverseError::Cancelled), false))
            }

            _ = tokio::time::sleep_until(self.deadline.unwrap_or_else(Instant::now)),
                if self.deadline.is_some() =>
            {
                debug!("Traversal deadline exceeded");
                Some((Err(TraverseError::DeadlineExceeded), false))
            }

            item = self.receiver.recv() => item.map(|item| (item, true)),
        }
    }
}

/// Traversal provider for [`ChannelCursor`]s.
///
/// Every traversal observes the provider's cancellation token. Cancelling it
/// fails all in-progress traversals with [`TraverseError::Cancelled`]; an
/// element already visited is never revisited.
pub struct ChannelTraversal<T> {
    cancel_token: CancellationToken,
    deadline: Option<Duration>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for ChannelTraversal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelTraversal")
            .field("deadline", &self.deadline)
            .field("cancelled", &self.cancel_token.is_cancelled())
            .finish()
    }
}

impl<T> ChannelTraversal<T> {
    /// Create a provider using the deadline from `config`.
    pub fn new(config: &TraverseConfig, cancel_token: CancellationToken) -> Self {
        Self { cancel_token, deadline: config.deadline, _marker: PhantomData }
    }

    /// The per-traversal deadline, if any.
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }
}

impl<T: Send + 'static> Traverse for ChannelTraversal<T> {
    type Cursor = ChannelCursor<T>;
    type Item = T;

    fn open(&self, cursor: Self::Cursor) -> impl Stream<Item = TraverseResult<T>> + Send {
        let state = OpenCursor {
            receiver: cursor.receiver,
            cancel_token: self.cancel_token.clone(),
            deadline: self.deadline.map(|d| Instant::now() + d),
        };

        futures::stream::unfold(Some(state), |state| async move {
            let mut state = state?;
            let (item, live) = state.next().await?;
            Some((item, live.then_some(state)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn small_config() -> TraverseConfig {
        TraverseConfig::default().with_buffer(NonZeroUsize::new(2).unwrap())
    }

    #[tokio::test]
    async fn producer_feeds_traversal() {
        let config = small_config();
        let provider = ChannelTraversal::new(&config, CancellationToken::new());
        let (sender, cursor) = cursor_channel(&config);

        tokio::spawn(async move {
            for i in 0..10u32 {
                sender.send(i).await.unwrap();
            }
        });

        let mut seen = Vec::new();
        let visited = provider.for_each_async(cursor, |x| seen.push(x)).await.unwrap();
        assert_eq!(visited, 10);
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn early_stop_closes_producer() {
        let config = small_config();
        let provider = ChannelTraversal::new(&config, CancellationToken::new());
        let (sender, cursor) = cursor_channel(&config);

        let producer = tokio::spawn(async move {
            let mut sent = 0;
            for i in 0..100u32 {
                if sender.send(i).await.is_err() {
                    break;
                }
                sent += 1;
            }
            sent
        });

        let visited = provider.while_async(cursor, |x| x < 2).await.unwrap();
        assert_eq!(visited, 3);

        let sent = producer.await.unwrap();
        assert!(sent < 100);
    }

    #[tokio::test]
    async fn producer_failure_propagates() {
        let config = small_config();
        let provider = ChannelTraversal::new(&config, CancellationToken::new());
        let (sender, cursor) = cursor_channel(&config);

        tokio::spawn(async move {
            sender.send(1u32).await.unwrap();
            sender.fail(std::io::Error::other("source went away")).await;
        });

        let mut seen = Vec::new();
        let err = provider.for_each_async(cursor, |x| seen.push(x)).await.unwrap_err();
        assert!(matches!(err, TraverseError::Backend(_)));
        assert_eq!(seen, vec![1]);
    }

    #[tokio::test]
    async fn cancellation_fails_traversal() {
        let config = small_config();
        let cancel = CancellationToken::new();
        let provider = ChannelTraversal::<u32>::new(&config, cancel.clone());
        let (_sender, cursor) = cursor_channel(&config);

        cancel.cancel();
        let err = provider.for_each_async(cursor, |_| {}).await.unwrap_err();
        assert!(matches!(err, TraverseError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_fails_stalled_traversal() {
        let config = small_config().with_deadline(Duration::from_millis(50));
        let provider = ChannelTraversal::<u32>::new(&config, CancellationToken::new());
        assert_eq!(provider.deadline(), Some(Duration::from_millis(50)));
        let (sender, cursor) = cursor_channel(&config);

        let err = provider.for_each_async(cursor, |_| {}).await.unwrap_err();
        assert!(matches!(err, TraverseError::DeadlineExceeded));
        drop(sender);
    }

    #[tokio::test]
    async fn dropped_sender_ends_cursor() {
        let config = small_config();
        let provider = ChannelTraversal::<u32>::new(&config, CancellationToken::new());
        assert_eq!(provider.deadline(), None);
        let (sender, cursor) = cursor_channel(&config);
        drop(sender);

        assert_eq!(provider.for_each_async(cursor, |_| {}).await.unwrap(), 0);
    }
}
