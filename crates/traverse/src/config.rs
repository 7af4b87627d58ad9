//! Traversal configuration types and environment parsing.
//!
//! These settings apply to [`ChannelTraversal`](crate::ChannelTraversal)
//! and to the cursor channels created with
//! [`cursor_channel`](crate::cursor_channel).
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `CURSOR_CHANNEL_BUFFER` | Elements buffered between producer and traversal | `256` |
//! | `CURSOR_DEADLINE_MS` | Per-traversal deadline in milliseconds | none |
//!
//! # Example
//!
//! ```rust
//! use cursor_traverse::config::TraverseConfig;
//! use std::{env, time::Duration};
//!
//! unsafe {
//!     env::set_var("CURSOR_DEADLINE_MS", "1500");
//! }
//! let config = TraverseConfig::from_env().unwrap();
//! assert_eq!(config.deadline, Some(Duration::from_millis(1500)));
//! # unsafe { env::remove_var("CURSOR_DEADLINE_MS"); }
//! ```

use std::{env, num::NonZeroUsize, time::Duration};
use thiserror::Error;

/// Environment variable name for the cursor channel buffer size.
pub const ENV_CHANNEL_BUFFER: &str = "CURSOR_CHANNEL_BUFFER";

/// Environment variable name for the per-traversal deadline.
pub const ENV_DEADLINE_MS: &str = "CURSOR_DEADLINE_MS";

/// Default number of elements buffered in a cursor channel.
pub const DEFAULT_CHANNEL_BUFFER: NonZeroUsize = NonZeroUsize::new(256).unwrap();

/// Channel-backed traversal configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraverseConfig {
    /// Number of elements a producer may send ahead of the traversal.
    pub buffer: NonZeroUsize,
    /// Maximum wall-clock time a single traversal may take, measured from
    /// the moment the cursor is opened.
    pub deadline: Option<Duration>,
}

impl Default for TraverseConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_CHANNEL_BUFFER,
            deadline: None,
        }
    }
}

impl TraverseConfig {
    /// Set the channel buffer size.
    pub const fn with_buffer(mut self, buffer: NonZeroUsize) -> Self {
        self.buffer = buffer;
        self
    }

    /// Set the per-traversal deadline.
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBuffer`] if `CURSOR_CHANNEL_BUFFER` is
    /// not a positive integer, or [`ConfigError::InvalidDeadline`] if
    /// `CURSOR_DEADLINE_MS` is not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var(ENV_CHANNEL_BUFFER) {
            config.buffer = value
                .parse::<NonZeroUsize>()
                .map_err(|_| ConfigError::InvalidBuffer(value.clone()))?;
        }

        if let Ok(value) = env::var(ENV_DEADLINE_MS) {
            let millis =
                value.parse::<u64>().map_err(|_| ConfigError::InvalidDeadline(value.clone()))?;
            config.deadline = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid channel buffer size.
    #[error("invalid CURSOR_CHANNEL_BUFFER: {0} (expected a positive integer)")]
    InvalidBuffer(String),

    /// Invalid deadline.
    #[error("invalid CURSOR_DEADLINE_MS: {0} (expected milliseconds)")]
    InvalidDeadline(String),
}
