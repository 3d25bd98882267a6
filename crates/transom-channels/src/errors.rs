//! Channel error types.

use thiserror::Error;
use transom_core::ChannelId;

/// Errors raised by the channel handler.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No channel is registered under the requested ID.
    ///
    /// Channel IDs are externally-validated caller input, so a miss is a
    /// contract violation surfaced as a hard error, never a silent `None`.
    #[error("no channel registered with id: {id}")]
    NotFound {
        /// The ID that failed to resolve.
        id: ChannelId,
    },
}

/// Result type for channel operations.
pub type Result<T> = std::result::Result<T, ChannelError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
