//! Bootstrap error types.

use thiserror::Error;
use transom_channels::ChannelError;

/// Errors raised while wiring the agent together.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// `channels.defaultChannel` does not name a provisioned system
    /// channel.
    #[error("default channel is not provisioned: {0}")]
    UnknownDefaultChannel(#[from] ChannelError),
}

/// Result type for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use transom_core::ChannelId;

    #[test]
    fn unknown_default_channel_display() {
        let err = BootstrapError::UnknownDefaultChannel(ChannelError::NotFound {
            id: ChannelId::from("missing"),
        });
        assert_eq!(
            err.to_string(),
            "default channel is not provisioned: no channel registered with id: missing"
        );
    }
}
