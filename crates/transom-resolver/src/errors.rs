//! Resolver error types.

use thiserror::Error;

/// Errors raised at the resolution boundary.
///
/// Lifecycle misuse (`NotInitialized`, `Busy`) propagates to the caller.
/// `Surface` and `Transport` failures are caught inside
/// [`handle_intent`](crate::handler::ResolutionHandler::handle_intent) and
/// degrade to a cancelled resolution instead of crashing.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// A public operation was called before `init` completed.
    #[error("resolution handler is not initialized")]
    NotInitialized,

    /// An intent resolution is already presenting.
    #[error("an intent resolution is already presenting")]
    Busy,

    /// The host failed to create, show, hide, or close the picker surface.
    #[error("picker surface error: {0}")]
    Surface(String),

    /// The message channel to the picker failed or timed out.
    #[error("picker transport error: {0}")]
    Transport(String),
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ResolverError::NotInitialized.to_string(),
            "resolution handler is not initialized"
        );
        assert_eq!(
            ResolverError::Busy.to_string(),
            "an intent resolution is already presenting"
        );
        assert_eq!(
            ResolverError::Surface("window vanished".into()).to_string(),
            "picker surface error: window vanished"
        );
        assert_eq!(
            ResolverError::Transport("pipe closed".into()).to_string(),
            "picker transport error: pipe closed"
        );
    }
}
