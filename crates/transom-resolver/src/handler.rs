//! Resolution handler: the two-state façade over the host picker surface.
//!
//! Lifecycle is two-phase. [`init`](ResolutionHandler::init) runs once:
//! it closes any stale surface left over from an earlier process lifetime,
//! creates a fresh one under the well-known identity, and opens the
//! message channel. `init` doubles as the awaitable ready gate — it is
//! idempotent and concurrent callers coalesce on the same initialization.
//! Public operations before it completes fail with
//! [`ResolverError::NotInitialized`].
//!
//! Presentation is a two-state machine (`idle` ↔ `presenting`). The
//! contract with callers is best-effort: a surface or transport failure
//! during presentation is logged and swallowed, and the caller receives
//! [`Resolution::Cancelled`] instead of an error.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::errors::{ResolverError, Result};
use crate::surface::{PickerChannel, PickerHost};
use crate::types::{
    AppIdentifier, Intent, Resolution, ResolveRequest, ResolveResponse, SurfaceHandle,
    SurfaceIdentity,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PresentationState {
    Idle,
    Presenting,
}

/// The initialized surface session: handle plus message channel.
struct Session {
    surface: SurfaceHandle,
    channel: Box<dyn PickerChannel>,
}

/// Façade over the host picker surface for intent resolution.
pub struct ResolutionHandler {
    host: Arc<dyn PickerHost>,
    identity: SurfaceIdentity,
    response_timeout: Option<Duration>,
    session: OnceCell<Session>,
    state: Mutex<PresentationState>,
}

impl ResolutionHandler {
    /// Create a handler over the given host, targeting the surface with
    /// the given well-known identity.
    #[must_use]
    pub fn new(host: Arc<dyn PickerHost>, identity: SurfaceIdentity) -> Self {
        Self {
            host,
            identity,
            response_timeout: None,
            session: OnceCell::new(),
            state: Mutex::new(PresentationState::Idle),
        }
    }

    /// Bound how long a resolve request may wait for the picker's answer.
    ///
    /// An elapsed timeout is treated as a transport failure (degrading to
    /// a cancelled resolution).
    #[must_use]
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    /// One-time initialization: close any stale surface, create a fresh
    /// one, open the message channel.
    ///
    /// Idempotent; concurrent callers coalesce. Awaiting this is the
    /// ready gate for the public operations.
    pub async fn init(&self) -> Result<()> {
        let _ = self
            .session
            .get_or_try_init(|| async {
                if let Some(stale) = self.host.find_surface(&self.identity).await {
                    // Leftover from an earlier process lifetime.
                    if let Err(e) = self.host.close_surface(&stale).await {
                        warn!(surface = %stale, error = %e, "failed to close stale picker surface");
                    }
                }
                let surface = self.host.create_surface(&self.identity).await?;
                let channel = self.host.open_channel(&surface).await?;
                debug!(surface = %surface, identity = %self.identity, "picker surface ready");
                Ok::<_, ResolverError>(Session { surface, channel })
            })
            .await?;
        Ok(())
    }

    /// Whether initialization has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.session.initialized()
    }

    /// Present the candidate list for `intent` and await the user's
    /// selection.
    ///
    /// Transitions `idle → presenting`; on settlement (selection, empty
    /// response, or swallowed failure) the surface is hidden and the state
    /// returns to `idle`.
    ///
    /// # Errors
    ///
    /// [`ResolverError::NotInitialized`] before [`init`](Self::init)
    /// completes; [`ResolverError::Busy`] while another resolution is
    /// presenting. Surface and transport failures do **not** error — they
    /// degrade to [`Resolution::Cancelled`].
    pub async fn handle_intent(
        &self,
        intent: Intent,
        candidates: Vec<AppIdentifier>,
    ) -> Result<Resolution> {
        let session = self.session.get().ok_or(ResolverError::NotInitialized)?;

        {
            let mut state = self.state.lock();
            if *state == PresentationState::Presenting {
                return Err(ResolverError::Busy);
            }
            *state = PresentationState::Presenting;
        }

        let request = ResolveRequest {
            intent,
            candidate_applications: candidates,
        };
        let outcome = self.present(session, &request).await;

        // Settlement: hide and return to idle regardless of the outcome.
        if let Err(e) = self.host.hide(&session.surface).await {
            warn!(surface = %session.surface, error = %e, "failed to hide picker surface");
        }
        *self.state.lock() = PresentationState::Idle;

        match outcome {
            Ok(ResolveResponse {
                selected_application: Some(app),
            }) => {
                info!(intent = %request.intent.name, app = %app.app_id, "intent resolved");
                Ok(Resolution::Selected(app))
            }
            Ok(ResolveResponse {
                selected_application: None,
            }) => Ok(Resolution::Cancelled),
            Err(e) => {
                warn!(
                    intent = %request.intent.name,
                    error = %e,
                    "intent resolution failed; treating as cancelled"
                );
                Ok(Resolution::Cancelled)
            }
        }
    }

    async fn present(&self, session: &Session, request: &ResolveRequest) -> Result<ResolveResponse> {
        self.host.show(&session.surface).await?;
        self.host.focus(&session.surface).await?;
        match self.response_timeout {
            Some(timeout) => tokio::time::timeout(timeout, session.channel.resolve(request))
                .await
                .map_err(|_| ResolverError::Transport("picker response timed out".into()))?,
            None => session.channel.resolve(request).await,
        }
    }

    /// Force the picker surface to hide.
    ///
    /// Valid from either presentation state and idempotent. Does not
    /// interrupt an in-flight [`handle_intent`](Self::handle_intent);
    /// that call settles on its own when the picker responds or fails.
    pub async fn cancel(&self) -> Result<()> {
        let session = self.session.get().ok_or(ResolverError::NotInitialized)?;
        if let Err(e) = self.host.hide(&session.surface).await {
            warn!(surface = %session.surface, error = %e, "failed to hide picker surface on cancel");
        }
        Ok(())
    }
}

impl std::fmt::Debug for ResolutionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionHandler")
            .field("identity", &self.identity)
            .field("ready", &self.is_ready())
            .field("state", &*self.state.lock())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
