//! # transom-agent
//!
//! Composition root for the Transom desktop interop agent.
//!
//! [`Agent::bootstrap`] loads everything together: system channels are
//! provisioned from settings (registration order = settings order), the
//! in-memory window store is created, and the channel handler is attached
//! to the store's lifecycle signals. Window creation routes through
//! [`Agent::open_window`] so lifecycle notifications flow from day one.
//!
//! The intent resolver is constructed on demand via
//! [`Agent::resolution_handler`] with a host-provided picker
//! implementation — the agent only supplies the configured surface
//! identity and response timeout.

#![deny(unsafe_code)]

pub mod errors;

pub use errors::{BootstrapError, Result};

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use transom_channels::{
    Channel, ChannelHandler, DisplayMetadata, Window, WindowRegistry, WindowStore,
};
use transom_core::{AppId, ChannelId, WindowId};
use transom_resolver::{PickerHost, ResolutionHandler, SurfaceIdentity};
use transom_settings::{ChannelSettings, LoggingSettings, TransomSettings};

/// Initialize the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// [`LoggingSettings::level`]. Safe to call more than once; later calls
/// are no-ops.
pub fn init_tracing(settings: &LoggingSettings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}

/// Build the system channels from the provisioning list, in settings
/// order.
#[must_use]
pub fn provision_system_channels(settings: &ChannelSettings) -> Vec<Arc<Channel>> {
    settings
        .system
        .iter()
        .map(|spec| {
            Channel::system(
                ChannelId::from(spec.id.as_str()),
                DisplayMetadata {
                    name: spec.name.clone(),
                    color: spec.color.clone(),
                    glyph: spec.glyph.clone(),
                },
            )
        })
        .collect()
}

/// The wired-up agent: window store, channel handler, and resolver
/// configuration.
pub struct Agent {
    settings: TransomSettings,
    store: Arc<WindowStore>,
    channels: Arc<ChannelHandler>,
    default_channel: Arc<Channel>,
}

impl Agent {
    /// Provision channels and wire the handler to the window store.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::UnknownDefaultChannel`] when
    /// `channels.defaultChannel` names no provisioned system channel.
    pub fn bootstrap(settings: TransomSettings) -> Result<Self> {
        let store = Arc::new(WindowStore::new());
        let system = provision_system_channels(&settings.channels);
        let channels =
            ChannelHandler::new(Arc::clone(&store) as Arc<dyn WindowRegistry>, system);
        channels.attach();

        let default_id = ChannelId::from(settings.channels.default_channel.as_str());
        let default_channel = channels.channel_by_id(&default_id)?;

        info!(
            system_channels = settings.channels.system.len(),
            default_channel = %default_id,
            "agent bootstrapped"
        );

        Ok(Self {
            settings,
            store,
            channels,
            default_channel,
        })
    }

    /// The channel handler.
    #[must_use]
    pub fn channels(&self) -> &Arc<ChannelHandler> {
        &self.channels
    }

    /// The window store.
    #[must_use]
    pub fn windows(&self) -> &Arc<WindowStore> {
        &self.store
    }

    /// The channel new windows start on.
    #[must_use]
    pub fn default_channel(&self) -> &Arc<Channel> {
        &self.default_channel
    }

    /// The loaded settings.
    #[must_use]
    pub fn settings(&self) -> &TransomSettings {
        &self.settings
    }

    /// Open a window for `app_id` on the default channel.
    pub async fn open_window(&self, app_id: AppId) -> Arc<Window> {
        self.store
            .open_window(app_id, Arc::clone(&self.default_channel))
            .await
    }

    /// Close a window by ID. Returns `false` if no such window exists.
    pub async fn close_window(&self, id: &WindowId) -> bool {
        self.store.close_window(id).await
    }

    /// Construct the intent resolution handler over a host-provided
    /// picker, using the configured surface identity and response
    /// timeout. Call [`ResolutionHandler::init`] before use.
    #[must_use]
    pub fn resolution_handler(&self, host: Arc<dyn PickerHost>) -> ResolutionHandler {
        ResolutionHandler::new(
            host,
            SurfaceIdentity::from(self.settings.resolver.surface_name.as_str()),
        )
        .with_response_timeout(Duration::from_millis(
            self.settings.resolver.response_timeout_ms,
        ))
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("default_channel", self.default_channel.id())
            .field("window_count", &self.store.window_count())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
