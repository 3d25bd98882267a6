//! Channel handler: the registry of all channels and the single mutation
//! path for window-channel membership.
//!
//! Every membership change — explicit [`join_channel`](ChannelHandler::join_channel)
//! or implicit via window lifecycle — runs through this handler, which
//! maintains the broadcast caches and emits one
//! [`ChannelChange`] notification per state-changing event.
//!
//! ## Ordering
//!
//! State is fully committed before the notification is emitted: channel
//! reassignment happens-before membership recomputation happens-before
//! delivery. Observers that re-query the handler from inside a
//! notification always see updated state. Delivery itself is awaited by
//! the emitting call, but because observer failures are swallowed and
//! state is already committed, a slow subscriber delays only that call's
//! return.
//!
//! ## Derived membership
//!
//! Membership is recomputed from the live window set on every query —
//! never cached in a separate set that could desync.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::debug;

use transom_core::{ChannelId, Context, Signal};

use crate::channel::{Channel, ChannelKind};
use crate::errors::{ChannelError, Result};
use crate::registry::WindowRegistry;
use crate::window::Window;

/// One membership-changing event.
///
/// `new_channel` is `None` when the window was removed; `previous_channel`
/// is `None` when the window first appeared.
#[derive(Clone, Debug)]
pub struct ChannelChange {
    /// The window whose assignment changed.
    pub window: Arc<Window>,
    /// The channel the window now belongs to.
    pub new_channel: Option<Arc<Channel>>,
    /// The channel the window previously belonged to.
    pub previous_channel: Option<Arc<Channel>>,
    /// ISO 8601 timestamp of the change.
    pub timestamp: String,
}

impl ChannelChange {
    fn now(
        window: &Arc<Window>,
        new_channel: Option<Arc<Channel>>,
        previous_channel: Option<Arc<Channel>>,
    ) -> Self {
        Self {
            window: Arc::clone(window),
            new_channel,
            previous_channel,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Channel registry indexes: registration order plus id and app-name maps.
#[derive(Default)]
struct ChannelTable {
    ordered: Vec<Arc<Channel>>,
    by_id: HashMap<ChannelId, Arc<Channel>>,
    app_by_name: HashMap<String, Arc<Channel>>,
}

impl ChannelTable {
    fn register(&mut self, channel: Arc<Channel>) {
        self.ordered.push(Arc::clone(&channel));
        if let Some(name) = channel.name() {
            let _ = self.app_by_name.insert(name.to_string(), Arc::clone(&channel));
        }
        let _ = self.by_id.insert(channel.id().clone(), channel);
    }
}

/// Registry of all channels and mediator of every membership change.
pub struct ChannelHandler {
    registry: Arc<dyn WindowRegistry>,
    channels: RwLock<ChannelTable>,
    on_channel_changed: Signal<ChannelChange>,
}

impl ChannelHandler {
    /// Create a handler over the given window registry, pre-provisioned
    /// with the system channels (registration order is preserved).
    ///
    /// Call [`attach`](Self::attach) afterwards to wire the reactive
    /// window-lifecycle handlers.
    #[must_use]
    pub fn new(
        registry: Arc<dyn WindowRegistry>,
        system_channels: Vec<Arc<Channel>>,
    ) -> Arc<Self> {
        let mut table = ChannelTable::default();
        for channel in system_channels {
            debug!(channel = %channel.id(), "registering system channel");
            table.register(channel);
        }
        Arc::new(Self {
            registry,
            channels: RwLock::new(table),
            on_channel_changed: Signal::new(),
        })
    }

    /// Subscribe the reactive handlers to the registry's lifecycle signals.
    ///
    /// Holds only weak self-references, so the handler can be dropped even
    /// while subscribed.
    pub fn attach(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let _ = self.registry.on_window_added().subscribe_fn(move |window: Arc<Window>| {
            let weak = Weak::clone(&weak);
            Box::pin(async move {
                if let Some(handler) = weak.upgrade() {
                    handler.handle_window_added(&window).await;
                }
                Ok(())
            })
        });

        let weak = Arc::downgrade(self);
        let _ = self.registry.on_window_removed().subscribe_fn(move |window: Arc<Window>| {
            let weak = Weak::clone(&weak);
            Box::pin(async move {
                if let Some(handler) = weak.upgrade() {
                    handler.handle_window_removed(&window).await;
                }
                Ok(())
            })
        });
    }

    /// The channel-changed notification stream.
    ///
    /// One emission per membership-changing event, in emission order;
    /// never fires for no-op joins.
    #[must_use]
    pub fn on_channel_changed(&self) -> &Signal<ChannelChange> {
        &self.on_channel_changed
    }

    /// All system channels, in registration order.
    #[must_use]
    pub fn system_channels(&self) -> Vec<Arc<Channel>> {
        self.channels
            .read()
            .ordered
            .iter()
            .filter(|c| c.kind() == ChannelKind::System)
            .cloned()
            .collect()
    }

    /// The app channel for `name`, created and registered on first request.
    ///
    /// Idempotent by name: repeated calls return the identical instance.
    #[must_use]
    pub fn app_channel_by_name(&self, name: &str) -> Arc<Channel> {
        let mut table = self.channels.write();
        if let Some(existing) = table.app_by_name.get(name) {
            return Arc::clone(existing);
        }
        let channel = Channel::app(name);
        debug!(channel = %channel.id(), name, "created app channel");
        table.register(Arc::clone(&channel));
        channel
    }

    /// The channel with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::NotFound`] when no channel is registered
    /// under `id`.
    pub fn channel_by_id(&self, id: &ChannelId) -> Result<Arc<Channel>> {
        self.channels
            .read()
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| ChannelError::NotFound { id: id.clone() })
    }

    /// The channel's cached last-broadcast context. Pure read.
    #[must_use]
    pub fn channel_context(&self, channel: &Channel) -> Option<Context> {
        channel.last_broadcast()
    }

    /// All windows currently assigned to `channel`, in registry iteration
    /// order. Always derived from the live window set.
    #[must_use]
    pub fn channel_members(&self, channel: &Channel) -> Vec<Arc<Window>> {
        self.registry
            .windows()
            .into_iter()
            .filter(|w| w.channel().id() == channel.id())
            .collect()
    }

    /// All windows listening for `event_type` on `channel`.
    ///
    /// Not filtered by membership: a non-member can listen, a member need
    /// not listen.
    #[must_use]
    pub fn windows_listening(&self, channel: &Channel, event_type: &str) -> Vec<Arc<Window>> {
        self.registry
            .windows()
            .into_iter()
            .filter(|w| w.has_channel_event_listener(channel, event_type))
            .collect()
    }

    /// Cache `context` as the channel's last broadcast — only if the
    /// channel currently has at least one member.
    ///
    /// Caching on an empty channel would leak stale state to the next
    /// joiner, so the empty case is a no-op (the cache is left untouched).
    pub fn set_last_broadcast(&self, channel: &Channel, context: Context) {
        if self.channel_members(channel).is_empty() {
            debug!(channel = %channel.id(), "ignoring broadcast cache on empty channel");
            return;
        }
        channel.set_last_broadcast(Some(context));
    }

    /// Move `window` onto `channel`.
    ///
    /// A join onto the window's current channel is a true no-op: no state
    /// change, no notification. Otherwise the window is reassigned, the
    /// vacated channel's cache is cleared if it emptied, and exactly one
    /// notification `(window, new, previous)` is emitted.
    pub async fn join_channel(&self, window: &Arc<Window>, channel: &Arc<Channel>) {
        let previous = window.channel();
        if previous.id() == channel.id() {
            return;
        }

        window.set_channel(Arc::clone(channel));
        debug!(
            window = %window.id(),
            from = %previous.id(),
            to = %channel.id(),
            "window joined channel"
        );

        if self.channel_members(&previous).is_empty() {
            previous.set_last_broadcast(None);
        }

        let change =
            ChannelChange::now(window, Some(Arc::clone(channel)), Some(previous));
        self.on_channel_changed.emit(&change).await;
    }

    /// Reactive handler: a window appeared in the registry.
    ///
    /// Emits `(window, window.channel, None)` — a newly appeared window
    /// has no prior state here, so the previous channel is always `None`.
    async fn handle_window_added(&self, window: &Arc<Window>) {
        let change = ChannelChange::now(window, Some(window.channel()), None);
        self.on_channel_changed.emit(&change).await;
    }

    /// Reactive handler: a window left the registry.
    ///
    /// Clears the vacated channel's cache if its membership reached zero,
    /// then emits `(window, None, channel)`.
    async fn handle_window_removed(&self, window: &Arc<Window>) {
        let vacated = window.channel();
        if self.channel_members(&vacated).is_empty() {
            vacated.set_last_broadcast(None);
        }
        let change = ChannelChange::now(window, None, Some(vacated));
        self.on_channel_changed.emit(&change).await;
    }
}

impl std::fmt::Debug for ChannelHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelHandler")
            .field("channel_count", &self.channels.read().ordered.len())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
