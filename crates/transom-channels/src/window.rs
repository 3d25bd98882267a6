//! Window handle: channel assignment and listener registrations.
//!
//! Windows are owned by the window registry; the channel subsystem only
//! reads and (through the handler) writes the channel association. A window
//! always has exactly one non-null channel — the default channel at
//! creation if it never explicitly joined another.
//!
//! Listener registrations are independent of membership: a window may
//! listen for events on a channel it is not a member of, and a member need
//! not listen.

use parking_lot::RwLock;
use std::sync::Arc;

use transom_core::{AppId, ChannelId, WindowId};

use crate::channel::Channel;

/// One listener registration: interest in an event type on a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ListenerRegistration {
    channel: ChannelId,
    event_type: String,
}

/// An application view tracked by the window registry.
pub struct Window {
    id: WindowId,
    app_id: AppId,
    channel: RwLock<Arc<Channel>>,
    listeners: RwLock<Vec<ListenerRegistration>>,
}

impl Window {
    /// Create a window assigned to the given (default) channel.
    #[must_use]
    pub fn new(app_id: AppId, channel: Arc<Channel>) -> Arc<Self> {
        Arc::new(Self {
            id: WindowId::new(),
            app_id,
            channel: RwLock::new(channel),
            listeners: RwLock::new(Vec::new()),
        })
    }

    /// The window's unique ID.
    #[must_use]
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    /// The application this window belongs to.
    #[must_use]
    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// The channel this window is currently assigned to. Never null.
    #[must_use]
    pub fn channel(&self) -> Arc<Channel> {
        Arc::clone(&self.channel.read())
    }

    /// Reassign the window's channel.
    ///
    /// Crate-private: all membership mutation funnels through the channel
    /// handler.
    pub(crate) fn set_channel(&self, channel: Arc<Channel>) {
        *self.channel.write() = channel;
    }

    /// Register interest in an event type on a channel.
    ///
    /// Duplicate registrations are collapsed.
    pub fn add_channel_listener(&self, channel: &ChannelId, event_type: impl Into<String>) {
        let registration = ListenerRegistration {
            channel: channel.clone(),
            event_type: event_type.into(),
        };
        let mut listeners = self.listeners.write();
        if !listeners.contains(&registration) {
            listeners.push(registration);
        }
    }

    /// Remove a listener registration.
    ///
    /// Returns `true` if a registration existed and was removed.
    pub fn remove_channel_listener(&self, channel: &ChannelId, event_type: &str) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|r| !(r.channel == *channel && r.event_type == event_type));
        listeners.len() < before
    }

    /// Whether this window listens for the given event type on the given
    /// channel.
    ///
    /// Membership is not consulted: a non-member can listen, a member need
    /// not listen.
    #[must_use]
    pub fn has_channel_event_listener(&self, channel: &Channel, event_type: &str) -> bool {
        self.listeners
            .read()
            .iter()
            .any(|r| r.channel == *channel.id() && r.event_type == event_type)
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("app_id", &self.app_id)
            .field("channel", self.channel.read().id())
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelKind, DisplayMetadata};

    fn system_channel(id: &str) -> Arc<Channel> {
        Channel::system(
            ChannelId::from(id),
            DisplayMetadata {
                name: id.to_string(),
                color: "#000000".to_string(),
                glyph: None,
            },
        )
    }

    #[test]
    fn window_starts_on_given_channel() {
        let default = system_channel("default");
        let window = Window::new(AppId::from("chart"), Arc::clone(&default));
        assert_eq!(window.channel().id(), default.id());
        assert_eq!(window.channel().kind(), ChannelKind::System);
        assert_eq!(window.app_id().as_str(), "chart");
    }

    #[test]
    fn set_channel_reassigns() {
        let a = system_channel("a");
        let b = system_channel("b");
        let window = Window::new(AppId::from("chart"), a);
        window.set_channel(Arc::clone(&b));
        assert_eq!(window.channel().id(), b.id());
    }

    #[test]
    fn listener_predicate_matches_channel_and_event() {
        let red = system_channel("channel-red");
        let blue = system_channel("channel-blue");
        let window = Window::new(AppId::from("blotter"), Arc::clone(&red));

        window.add_channel_listener(blue.id(), "broadcast");

        // Listening on blue without being a member of it.
        assert!(window.has_channel_event_listener(&blue, "broadcast"));
        // Member of red but not listening there.
        assert!(!window.has_channel_event_listener(&red, "broadcast"));
        // Wrong event type.
        assert!(!window.has_channel_event_listener(&blue, "disconnect"));
    }

    #[test]
    fn duplicate_listener_registrations_collapse() {
        let red = system_channel("channel-red");
        let window = Window::new(AppId::from("blotter"), Arc::clone(&red));
        window.add_channel_listener(red.id(), "broadcast");
        window.add_channel_listener(red.id(), "broadcast");

        assert!(window.remove_channel_listener(red.id(), "broadcast"));
        // The collapsed registration is gone after one removal.
        assert!(!window.has_channel_event_listener(&red, "broadcast"));
        assert!(!window.remove_channel_listener(red.id(), "broadcast"));
    }

    #[test]
    fn windows_get_distinct_ids() {
        let channel = system_channel("default");
        let a = Window::new(AppId::from("x"), Arc::clone(&channel));
        let b = Window::new(AppId::from("x"), channel);
        assert_ne!(a.id(), b.id());
    }
}
