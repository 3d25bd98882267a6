//! Channel entity: identity, display metadata, and the broadcast cache.
//!
//! A channel is a named context-sharing group. System channels are
//! pre-provisioned at startup with fixed IDs and display metadata; app
//! channels are created lazily by name, exactly once per distinct name.
//!
//! The broadcast cache (`last_broadcast`) is mutable only through the
//! channel handler — every write is funneled through the membership
//! invariant checks there.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use transom_core::{ChannelId, Context};

/// Variant tag distinguishing pre-provisioned from on-demand channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Fixed well-known channel, created at startup, process-lifetime.
    System,
    /// Channel created on demand the first time its name is requested.
    App,
}

/// Display metadata carried by system channels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayMetadata {
    /// Human-readable channel name.
    pub name: String,
    /// Display color (hex string).
    pub color: String,
    /// Optional glyph identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
}

/// A named context-sharing group.
///
/// Identity is the [`ChannelId`], unique and immutable after creation.
/// Membership is never stored here — it is always derived by the handler
/// from the live window set.
pub struct Channel {
    id: ChannelId,
    kind: ChannelKind,
    /// Creation name for app channels (the by-name lookup key).
    name: Option<String>,
    metadata: Option<DisplayMetadata>,
    last_broadcast: RwLock<Option<Context>>,
}

impl Channel {
    /// Create a pre-provisioned system channel.
    #[must_use]
    pub fn system(id: ChannelId, metadata: DisplayMetadata) -> Arc<Self> {
        Arc::new(Self {
            id,
            kind: ChannelKind::System,
            name: None,
            metadata: Some(metadata),
            last_broadcast: RwLock::new(None),
        })
    }

    /// Create an app channel for the given name with a fresh ID.
    #[must_use]
    pub(crate) fn app(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: ChannelId::new(),
            kind: ChannelKind::App,
            name: Some(name.into()),
            metadata: None,
            last_broadcast: RwLock::new(None),
        })
    }

    /// The channel's unique ID.
    #[must_use]
    pub fn id(&self) -> &ChannelId {
        &self.id
    }

    /// The channel kind.
    #[must_use]
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// The creation name (app channels only).
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Display metadata (system channels only).
    #[must_use]
    pub fn metadata(&self) -> Option<&DisplayMetadata> {
        self.metadata.as_ref()
    }

    /// The cached context from the most recent broadcast, if any.
    #[must_use]
    pub fn last_broadcast(&self) -> Option<Context> {
        self.last_broadcast.read().clone()
    }

    /// Overwrite the broadcast cache.
    ///
    /// Crate-private: all writes go through the handler, which enforces
    /// the membership invariants.
    pub(crate) fn set_last_broadcast(&self, context: Option<Context>) {
        *self.last_broadcast.write() = context;
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
