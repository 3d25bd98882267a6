//! # transom-channels
//!
//! The context-channel membership and broadcast-state registry.
//!
//! [`ChannelHandler`] tracks which windows belong to which named channel
//! and keeps each channel's last-broadcast context consistent as
//! membership changes. Every mutation — explicit
//! [`join_channel`](ChannelHandler::join_channel) or implicit via window
//! lifecycle events from the [`WindowRegistry`] — runs through the same
//! invariant-enforcing path and emits one [`ChannelChange`] notification.
//!
//! ## Invariants
//!
//! - Every window has exactly one non-null channel at all times.
//! - A channel's broadcast cache is non-null only while it has members;
//!   it is cleared the instant membership reaches zero.
//! - By-name app-channel lookup never yields two instances for one name.
//! - Membership is always derived from the live window set, never stored.

#![deny(unsafe_code)]

pub mod channel;
pub mod errors;
pub mod handler;
pub mod registry;
pub mod window;

pub use channel::{Channel, ChannelKind, DisplayMetadata};
pub use errors::{ChannelError, Result};
pub use handler::{ChannelChange, ChannelHandler};
pub use registry::{WindowRegistry, WindowStore};
pub use window::Window;
