//! # transom-core
//!
//! Foundation types and utilities shared by all Transom crates:
//!
//! - **Branded IDs**: [`ChannelId`], [`WindowId`], [`AppId`] as newtypes
//!   for type safety
//! - **Context**: the opaque tagged payload broadcast to channel members
//! - **Signal**: the typed publish/subscribe primitive with sequential,
//!   failure-isolated delivery

#![deny(unsafe_code)]

pub mod context;
pub mod ids;
pub mod signal;

pub use context::Context;
pub use ids::{AppId, ChannelId, WindowId};
pub use signal::{Observer, ObserverError, Signal, SubscriptionId};
