//! Host picker-surface traits.
//!
//! The host owns the picker UI: Transom only issues lifecycle and
//! visibility commands and exchanges request/response messages. Both seams
//! are async traits injected into the
//! [`ResolutionHandler`](crate::handler::ResolutionHandler) at
//! construction.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::errors::Result;
use crate::types::{ResolveRequest, ResolveResponse, SurfaceHandle, SurfaceIdentity};

/// Host windowing primitives for the singleton picker surface.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PickerHost: Send + Sync {
    /// Find an existing surface under the well-known identity, if one
    /// survives from an earlier process lifetime.
    async fn find_surface(&self, identity: &SurfaceIdentity) -> Option<SurfaceHandle>;

    /// Close a surface instance.
    async fn close_surface(&self, surface: &SurfaceHandle) -> Result<()>;

    /// Create a fresh surface under the well-known identity.
    async fn create_surface(&self, identity: &SurfaceIdentity) -> Result<SurfaceHandle>;

    /// Make the surface visible.
    async fn show(&self, surface: &SurfaceHandle) -> Result<()>;

    /// Bring the surface to the foreground.
    async fn focus(&self, surface: &SurfaceHandle) -> Result<()>;

    /// Hide the surface.
    async fn hide(&self, surface: &SurfaceHandle) -> Result<()>;

    /// Establish the point-to-point message channel to the surface.
    async fn open_channel(&self, surface: &SurfaceHandle) -> Result<Box<dyn PickerChannel>>;
}

/// Point-to-point message channel to the picker surface.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PickerChannel: Send + Sync {
    /// Send a resolve request and await the user's response.
    async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveResponse>;
}
