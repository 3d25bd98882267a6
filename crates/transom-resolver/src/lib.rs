//! # transom-resolver
//!
//! Intent resolution façade for the Transom agent.
//!
//! [`ResolutionHandler`] presents candidate applications on a
//! host-provided picker surface and returns the user's selection. The
//! host owns the UI; this crate only issues show/hide/foreground commands
//! and exchanges resolve request/response messages over the
//! [`PickerHost`] / [`PickerChannel`] seams.
//!
//! The contract with callers is best-effort: surface and transport
//! failures degrade to [`Resolution::Cancelled`] instead of propagating.

#![deny(unsafe_code)]

pub mod errors;
pub mod handler;
pub mod surface;
pub mod types;

pub use errors::{ResolverError, Result};
pub use handler::ResolutionHandler;
pub use surface::{PickerChannel, PickerHost};
pub use types::{
    AppIdentifier, Intent, Resolution, ResolveRequest, ResolveResponse, SurfaceHandle,
    SurfaceIdentity,
};
