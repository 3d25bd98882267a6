//! Window registry boundary.
//!
//! The registry is the source of truth for live windows and their lifecycle.
//! The channel handler consumes it through the [`WindowRegistry`] trait —
//! a single constructor-passed reference, never an ambient lookup — and
//! reacts to the add/remove signals.
//!
//! [`WindowStore`] is the in-memory implementation used by the composition
//! root and tests. Removal unregisters the window **before** the removed
//! signal fires, so membership recomputation during notification no longer
//! counts the departing window; the window object itself stays alive and
//! queryable (its pre-removal channel is readable) for the duration of
//! delivery.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use transom_core::{AppId, Signal, WindowId};

use crate::channel::Channel;
use crate::window::Window;

/// Source of truth for all live windows.
pub trait WindowRegistry: Send + Sync {
    /// All live windows in stable registry iteration order.
    fn windows(&self) -> Vec<Arc<Window>>;

    /// Fires once per window after it is fully constructed and registered.
    fn on_window_added(&self) -> &Signal<Arc<Window>>;

    /// Fires once per window at removal, after unregistration but while the
    /// window is still queryable.
    fn on_window_removed(&self) -> &Signal<Arc<Window>>;
}

/// In-memory window registry with insertion-ordered iteration.
pub struct WindowStore {
    windows: RwLock<Vec<Arc<Window>>>,
    window_added: Signal<Arc<Window>>,
    window_removed: Signal<Arc<Window>>,
}

impl WindowStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            windows: RwLock::new(Vec::new()),
            window_added: Signal::new(),
            window_removed: Signal::new(),
        }
    }

    /// Open a new window on the given (default) channel.
    ///
    /// Registers the window, then emits the window-added signal.
    pub async fn open_window(&self, app_id: AppId, channel: Arc<Channel>) -> Arc<Window> {
        let window = Window::new(app_id, channel);
        self.windows.write().push(Arc::clone(&window));
        debug!(window = %window.id(), app = %window.app_id(), "window opened");
        self.window_added.emit(&window).await;
        window
    }

    /// Close a window by ID.
    ///
    /// Unregisters the window, then emits the window-removed signal with
    /// the (still readable) window handle. Returns `false` if no such
    /// window exists.
    pub async fn close_window(&self, id: &WindowId) -> bool {
        let removed = {
            let mut windows = self.windows.write();
            match windows.iter().position(|w| w.id() == id) {
                Some(index) => Some(windows.remove(index)),
                None => None,
            }
        };
        match removed {
            Some(window) => {
                debug!(window = %window.id(), "window closed");
                self.window_removed.emit(&window).await;
                true
            }
            None => false,
        }
    }

    /// Number of live windows.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.read().len()
    }
}

impl WindowRegistry for WindowStore {
    fn windows(&self) -> Vec<Arc<Window>> {
        self.windows.read().clone()
    }

    fn on_window_added(&self) -> &Signal<Arc<Window>> {
        &self.window_added
    }

    fn on_window_removed(&self) -> &Signal<Arc<Window>> {
        &self.window_removed
    }
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WindowStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowStore")
            .field("window_count", &self.window_count())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
