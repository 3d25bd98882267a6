//! # transom-settings
//!
//! Configuration management with layered sources for the Transom agent.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`TransomSettings::default()`]
//! 2. **User file** — `~/.transom/settings.json` (deep-merged over
//!    defaults)
//! 3. **Environment variables** — `TRANSOM_*` overrides (highest priority)
//!
//! The system-channel provisioning list lives here: the composition root
//! reads [`ChannelSettings::system`] at startup to create the well-known
//! channels.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton.
static SETTINGS: OnceLock<TransomSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.transom/settings.json` with env
/// var overrides. On subsequent calls, returns the cached value. If
/// loading fails, returns compiled defaults.
pub fn get_settings() -> &'static TransomSettings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}

/// Initialize the global settings with a specific value.
///
/// # Errors
///
/// Returns the provided settings back if the global was already
/// initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: TransomSettings) -> std::result::Result<(), TransomSettings> {
    SETTINGS.set(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = TransomSettings::default();
        let _path = settings_path();
    }

    #[test]
    fn default_settings_are_valid() {
        let settings = TransomSettings::default();
        assert_eq!(settings.version, "0.1.0");
        assert_eq!(settings.name, "transom");
        assert_eq!(settings.channels.default_channel, "default");
        assert_eq!(settings.resolver.response_timeout_ms, 60_000);
        assert_eq!(settings.logging.level, "info");
    }
}
