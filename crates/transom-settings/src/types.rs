//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` to match the host's
//! JSON wire format. Each type implements [`Default`] with production
//! default values; `#[serde(default)]` allows partial JSON — missing
//! fields get their default during deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the Transom agent.
///
/// Loaded from `~/.transom/settings.json` with defaults applied for
/// missing fields. Environment variables can override specific values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransomSettings {
    /// Settings schema version.
    pub version: String,
    /// Agent name.
    pub name: String,
    /// Channel provisioning.
    pub channels: ChannelSettings,
    /// Intent resolver settings.
    pub resolver: ResolverSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for TransomSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "transom".to_string(),
            channels: ChannelSettings::default(),
            resolver: ResolverSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// One pre-provisioned system channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemChannelSpec {
    /// Fixed well-known channel ID.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Display color (hex string).
    pub color: String,
    /// Optional glyph identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
}

impl SystemChannelSpec {
    fn color_channel(slug: &str, name: &str, color: &str) -> Self {
        Self {
            id: format!("channel-{slug}"),
            name: name.to_string(),
            color: color.to_string(),
            glyph: Some(format!("swatch-{slug}")),
        }
    }
}

/// Channel provisioning settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelSettings {
    /// System channels created at startup, in registration order.
    pub system: Vec<SystemChannelSpec>,
    /// ID of the channel new windows start on. Must name one of the
    /// system specs.
    pub default_channel: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            system: vec![
                SystemChannelSpec {
                    id: "default".to_string(),
                    name: "Default".to_string(),
                    color: "#C4C4C4".to_string(),
                    glyph: None,
                },
                SystemChannelSpec::color_channel("red", "Red", "#E3342F"),
                SystemChannelSpec::color_channel("orange", "Orange", "#F6993F"),
                SystemChannelSpec::color_channel("yellow", "Yellow", "#FFED4A"),
                SystemChannelSpec::color_channel("green", "Green", "#38C172"),
                SystemChannelSpec::color_channel("cyan", "Cyan", "#4DC0B5"),
                SystemChannelSpec::color_channel("blue", "Blue", "#3490DC"),
                SystemChannelSpec::color_channel("purple", "Purple", "#9561E2"),
                SystemChannelSpec::color_channel("magenta", "Magenta", "#F66D9B"),
            ],
            default_channel: "default".to_string(),
        }
    }
}

/// Intent resolver settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverSettings {
    /// Well-known identity of the picker surface.
    pub surface_name: String,
    /// How long to wait for the picker's answer, in milliseconds.
    pub response_timeout_ms: u64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            surface_name: "transom-resolver".to_string(),
            response_timeout_ms: 60_000,
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter directive (overridable via `RUST_LOG`).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
