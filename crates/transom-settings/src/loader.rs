//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`TransomSettings::default()`]
//! 2. If `~/.transom/settings.json` exists, deep-merge user values over
//!    defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::TransomSettings;

/// Resolve the path to the settings file (`~/.transom/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".transom").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<TransomSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<TransomSettings> {
    let defaults = serde_json::to_value(TransomSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: TransomSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules; invalid values are logged and
/// ignored (falling back to file/default).
pub fn apply_env_overrides(settings: &mut TransomSettings) {
    if let Some(v) = read_env_string("TRANSOM_DEFAULT_CHANNEL") {
        settings.channels.default_channel = v;
    }
    if let Some(v) = read_env_string("TRANSOM_SURFACE_NAME") {
        settings.resolver.surface_name = v;
    }
    if let Some(v) = read_env_u64("TRANSOM_RESOLVER_TIMEOUT_MS", 100, 600_000) {
        settings.resolver.response_timeout_ms = v;
    }
    if let Some(v) = read_env_string("TRANSOM_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_simple_override() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": 10});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 10);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({
            "resolver": {"surfaceName": "transom-resolver", "responseTimeoutMs": 60_000}
        });
        let source = serde_json::json!({
            "resolver": {"responseTimeoutMs": 5000}
        });
        let merged = deep_merge(target, source);
        assert_eq!(merged["resolver"]["responseTimeoutMs"], 5000);
        assert_eq!(merged["resolver"]["surfaceName"], "transom-resolver");
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"system": [1, 2, 3]});
        let source = serde_json::json!({"system": [4]});
        let merged = deep_merge(target, source);
        assert_eq!(merged["system"], serde_json::json!([4]));
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
    }

    #[test]
    fn merge_new_keys_added() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"b": 2});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let path = Path::new("/nonexistent/settings.json");
        let settings = load_settings_from_path(path).unwrap();
        let defaults = TransomSettings::default();
        assert_eq!(settings.version, defaults.version);
        assert_eq!(settings.channels.system.len(), defaults.channels.system.len());
    }

    #[test]
    fn load_empty_json_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings, TransomSettings::default());
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"channels": {"defaultChannel": "channel-red"}, "resolver": {"responseTimeoutMs": 5000}}"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.channels.default_channel, "channel-red");
        assert_eq!(settings.resolver.response_timeout_ms, 5000);
        // Untouched sections keep their defaults.
        assert_eq!(settings.channels.system.len(), 9);
        assert_eq!(settings.resolver.surface_name, "transom-resolver");
    }

    #[test]
    fn load_replaces_system_channel_list_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r##"{"channels": {"system": [{"id": "only", "name": "Only", "color": "#000000"}], "defaultChannel": "only"}}"##,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.channels.system.len(), 1);
        assert_eq!(settings.channels.system[0].id, "only");
        assert!(settings.channels.system[0].glyph.is_none());
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result = load_settings_from_path(&path);
        assert!(matches!(result.unwrap_err(), SettingsError::Json(_)));
    }

    // ── parse_u64_range ─────────────────────────────────────────────

    #[test]
    fn parse_u64_valid() {
        assert_eq!(parse_u64_range("5000", 100, 600_000), Some(5000));
        assert_eq!(parse_u64_range("100", 100, 600_000), Some(100));
        assert_eq!(parse_u64_range("600000", 100, 600_000), Some(600_000));
    }

    #[test]
    fn parse_u64_out_of_range() {
        assert_eq!(parse_u64_range("99", 100, 600_000), None);
        assert_eq!(parse_u64_range("600001", 100, 600_000), None);
    }

    #[test]
    fn parse_u64_invalid() {
        assert_eq!(parse_u64_range("abc", 100, 600_000), None);
        assert_eq!(parse_u64_range("", 100, 600_000), None);
    }
}
