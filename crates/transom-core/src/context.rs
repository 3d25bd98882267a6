//! The opaque context payload broadcast to channel members.
//!
//! A [`Context`] is a tagged JSON payload: a required `type` discriminator
//! plus arbitrary additional fields. Transom never interprets the payload —
//! it only caches and delivers it. The JSON wire shape keeps the tag inline
//! (`{"type": "contact", "name": "Jane", ...}`), matching what application
//! windows exchange with the host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque, tagged context payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// The context type tag (e.g. `"contact"`, `"instrument"`).
    #[serde(rename = "type")]
    context_type: String,

    /// Remaining payload fields, untouched by Transom.
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Context {
    /// Create a context with the given type tag and no extra fields.
    #[must_use]
    pub fn new(context_type: impl Into<String>) -> Self {
        Self {
            context_type: context_type.into(),
            fields: Map::new(),
        }
    }

    /// Add or replace a payload field (builder style).
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.fields.insert(key.into(), value.into());
        self
    }

    /// The context type tag.
    #[must_use]
    pub fn context_type(&self) -> &str {
        &self.context_type
    }

    /// Look up a payload field by key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All payload fields (excluding the type tag).
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
