//! Resolution payload types.
//!
//! Wire shapes use camelCase field names to match the JSON the picker
//! surface exchanges with the host.

use serde::{Deserialize, Serialize};

use transom_core::{AppId, Context};

/// A raised intent awaiting resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Intent name (e.g. `"ViewChart"`).
    pub name: String,
    /// Context the intent was raised with, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

/// One application candidate offered to the user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppIdentifier {
    /// Application ID from the app directory.
    pub app_id: AppId,
    /// Display title, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Request payload sent to the picker surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// The intent being resolved.
    pub intent: Intent,
    /// Candidate applications for the user to choose from.
    pub candidate_applications: Vec<AppIdentifier>,
}

/// Response payload from the picker surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    /// The user's choice; `None` when dismissed without a selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_application: Option<AppIdentifier>,
}

/// Settled outcome of an intent resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The user picked an application.
    Selected(AppIdentifier),
    /// The resolution was dismissed, failed, or returned no selection.
    Cancelled,
}

/// Fixed, well-known identity of the singleton picker surface.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceIdentity(String);

impl SurfaceIdentity {
    /// Create an identity from its well-known name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identity name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SurfaceIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SurfaceIdentity {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Host-issued opaque handle to a picker surface instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(String);

impl SurfaceHandle {
    /// Wrap a host-issued handle value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The handle value.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolve_request_wire_shape() {
        let request = ResolveRequest {
            intent: Intent {
                name: "ViewChart".into(),
                context: Some(Context::new("instrument").with_field("ticker", "AAPL")),
            },
            candidate_applications: vec![AppIdentifier {
                app_id: AppId::from("charts"),
                title: Some("Charts".into()),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "intent": {
                    "name": "ViewChart",
                    "context": {"type": "instrument", "ticker": "AAPL"}
                },
                "candidateApplications": [
                    {"appId": "charts", "title": "Charts"}
                ]
            })
        );
    }

    #[test]
    fn resolve_response_with_selection() {
        let response: ResolveResponse =
            serde_json::from_value(json!({"selectedApplication": {"appId": "charts"}})).unwrap();
        assert_eq!(
            response.selected_application.unwrap().app_id.as_str(),
            "charts"
        );
    }

    #[test]
    fn resolve_response_empty_selection() {
        let response: ResolveResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.selected_application.is_none());
        let json = serde_json::to_value(&ResolveResponse {
            selected_application: None,
        })
        .unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn intent_without_context_omits_field() {
        let intent = Intent {
            name: "StartChat".into(),
            context: None,
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert!(json.get("context").is_none());
    }

    #[test]
    fn surface_identity_display() {
        let identity = SurfaceIdentity::from("transom-resolver");
        assert_eq!(identity.as_str(), "transom-resolver");
        assert_eq!(format!("{identity}"), "transom-resolver");
    }

    #[test]
    fn surface_handle_display() {
        let handle = SurfaceHandle::new("surface-7");
        assert_eq!(handle.id(), "surface-7");
        assert_eq!(format!("{handle}"), "surface-7");
    }
}
