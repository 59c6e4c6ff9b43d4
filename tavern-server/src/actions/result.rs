//! Action results.

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// Why a non-fatal action failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Level, energy or state precondition not met.
    RequirementsNotMet,
    /// Unknown action or enemy id.
    NotFound,
}

impl FailureKind {
    /// HTTP status a transport layer would answer with.
    pub fn status_code(self) -> u16 {
        match self {
            FailureKind::RequirementsNotMet => 403,
            FailureKind::NotFound => 404,
        }
    }
}

/// Outcome of one action, as reported to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    /// Whether the action achieved its effect.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Classification of a rejected action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Action-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<Map<String, Value>>,
}

impl ActionResult {
    /// Successful result.
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            failure: None,
            extra_data: None,
        }
    }

    /// Failed result without a rejection class: the action ran but did not
    /// achieve its goal (a lost fight).
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::succeeded(message)
        }
    }

    /// Rejected because a precondition does not hold.
    pub fn requirements_not_met(message: impl Into<String>) -> Self {
        Self {
            failure: Some(FailureKind::RequirementsNotMet),
            ..Self::failed(message)
        }
    }

    /// Rejected because something referenced does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            failure: Some(FailureKind::NotFound),
            ..Self::failed(message)
        }
    }

    /// Attach a payload entry.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra_data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Payload entry by key.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra_data.as_ref().and_then(|m| m.get(key))
    }
}

// =============================================================================
// TESTS
// =============================================================================
