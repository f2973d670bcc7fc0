//! Outcome - the normalized result of attempting to execute one intent.
//!
//! Capabilities return heterogeneous shapes (flags, status maps, arbitrary
//! payloads); the Executor collapses all of them into exactly one of these
//! three variants at its boundary. Nothing downstream of the Executor ever
//! inspects a raw capability return.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tool::ToolName;

/// Normalized result of executing one intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The capability completed; `payload` is opaque success data.
    Success {
        tool: Option<ToolName>,
        payload: Value,
    },
    /// Multiple valid targets exist; the chain pauses until one is chosen.
    NeedsConfirmation {
        tool: ToolName,
        request: ConfirmationRequest,
    },
    /// The capability failed or could not be dispatched.
    Error {
        tool: Option<ToolName>,
        detail: String,
    },
}

impl Outcome {
    /// Creates a success outcome.
    pub fn success(tool: Option<ToolName>, payload: Value) -> Self {
        Outcome::Success { tool, payload }
    }

    /// Creates an error outcome.
    pub fn error(tool: Option<ToolName>, detail: impl Into<String>) -> Self {
        Outcome::Error {
            tool,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Outcome::NeedsConfirmation { .. })
    }
}

/// One selectable resolution for an ambiguous target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationOption {
    /// Human-readable label shown to the user.
    pub label: String,
    /// Opaque resolution value the capability understands.
    pub resolution_key: String,
}

impl ConfirmationOption {
    pub fn new(label: impl Into<String>, resolution_key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            resolution_key: resolution_key.into(),
        }
    }
}

/// Disambiguation request attached to a `NeedsConfirmation` outcome.
///
/// Invariant: `options` is never empty; construction enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    /// Ambiguity domain key, e.g. `"folder::downloads"`. Preference records
    /// are stored and recalled under this key.
    pub key: String,
    /// Name of the intent argument the chosen resolution fills.
    pub arg: String,
    /// Ordered, non-empty list of candidate resolutions.
    pub options: Vec<ConfirmationOption>,
}

impl ConfirmationRequest {
    /// Creates a request; returns `None` when the options list is empty.
    pub fn new(
        key: impl Into<String>,
        arg: impl Into<String>,
        options: Vec<ConfirmationOption>,
    ) -> Option<Self> {
        if options.is_empty() {
            return None;
        }
        Some(Self {
            key: key.into(),
            arg: arg.into(),
            options,
        })
    }

    /// Options whose resolution key matches a previously stored value.
    pub fn options_matching<'a>(&'a self, value: &str) -> Vec<&'a ConfirmationOption> {
        self.options
            .iter()
            .filter(|option| option.resolution_key == value)
            .collect()
    }

    /// True if `resolution_key` is one of the offered options.
    pub fn offers(&self, resolution_key: &str) -> bool {
        self.options
            .iter()
            .any(|option| option.resolution_key == resolution_key)
    }
}
