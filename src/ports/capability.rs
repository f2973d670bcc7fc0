//! Tool Capability Port - interface for the automation primitives.
//!
//! The concrete primitives (keystroke injection, process launch, file search,
//! browser opening, document generation) live outside this crate; they plug in
//! behind this trait at registry construction time. The pipeline guarantees
//! consistent dispatch and outcome normalization, not that a capability is
//! idempotent or safe.
//!
//! # Return shape
//!
//! Capabilities historically returned ad hoc shapes (bare booleans, status
//! maps, arbitrary payloads). [`ToolReturn`] makes the shape explicit once at
//! the port, so the Executor normalizes in exactly one place instead of
//! inspecting values per call site.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{ConfirmationRequest, ToolArgs};

/// Port for one registered automation capability.
#[async_trait]
pub trait ToolCapability: Send + Sync {
    /// Invoke the capability with validated arguments.
    ///
    /// An `Err` is a capability fault; the Executor converts it to an error
    /// outcome and never lets it propagate.
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolReturn, CapabilityError>;
}

/// Explicit return shape of a capability invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolReturn {
    /// Bare completion flag.
    Flag(bool),
    /// Status map: a status string plus arbitrary fields.
    Status(StatusReturn),
    /// Arbitrary success payload.
    Payload(Value),
    /// No result at all.
    Empty,
}

impl ToolReturn {
    /// A plain "it worked" return.
    pub fn ok() -> Self {
        ToolReturn::Flag(true)
    }

    /// A status return with status `"executed"` and no extra fields.
    pub fn executed() -> Self {
        ToolReturn::Status(StatusReturn::new("executed"))
    }

    /// A status return asking for disambiguation.
    pub fn needs_confirmation(request: ConfirmationRequest) -> Self {
        ToolReturn::Status(StatusReturn::needs_confirmation(request))
    }

    /// A status return reporting failure.
    pub fn error(detail: impl Into<String>) -> Self {
        ToolReturn::Status(StatusReturn::error(detail))
    }
}

/// Status string plus free-form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReturn {
    pub status: String,
    pub fields: Map<String, Value>,
}

impl StatusReturn {
    /// Creates a status return with no extra fields.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            fields: Map::new(),
        }
    }

    /// Adds a field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Builds the `needs_confirmation` shape the Executor decodes: the
    /// request's key, target argument, and options embedded as fields.
    pub fn needs_confirmation(request: ConfirmationRequest) -> Self {
        let mut fields = Map::new();
        fields.insert("key".to_string(), Value::String(request.key));
        fields.insert("arg".to_string(), Value::String(request.arg));
        fields.insert(
            "options".to_string(),
            serde_json::to_value(request.options).unwrap_or(Value::Null),
        );
        Self {
            status: "needs_confirmation".to_string(),
            fields,
        }
    }

    /// Builds an error status with a detail message.
    pub fn error(detail: impl Into<String>) -> Self {
        Self::new("error").with_field("error", Value::String(detail.into()))
    }
}

/// Fault signaled by a capability during invocation.
#[derive(Debug, Clone, Error)]
pub enum CapabilityError {
    /// A declared argument was missing or had the wrong type.
    #[error("missing or invalid argument: {0}")]
    BadArgument(String),

    /// The capability failed while acting on the system.
    #[error("capability fault: {0}")]
    Fault(String),
}

impl CapabilityError {
    /// Creates a fault error.
    pub fn fault(message: impl Into<String>) -> Self {
        CapabilityError::Fault(message.into())
    }

    /// Creates a bad-argument error.
    pub fn bad_argument(name: impl Into<String>) -> Self {
        CapabilityError::BadArgument(name.into())
    }
}
