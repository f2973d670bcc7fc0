//! Scripted capabilities for tests.
//!
//! The real automation primitives live outside this crate; tests (and the
//! examples in DESIGN.md) register these stand-ins instead. `Scripted`
//! replays a queue of returns, `Recording` additionally captures the
//! arguments it was invoked with, and `Static` always answers the same.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::ToolArgs;
use crate::ports::{CapabilityError, ToolCapability, ToolReturn};

/// Capability that replays scripted returns in order, failing once the
/// script runs out.
pub struct ScriptedCapability {
    returns: Mutex<VecDeque<Result<ToolReturn, CapabilityError>>>,
}

impl ScriptedCapability {
    pub fn new() -> Self {
        Self {
            returns: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues a return value.
    pub fn push(&self, value: ToolReturn) {
        self.returns.lock().unwrap().push_back(Ok(value));
    }

    /// Queues a fault.
    pub fn push_fault(&self, error: CapabilityError) {
        self.returns.lock().unwrap().push_back(Err(error));
    }
}

impl Default for ScriptedCapability {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolCapability for ScriptedCapability {
    async fn invoke(&self, _args: &ToolArgs) -> Result<ToolReturn, CapabilityError> {
        self.returns
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CapabilityError::fault("script exhausted")))
    }
}

/// Capability that records every invocation's arguments and always returns a
/// fixed value.
pub struct RecordingCapability {
    result: ToolReturn,
    calls: Mutex<Vec<ToolArgs>>,
}

impl RecordingCapability {
    pub fn new(result: ToolReturn) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Arguments from every invocation so far, in order.
    pub fn calls(&self) -> Vec<ToolArgs> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times the capability was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ToolCapability for RecordingCapability {
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolReturn, CapabilityError> {
        self.calls.lock().unwrap().push(args.clone());
        Ok(self.result.clone())
    }
}

/// Capability that always answers with the same return.
pub struct StaticCapability {
    result: ToolReturn,
}

impl StaticCapability {
    pub fn new(result: ToolReturn) -> Self {
        Self { result }
    }
}

#[async_trait]
impl ToolCapability for StaticCapability {
    async fn invoke(&self, _args: &ToolArgs) -> Result<ToolReturn, CapabilityError> {
        Ok(self.result.clone())
    }
}
