//! Tool Registry - the static name-to-capability table.
//!
//! Built once at process start and immutable thereafter. Lookups are by
//! [`ToolName`], so an unknown wire name is already rejected at parse time;
//! a registered name missing a capability is the one remaining dispatch
//! error, and the Executor reports it without invoking anything.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::ToolName;
use crate::ports::ToolCapability;

/// Immutable capability table.
pub struct ToolRegistry {
    capabilities: HashMap<ToolName, Arc<dyn ToolCapability>>,
}

impl ToolRegistry {
    /// Starts building a registry.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder {
            capabilities: HashMap::new(),
        }
    }

    /// Looks up the capability for a tool.
    pub fn get(&self, tool: ToolName) -> Option<&Arc<dyn ToolCapability>> {
        self.capabilities.get(&tool)
    }

    /// True if a capability is registered for the tool.
    pub fn contains(&self, tool: ToolName) -> bool {
        self.capabilities.contains_key(&tool)
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

/// Builder consumed by [`ToolRegistry`] construction.
pub struct ToolRegistryBuilder {
    capabilities: HashMap<ToolName, Arc<dyn ToolCapability>>,
}

impl ToolRegistryBuilder {
    /// Registers a capability, replacing any previous registration for the
    /// same tool.
    pub fn register(mut self, tool: ToolName, capability: Arc<dyn ToolCapability>) -> Self {
        self.capabilities.insert(tool, capability);
        self
    }

    /// Finalizes the immutable registry.
    pub fn build(self) -> ToolRegistry {
        ToolRegistry {
            capabilities: self.capabilities,
        }
    }
}
