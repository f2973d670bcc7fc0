//! Ports (interfaces) for external collaborators.
//!
//! Everything the pipeline needs from the outside world crosses one of these
//! traits: the generative/embedding backends, the automation capabilities,
//! and preference persistence. Adapters provide the implementations.

mod ai_provider;
mod capability;
mod preference_store;

pub use ai_provider::{AiError, EmbeddingProvider, GenerationRequest, GenerativeProvider};
pub use capability::{CapabilityError, StatusReturn, ToolCapability, ToolReturn};
pub use preference_store::{PreferenceRecord, PreferenceStore, PreferenceStoreError};
