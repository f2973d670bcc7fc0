//! Adapters: concrete implementations of the ports.
//!
//! - `ai` - Ollama client plus mock providers for tests
//! - `sqlite` - persistent preference store
//! - `memory` - in-memory preference store
//! - `capabilities` - scripted capabilities standing in for real automation

pub mod ai;
pub mod capabilities;
pub mod memory;
pub mod sqlite;

pub use ai::{MockEmbeddingProvider, MockGenerativeProvider, OllamaProvider};
pub use capabilities::{RecordingCapability, ScriptedCapability, StaticCapability};
pub use memory::InMemoryPreferenceStore;
pub use sqlite::SqlitePreferenceStore;
