//! Capability adapters for tests and embedding layers.

mod scripted;

pub use scripted::{RecordingCapability, ScriptedCapability, StaticCapability};
