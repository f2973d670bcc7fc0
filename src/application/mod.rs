//! Application layer: resolution, execution, and orchestration.
//!
//! The flow is splitter → cascade → chain runner, with the pipeline facade
//! tying them together behind the [`PipelineResponse`] contract.
//!
//! [`PipelineResponse`]: crate::domain::PipelineResponse

pub mod cascade;
pub mod catalog;
pub mod chat;
pub mod executor;
pub mod extract;
pub mod generative;
pub mod pipeline;
pub mod registry;
pub mod rules;
pub mod runner;
pub mod semantic;
pub mod splitter;

pub use cascade::ResolverCascade;
pub use chat::ChatEngine;
pub use executor::Executor;
pub use generative::GenerativeClassifier;
pub use pipeline::Pipeline;
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use rules::RuleMatcher;
pub use runner::{ChainRunner, ChainVerdict};
pub use semantic::SemanticClassifier;
