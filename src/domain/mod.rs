//! Domain layer: the pipeline's value types and chain state.
//!
//! Pure types only; no I/O, no clocks, no external services. The application
//! layer drives these, and the ports/adapters layers shuttle them across
//! process boundaries.

mod chain;
mod intent;
mod outcome;
mod response;
mod tool;

pub use chain::{Chain, PausedChain};
pub use intent::{ArgValue, Intent, ToolArgs};
pub use outcome::{ConfirmationOption, ConfirmationRequest, Outcome};
pub use response::PipelineResponse;
pub use tool::{ArgContract, ToolName, UnknownToolError};
