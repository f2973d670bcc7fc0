//! The response contract at the process boundary.
//!
//! This is the only shape presentation layers (web UI, CLI glue, voice
//! front-ends) are permitted to depend on. Everything the pipeline can say
//! reduces to one of these five variants.

use serde::{Deserialize, Serialize};

use super::chain::PausedChain;
use super::intent::Intent;
use super::outcome::{ConfirmationRequest, Outcome};

/// Tagged result returned by the pipeline facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineResponse {
    /// Conversational reply; no tool was dispatched.
    Chat { message: String },
    /// Resolution preview: the ordered intents a chain would execute.
    Chain { intents: Vec<Intent> },
    /// Execution paused on an ambiguous target. `paused` must be handed back
    /// verbatim to `resume` (or `abandon`).
    NeedsConfirmation {
        request: ConfirmationRequest,
        paused: PausedChain,
    },
    /// Every step completed; one outcome per executed intent.
    Success { results: Vec<Outcome> },
    /// The chain halted on a failed step, or the input was unusable.
    Error { message: String },
}

impl PipelineResponse {
    pub fn chat(message: impl Into<String>) -> Self {
        PipelineResponse::Chat {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PipelineResponse::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_with_type_tag() {
        let response = PipelineResponse::chat("hello");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "chat");
        assert_eq!(value["message"], "hello");

        let response = PipelineResponse::error("nope");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "error");
    }

    #[test]
    fn chain_preview_round_trips() {
        let response = PipelineResponse::Chain {
            intents: vec![Intent::unknown("gibberish")],
        };
        let json = serde_json::to_string(&response).unwrap();
        let back: PipelineResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}
