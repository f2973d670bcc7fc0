//! Chat Engine - conversational fallback that guarantees cascade totality.
//!
//! When no stage resolved a tool, the segment becomes a chat turn. A backend
//! failure here degrades to a canned reply instead of an error; the cascade
//! must always hand back something usable.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::ports::{GenerationRequest, GenerativeProvider};

const DEGRADED_REPLY: &str =
    "I couldn't reach the language model just now. Please try again in a moment.";

/// Conversational reply generator.
pub struct ChatEngine {
    provider: Arc<dyn GenerativeProvider>,
    timeout: Duration,
}

impl ChatEngine {
    pub fn new(provider: Arc<dyn GenerativeProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Produces a reply for the raw text. Never fails; degrades instead.
    pub async fn reply(&self, text: &str) -> String {
        let prompt = format!(
            "You are Deskpilot, a friendly, concise desktop assistant.\n\
             Respond naturally like a human.\n\n\
             User: {}\nAssistant:",
            text
        );

        let request = GenerationRequest::new(prompt).with_timeout(self.timeout);

        match self.provider.generate(request).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => DEGRADED_REPLY.to_string(),
            Err(err) => {
                warn!(stage = "chat", error = %err, "degraded chat reply");
                DEGRADED_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockGenerativeProvider;
    use crate::ports::AiError;

    #[tokio::test]
    async fn replies_with_backend_text() {
        let provider = Arc::new(MockGenerativeProvider::new());
        provider.push_response("  Hello! How can I help?  ");

        let engine = ChatEngine::new(provider, Duration::from_secs(120));
        assert_eq!(engine.reply("hi").await, "Hello! How can I help?");
    }

    #[tokio::test]
    async fn degrades_on_backend_failure() {
        let provider = Arc::new(MockGenerativeProvider::new());
        provider.push_error(AiError::unavailable("down"));

        let engine = ChatEngine::new(provider, Duration::from_secs(120));
        assert_eq!(engine.reply("hi").await, DEGRADED_REPLY);
    }

    #[tokio::test]
    async fn degrades_on_empty_reply() {
        let provider = Arc::new(MockGenerativeProvider::new());
        provider.push_response("   ");

        let engine = ChatEngine::new(provider, Duration::from_secs(120));
        assert_eq!(engine.reply("hi").await, DEGRADED_REPLY);
    }
}
