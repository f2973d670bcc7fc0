//! Resolver Cascade - rules, then similarity, then generation, then chat.
//!
//! The ordering is deliberate: cheapest and most deterministic first, most
//! expensive and least predictable last, with the chat fallback guaranteeing
//! that every input resolves to *some* intent. Stage failures never escape;
//! each stage miss simply advances the cascade.

use tracing::debug;

use crate::domain::Intent;

use super::chat::ChatEngine;
use super::generative::GenerativeClassifier;
use super::rules::RuleMatcher;
use super::semantic::SemanticClassifier;

/// Three-stage resolver with a total chat fallback.
pub struct ResolverCascade {
    rules: RuleMatcher,
    semantic: SemanticClassifier,
    generative: GenerativeClassifier,
    chat: ChatEngine,
}

impl ResolverCascade {
    pub fn new(
        rules: RuleMatcher,
        semantic: SemanticClassifier,
        generative: GenerativeClassifier,
        chat: ChatEngine,
    ) -> Self {
        Self {
            rules,
            semantic,
            generative,
            chat,
        }
    }

    /// Resolves one segment into an intent. Total: never fails, never
    /// returns `Unknown`.
    pub async fn resolve(&self, segment: &str) -> Intent {
        if let Some((tool, args)) = self.rules.matches(segment) {
            return Intent::tool(tool, args, segment);
        }

        if let Some((tool, args)) = self.semantic.classify(segment).await {
            return Intent::tool(tool, args, segment);
        }

        if let Some((tool, args)) = self.generative.classify(segment).await {
            return Intent::tool(tool, args, segment);
        }

        debug!(segment, "all stages missed; falling through to chat");
        let reply = self.chat.reply(segment).await;
        Intent::chat(reply, segment)
    }
}
