//! Pipeline facade - the one entry point presentation layers talk to.
//!
//! Splits the raw input, resolves every segment through the cascade, and
//! either answers conversationally or drives the chain runner. Everything the
//! facade can say is a [`PipelineResponse`].

use std::sync::Arc;

use tracing::info;

use crate::adapters::{OllamaProvider, SqlitePreferenceStore};
use crate::config::AppConfig;
use crate::domain::{Chain, Intent, PausedChain, PipelineResponse};
use crate::ports::PreferenceStoreError;

use super::cascade::ResolverCascade;
use super::chat::ChatEngine;
use super::executor::Executor;
use super::generative::GenerativeClassifier;
use super::registry::ToolRegistry;
use super::rules::RuleMatcher;
use super::runner::{ChainRunner, ChainVerdict};
use super::semantic::SemanticClassifier;
use super::splitter;

pub struct Pipeline {
    cascade: ResolverCascade,
    runner: ChainRunner,
}

impl Pipeline {
    pub fn new(cascade: ResolverCascade, runner: ChainRunner) -> Self {
        Self { cascade, runner }
    }

    /// Wires a production pipeline: Ollama for both AI ports, SQLite for
    /// preferences, and the given capability registry.
    pub async fn from_config(
        config: &AppConfig,
        registry: ToolRegistry,
    ) -> Result<Self, PreferenceStoreError> {
        let provider = Arc::new(OllamaProvider::new(&config.llm));
        let screenshot_dir = config.paths.screenshot_dir.clone();

        let cascade = ResolverCascade::new(
            RuleMatcher::new(&screenshot_dir),
            SemanticClassifier::new(
                provider.clone(),
                config.classifier.similarity_threshold,
                &screenshot_dir,
            ),
            GenerativeClassifier::new(
                provider.clone(),
                config.llm.generate_timeout(),
                &screenshot_dir,
            ),
            ChatEngine::new(provider, config.llm.chat_timeout()),
        );

        let preferences = Arc::new(SqlitePreferenceStore::connect(&config.database.url).await?);
        let runner = ChainRunner::new(Executor::new(registry), preferences);
        Ok(Self::new(cascade, runner))
    }

    /// Handles one raw input end to end.
    pub async fn process(&self, input: &str) -> PipelineResponse {
        let intents = match self.resolve(input).await {
            Ok(intents) => intents,
            Err(response) => return response,
        };

        // A lone conversational segment answers directly; nothing executes.
        if let [Intent::Chat { reply, .. }] = intents.as_slice() {
            return PipelineResponse::chat(reply.clone());
        }

        info!(steps = intents.len(), "running chain");
        self.verdict_response(self.runner.run(Chain::new(intents)).await)
    }

    /// Resolution preview: what `process` would execute, without executing.
    pub async fn plan(&self, input: &str) -> PipelineResponse {
        match self.resolve(input).await {
            Ok(intents) => PipelineResponse::Chain { intents },
            Err(response) => response,
        }
    }

    /// Continues a paused chain with the user's choice.
    pub async fn resume(&self, paused: PausedChain, choice: &str) -> PipelineResponse {
        self.verdict_response(self.runner.resume(paused, choice).await)
    }

    /// Drops a paused chain without executing anything further.
    pub fn abandon(&self, paused: PausedChain) {
        self.runner.abandon(paused);
    }

    async fn resolve(&self, input: &str) -> Result<Vec<Intent>, PipelineResponse> {
        let segments = splitter::split(input);
        if segments.is_empty() {
            return Err(PipelineResponse::error("empty input"));
        }

        let mut intents = Vec::with_capacity(segments.len());
        for segment in &segments {
            intents.push(self.cascade.resolve(segment).await);
        }
        Ok(intents)
    }

    fn verdict_response(&self, verdict: ChainVerdict) -> PipelineResponse {
        match verdict {
            ChainVerdict::Completed { outcomes } => PipelineResponse::Success { results: outcomes },
            ChainVerdict::Paused { paused } => PipelineResponse::NeedsConfirmation {
                request: paused.request().clone(),
                paused,
            },
            ChainVerdict::Failed { index, detail, .. } => {
                PipelineResponse::error(format!("step {} failed: {}", index + 1, detail))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryPreferenceStore, MockEmbeddingProvider, MockGenerativeProvider, StaticCapability,
    };
    use crate::domain::ToolName;
    use crate::ports::ToolReturn;
    use std::sync::Arc;
    use std::time::Duration;

    fn pipeline(registry: ToolRegistry, generative: Arc<MockGenerativeProvider>) -> Pipeline {
        let embedder = Arc::new(MockEmbeddingProvider::new());
        embedder.fail_all();

        let cascade = ResolverCascade::new(
            RuleMatcher::new("data/screenshots"),
            SemanticClassifier::new(embedder, 0.78, "data/screenshots"),
            GenerativeClassifier::new(
                generative.clone(),
                Duration::from_secs(30),
                "data/screenshots",
            ),
            ChatEngine::new(generative, Duration::from_secs(120)),
        );
        let runner = ChainRunner::new(
            Executor::new(registry),
            Arc::new(InMemoryPreferenceStore::new()),
        );
        Pipeline::new(cascade, runner)
    }

    #[tokio::test]
    async fn empty_input_is_an_error() {
        let pipeline = pipeline(
            ToolRegistry::builder().build(),
            Arc::new(MockGenerativeProvider::new()),
        );
        assert!(matches!(
            pipeline.process("   ").await,
            PipelineResponse::Error { .. }
        ));
    }

    #[tokio::test]
    async fn lone_chat_segment_answers_without_executing() {
        let generative = Arc::new(MockGenerativeProvider::new());
        generative.push_response(r#"{"mode":"unknown"}"#);
        generative.push_response("Doing well, thanks!");
        let pipeline = pipeline(ToolRegistry::builder().build(), generative);

        match pipeline.process("how are you").await {
            PipelineResponse::Chat { message } => assert_eq!(message, "Doing well, thanks!"),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn rule_matched_command_executes_to_success() {
        let registry = ToolRegistry::builder()
            .register(
                ToolName::OpenFolderByName,
                Arc::new(StaticCapability::new(ToolReturn::ok())),
            )
            .build();
        let pipeline = pipeline(registry, Arc::new(MockGenerativeProvider::new()));

        match pipeline.process("open documents").await {
            PipelineResponse::Success { results } => assert_eq!(results.len(), 1),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_step_maps_to_error_with_position() {
        let registry = ToolRegistry::builder()
            .register(
                ToolName::OpenFolderByName,
                Arc::new(StaticCapability::new(ToolReturn::error("not found"))),
            )
            .build();
        let pipeline = pipeline(registry, Arc::new(MockGenerativeProvider::new()));

        match pipeline.process("open documents").await {
            PipelineResponse::Error { message } => {
                assert!(message.contains("step 1"));
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn plan_previews_without_executing() {
        let registry = ToolRegistry::builder()
            .register(
                ToolName::OpenFolderByName,
                Arc::new(StaticCapability::new(ToolReturn::error("must not run"))),
            )
            .build();
        let pipeline = pipeline(registry, Arc::new(MockGenerativeProvider::new()));

        match pipeline.plan("open documents then take a screenshot").await {
            PipelineResponse::Chain { intents } => {
                assert_eq!(intents.len(), 2);
                assert!(intents.iter().all(Intent::is_tool));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
