//! Chain Runner - sequential execution with pause, resume, and abandon.
//!
//! Steps run strictly in order and the chain fails fast: an error outcome
//! stops everything after it, unexecuted. A `needs_confirmation` outcome
//! pauses the chain into a serializable snapshot unless a stored preference
//! narrows the options to exactly one, in which case the choice is injected
//! and the step retried once. A second confirmation on the same step always
//! pauses; the runner never loops on a capability that keeps asking.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{ArgValue, Chain, ConfirmationRequest, Outcome, PausedChain};
use crate::ports::PreferenceStore;

use super::executor::Executor;

/// Terminal state of one `run`/`resume` call.
#[derive(Debug)]
pub enum ChainVerdict {
    /// Every remaining step succeeded.
    Completed { outcomes: Vec<Outcome> },
    /// Halted on disambiguation; the snapshot continues via `resume`.
    Paused { paused: PausedChain },
    /// A step failed; `outcomes` covers the steps executed before it.
    Failed {
        index: usize,
        detail: String,
        outcomes: Vec<Outcome>,
    },
}

/// Drives a chain through the executor.
pub struct ChainRunner {
    executor: Executor,
    preferences: Arc<dyn PreferenceStore>,
}

impl ChainRunner {
    pub fn new(executor: Executor, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            executor,
            preferences,
        }
    }

    /// Runs a fresh chain from its first step.
    pub async fn run(&self, chain: Chain) -> ChainVerdict {
        self.drive(chain, None).await
    }

    /// Resumes a paused chain with the user's choice. The choice is stored as
    /// a preference, injected into the paused step, and execution continues
    /// from that step.
    pub async fn resume(&self, paused: PausedChain, choice: &str) -> ChainVerdict {
        let (mut chain, request) = paused.into_parts();
        self.remember(&request.key, choice).await;
        chain.resolve_current_arg(&request.arg, ArgValue::Str(choice.to_string()));

        let injected = chain.next_index();
        info!(key = %request.key, index = injected, "resuming chain");
        self.drive(chain, Some(injected)).await
    }

    /// Discards a paused chain. Steps after the paused one never run.
    pub fn abandon(&self, paused: PausedChain) {
        info!(
            key = %paused.request().key,
            index = paused.paused_index(),
            "chain abandoned"
        );
    }

    /// The execution loop. `injected` marks a step that already had a choice
    /// applied; a confirmation from that step pauses instead of retrying.
    async fn drive(&self, mut chain: Chain, mut injected: Option<usize>) -> ChainVerdict {
        let mut outcomes = Vec::new();

        while let Some(intent) = chain.current() {
            let index = chain.next_index();
            let outcome = self.executor.execute(intent).await;

            match outcome {
                Outcome::Success { .. } => {
                    outcomes.push(outcome);
                    chain.advance();
                }
                Outcome::Error { ref detail, .. } => {
                    let detail = detail.clone();
                    outcomes.push(outcome);
                    info!(index, %detail, "chain failed fast");
                    return ChainVerdict::Failed {
                        index,
                        detail,
                        outcomes,
                    };
                }
                Outcome::NeedsConfirmation { request, .. } => {
                    if injected == Some(index) {
                        debug!(index, "step asked again after injection; pausing");
                        return ChainVerdict::Paused {
                            paused: PausedChain::new(chain, request),
                        };
                    }

                    match self.stored_choice(&request).await {
                        Some(value) => {
                            // Auto-applying counts as a confirmation.
                            self.remember(&request.key, &value).await;
                            chain.resolve_current_arg(
                                &request.arg,
                                ArgValue::Str(value.clone()),
                            );
                            injected = Some(index);
                            debug!(index, key = %request.key, "preference applied; retrying step");
                        }
                        None => {
                            return ChainVerdict::Paused {
                                paused: PausedChain::new(chain, request),
                            };
                        }
                    }
                }
            }
        }

        ChainVerdict::Completed { outcomes }
    }

    /// A stored preference short-circuits the pause only when it narrows the
    /// offered options to exactly one.
    async fn stored_choice(&self, request: &ConfirmationRequest) -> Option<String> {
        let record = match self.preferences.get(&request.key).await {
            Ok(record) => record?,
            Err(err) => {
                warn!(key = %request.key, error = %err, "preference lookup failed");
                return None;
            }
        };

        let matching = request.options_matching(&record.value);
        if matching.len() == 1 {
            Some(record.value)
        } else {
            None
        }
    }

    async fn remember(&self, key: &str, value: &str) {
        if let Err(err) = self.preferences.upsert(key, value).await {
            // Persistence is best-effort; the chain continues regardless.
            warn!(key, error = %err, "preference upsert failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryPreferenceStore, RecordingCapability, ScriptedCapability, StaticCapability,
    };
    use crate::application::registry::ToolRegistry;
    use crate::domain::{ConfirmationOption, Intent, ToolArgs, ToolName};
    use crate::ports::ToolReturn;

    fn downloads_request() -> ConfirmationRequest {
        ConfirmationRequest::new(
            "folder::downloads",
            "folder_name",
            vec![
                ConfirmationOption::new("C:\\Users\\me\\Downloads", "C:\\Users\\me\\Downloads"),
                ConfirmationOption::new("D:\\Downloads", "D:\\Downloads"),
            ],
        )
        .unwrap()
    }

    fn open_downloads() -> Intent {
        Intent::tool(
            ToolName::OpenFolderByName,
            ToolArgs::new().with_str("folder_name", "downloads"),
            "open downloads",
        )
    }

    fn runner_with(registry: ToolRegistry, store: Arc<InMemoryPreferenceStore>) -> ChainRunner {
        ChainRunner::new(Executor::new(registry), store)
    }

    #[tokio::test]
    async fn completes_when_every_step_succeeds() {
        let registry = ToolRegistry::builder()
            .register(ToolName::OpenApp, Arc::new(StaticCapability::new(ToolReturn::ok())))
            .register(ToolName::Wait, Arc::new(StaticCapability::new(ToolReturn::executed())))
            .build();
        let runner = runner_with(registry, Arc::new(InMemoryPreferenceStore::new()));

        let chain = Chain::new(vec![
            Intent::tool(
                ToolName::OpenApp,
                ToolArgs::new().with_str("app_name", "notepad"),
                "open notepad",
            ),
            Intent::tool(
                ToolName::Wait,
                ToolArgs::new().with_int("seconds", 2),
                "wait 2 seconds",
            ),
        ]);

        match runner.run(chain).await {
            ChainVerdict::Completed { outcomes } => {
                assert_eq!(outcomes.len(), 2);
                assert!(outcomes.iter().all(Outcome::is_success));
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
    }

    #[tokio::test]
    async fn fails_fast_and_skips_later_steps() {
        let recorder = Arc::new(RecordingCapability::new(ToolReturn::ok()));
        let registry = ToolRegistry::builder()
            .register(ToolName::OpenApp, Arc::new(StaticCapability::new(ToolReturn::ok())))
            .register(
                ToolName::OpenUrl,
                Arc::new(StaticCapability::new(ToolReturn::error("no browser"))),
            )
            .register(ToolName::Wait, recorder.clone() as Arc<_>)
            .build();
        let runner = runner_with(registry, Arc::new(InMemoryPreferenceStore::new()));

        let chain = Chain::new(vec![
            Intent::tool(
                ToolName::OpenApp,
                ToolArgs::new().with_str("app_name", "notepad"),
                "open notepad",
            ),
            Intent::tool(
                ToolName::OpenUrl,
                ToolArgs::new().with_str("url", "https://example.com"),
                "open example.com",
            ),
            Intent::tool(
                ToolName::Wait,
                ToolArgs::new().with_int("seconds", 1),
                "wait 1 second",
            ),
        ]);

        match runner.run(chain).await {
            ChainVerdict::Failed {
                index,
                detail,
                outcomes,
            } => {
                assert_eq!(index, 1);
                assert_eq!(detail, "no browser");
                assert_eq!(outcomes.len(), 2);
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
        assert_eq!(recorder.call_count(), 0);
    }

    #[tokio::test]
    async fn pauses_without_a_stored_preference() {
        let registry = ToolRegistry::builder()
            .register(
                ToolName::OpenFolderByName,
                Arc::new(StaticCapability::new(ToolReturn::needs_confirmation(
                    downloads_request(),
                ))),
            )
            .build();
        let runner = runner_with(registry, Arc::new(InMemoryPreferenceStore::new()));

        match runner.run(Chain::new(vec![open_downloads()])).await {
            ChainVerdict::Paused { paused } => {
                assert_eq!(paused.paused_index(), 0);
                assert_eq!(paused.request(), &downloads_request());
            }
            other => panic!("unexpected verdict: {:?}", other),
        }
    }

    #[tokio::test]
    async fn stored_preference_short_circuits_the_pause() {
        let scripted = ScriptedCapability::new();
        scripted.push(ToolReturn::needs_confirmation(downloads_request()));
        scripted.push(ToolReturn::executed());

        let registry = ToolRegistry::builder()
            .register(ToolName::OpenFolderByName, Arc::new(scripted))
            .build();
        let store = Arc::new(InMemoryPreferenceStore::new());
        store.upsert("folder::downloads", "D:\\Downloads").await.unwrap();
        let runner = runner_with(registry, store.clone());

        match runner.run(Chain::new(vec![open_downloads()])).await {
            ChainVerdict::Completed { outcomes } => assert_eq!(outcomes.len(), 1),
            other => panic!("unexpected verdict: {:?}", other),
        }

        // Auto-apply counts as a confirmation and bumps the usage count.
        let record = store.get("folder::downloads").await.unwrap().unwrap();
        assert_eq!(record.usage_count, 2);
    }

    #[tokio::test]
    async fn stale_preference_still_pauses() {
        let registry = ToolRegistry::builder()
            .register(
                ToolName::OpenFolderByName,
                Arc::new(StaticCapability::new(ToolReturn::needs_confirmation(
                    downloads_request(),
                ))),
            )
            .build();
        let store = Arc::new(InMemoryPreferenceStore::new());
        store.upsert("folder::downloads", "E:\\Gone").await.unwrap();
        let runner = runner_with(registry, store);

        assert!(matches!(
            runner.run(Chain::new(vec![open_downloads()])).await,
            ChainVerdict::Paused { .. }
        ));
    }

    #[tokio::test]
    async fn repeated_confirmation_after_injection_pauses() {
        let registry = ToolRegistry::builder()
            .register(
                ToolName::OpenFolderByName,
                Arc::new(StaticCapability::new(ToolReturn::needs_confirmation(
                    downloads_request(),
                ))),
            )
            .build();
        let store = Arc::new(InMemoryPreferenceStore::new());
        store.upsert("folder::downloads", "D:\\Downloads").await.unwrap();
        let runner = runner_with(registry, store);

        // Preference applies once; the second ask on the same step pauses.
        assert!(matches!(
            runner.run(Chain::new(vec![open_downloads()])).await,
            ChainVerdict::Paused { .. }
        ));
    }

    #[tokio::test]
    async fn resume_stores_choice_and_continues() {
        let scripted = ScriptedCapability::new();
        scripted.push(ToolReturn::executed());
        let after = Arc::new(RecordingCapability::new(ToolReturn::ok()));

        let registry = ToolRegistry::builder()
            .register(ToolName::OpenFolderByName, Arc::new(scripted))
            .register(ToolName::Wait, after.clone() as Arc<_>)
            .build();
        let store = Arc::new(InMemoryPreferenceStore::new());
        let runner = runner_with(registry, store.clone());

        let chain = Chain::new(vec![
            open_downloads(),
            Intent::tool(
                ToolName::Wait,
                ToolArgs::new().with_int("seconds", 1),
                "wait 1 second",
            ),
        ]);
        let paused = PausedChain::new(chain, downloads_request());

        match runner.resume(paused, "D:\\Downloads").await {
            ChainVerdict::Completed { outcomes } => assert_eq!(outcomes.len(), 2),
            other => panic!("unexpected verdict: {:?}", other),
        }

        let record = store.get("folder::downloads").await.unwrap().unwrap();
        assert_eq!(record.value, "D:\\Downloads");
        assert_eq!(after.call_count(), 1);
    }

    #[tokio::test]
    async fn resume_that_asks_again_pauses_again() {
        let registry = ToolRegistry::builder()
            .register(
                ToolName::OpenFolderByName,
                Arc::new(StaticCapability::new(ToolReturn::needs_confirmation(
                    downloads_request(),
                ))),
            )
            .build();
        let runner = runner_with(registry, Arc::new(InMemoryPreferenceStore::new()));

        let paused = PausedChain::new(Chain::new(vec![open_downloads()]), downloads_request());
        assert!(matches!(
            runner.resume(paused, "D:\\Downloads").await,
            ChainVerdict::Paused { .. }
        ));
    }
}
