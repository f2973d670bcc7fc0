//! Executor - dispatches one intent and normalizes whatever comes back.
//!
//! Every heterogeneous capability return (flag, status map, payload, nothing)
//! collapses to a canonical [`Outcome`] here, in one function, so the chain
//! runner and the pipeline facade only ever see the three normalized variants.
//! Capability faults are converted to error outcomes and never propagate.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::{ConfirmationOption, ConfirmationRequest, Intent, Outcome, ToolArgs, ToolName};
use crate::ports::{StatusReturn, ToolReturn};

use super::registry::ToolRegistry;

/// Dispatches intents against the registry.
pub struct Executor {
    registry: ToolRegistry,
}

impl Executor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Executes one intent. Total: every path lands in an [`Outcome`].
    pub async fn execute(&self, intent: &Intent) -> Outcome {
        match intent {
            Intent::Chat { reply, .. } => {
                Outcome::success(None, json!({ "reply": reply }))
            }
            Intent::Unknown { raw } => {
                Outcome::error(None, format!("could not understand: {}", raw))
            }
            Intent::Tool { tool, args, .. } => self.execute_tool(*tool, args).await,
        }
    }

    async fn execute_tool(&self, tool: ToolName, args: &ToolArgs) -> Outcome {
        let contract = tool.contract();
        for required in contract.required {
            if !args.contains(required) {
                return Outcome::error(
                    Some(tool),
                    format!("missing required argument '{}'", required),
                );
            }
        }

        let capability = match self.registry.get(tool) {
            Some(capability) => capability,
            None => {
                warn!(tool = %tool, "no capability registered");
                return Outcome::error(Some(tool), format!("no capability registered for {}", tool));
            }
        };

        debug!(tool = %tool, "invoking capability");
        match capability.invoke(args).await {
            Ok(ret) => normalize(tool, ret),
            Err(err) => Outcome::error(Some(tool), err.to_string()),
        }
    }
}

/// The one place raw capability returns become outcomes.
fn normalize(tool: ToolName, ret: ToolReturn) -> Outcome {
    match ret {
        ToolReturn::Flag(true) => Outcome::success(Some(tool), Value::Bool(true)),
        ToolReturn::Flag(false) => Outcome::error(Some(tool), "capability reported failure"),
        ToolReturn::Payload(value) => Outcome::success(Some(tool), value),
        ToolReturn::Empty => Outcome::error(Some(tool), "capability returned no result"),
        ToolReturn::Status(status) => normalize_status(tool, status),
    }
}

fn normalize_status(tool: ToolName, status: StatusReturn) -> Outcome {
    match status.status.as_str() {
        "executed" | "success" | "ok" => {
            Outcome::success(Some(tool), Value::Object(status.fields))
        }
        "needs_confirmation" => match decode_confirmation(&status) {
            Some(request) => Outcome::NeedsConfirmation { tool, request },
            None => Outcome::error(Some(tool), "malformed confirmation request"),
        },
        other => {
            let detail = status
                .fields
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("capability reported status '{}'", other));
            Outcome::error(Some(tool), detail)
        }
    }
}

/// Decodes a `needs_confirmation` status into a request. An undecodable or
/// empty-options status is malformed and refuses to pause the chain.
fn decode_confirmation(status: &StatusReturn) -> Option<ConfirmationRequest> {
    let key = status.fields.get("key")?.as_str()?;
    let arg = status.fields.get("arg")?.as_str()?;
    let options: Vec<ConfirmationOption> =
        serde_json::from_value(status.fields.get("options")?.clone()).ok()?;
    ConfirmationRequest::new(key, arg, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{RecordingCapability, ScriptedCapability, StaticCapability};
    use crate::domain::ToolArgs;
    use serde_json::json;
    use std::sync::Arc;

    fn executor_with(tool: ToolName, ret: ToolReturn) -> Executor {
        Executor::new(
            ToolRegistry::builder()
                .register(tool, Arc::new(StaticCapability::new(ret)))
                .build(),
        )
    }

    fn open_app_intent() -> Intent {
        Intent::tool(
            ToolName::OpenApp,
            ToolArgs::new().with_str("app_name", "notepad"),
            "open notepad",
        )
    }

    #[tokio::test]
    async fn chat_intent_succeeds_with_reply_payload() {
        let executor = Executor::new(ToolRegistry::builder().build());
        let outcome = executor.execute(&Intent::chat("hello!", "hi")).await;
        match outcome {
            Outcome::Success { tool, payload } => {
                assert_eq!(tool, None);
                assert_eq!(payload["reply"], "hello!");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_intent_is_an_error() {
        let executor = Executor::new(ToolRegistry::builder().build());
        let outcome = executor.execute(&Intent::unknown("gibberish")).await;
        assert!(outcome.is_error());
    }

    #[tokio::test]
    async fn flag_true_is_success() {
        let executor = executor_with(ToolName::OpenApp, ToolReturn::Flag(true));
        assert!(executor.execute(&open_app_intent()).await.is_success());
    }

    #[tokio::test]
    async fn flag_false_is_error() {
        let executor = executor_with(ToolName::OpenApp, ToolReturn::Flag(false));
        assert!(executor.execute(&open_app_intent()).await.is_error());
    }

    #[tokio::test]
    async fn empty_return_is_error() {
        let executor = executor_with(ToolName::OpenApp, ToolReturn::Empty);
        assert!(executor.execute(&open_app_intent()).await.is_error());
    }

    #[tokio::test]
    async fn payload_return_is_success_with_payload() {
        let executor = executor_with(
            ToolName::GetScreenSize,
            ToolReturn::Payload(json!({"width": 1920, "height": 1080})),
        );
        let intent = Intent::tool(ToolName::GetScreenSize, ToolArgs::new(), "screen size");
        match executor.execute(&intent).await {
            Outcome::Success { payload, .. } => assert_eq!(payload["width"], 1920),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn executed_status_is_success() {
        let executor = executor_with(ToolName::OpenApp, ToolReturn::executed());
        assert!(executor.execute(&open_app_intent()).await.is_success());
    }

    #[tokio::test]
    async fn error_status_carries_detail() {
        let executor = executor_with(ToolName::OpenApp, ToolReturn::error("not installed"));
        match executor.execute(&open_app_intent()).await {
            Outcome::Error { detail, .. } => assert_eq!(detail, "not installed"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn unrecognized_status_is_error() {
        let executor = executor_with(
            ToolName::OpenApp,
            ToolReturn::Status(StatusReturn::new("pending")),
        );
        match executor.execute(&open_app_intent()).await {
            Outcome::Error { detail, .. } => assert!(detail.contains("pending")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn confirmation_request_is_preserved_verbatim() {
        let request = ConfirmationRequest::new(
            "folder::downloads",
            "folder_name",
            vec![
                ConfirmationOption::new("C:\\Downloads", "C:\\Downloads"),
                ConfirmationOption::new("D:\\Downloads", "D:\\Downloads"),
            ],
        )
        .unwrap();
        let executor = executor_with(
            ToolName::OpenFolderByName,
            ToolReturn::needs_confirmation(request.clone()),
        );

        let intent = Intent::tool(
            ToolName::OpenFolderByName,
            ToolArgs::new().with_str("folder_name", "downloads"),
            "open downloads",
        );
        match executor.execute(&intent).await {
            Outcome::NeedsConfirmation { tool, request: got } => {
                assert_eq!(tool, ToolName::OpenFolderByName);
                assert_eq!(got, request);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn confirmation_without_options_is_error() {
        let malformed = StatusReturn::new("needs_confirmation")
            .with_field("key", json!("folder::x"))
            .with_field("arg", json!("folder_name"))
            .with_field("options", json!([]));
        let executor = executor_with(ToolName::OpenFolderByName, ToolReturn::Status(malformed));

        let intent = Intent::tool(
            ToolName::OpenFolderByName,
            ToolArgs::new().with_str("folder_name", "x"),
            "open x",
        );
        assert!(executor.execute(&intent).await.is_error());
    }

    #[tokio::test]
    async fn capability_fault_becomes_error_outcome() {
        let scripted = ScriptedCapability::new();
        let executor = Executor::new(
            ToolRegistry::builder()
                .register(ToolName::OpenApp, Arc::new(scripted))
                .build(),
        );
        // Empty script: the capability faults.
        assert!(executor.execute(&open_app_intent()).await.is_error());
    }

    #[tokio::test]
    async fn unregistered_tool_is_error_without_invocation() {
        let recorder = Arc::new(RecordingCapability::new(ToolReturn::ok()));
        let executor = Executor::new(
            ToolRegistry::builder()
                .register(ToolName::Wait, recorder.clone() as Arc<_>)
                .build(),
        );

        let outcome = executor.execute(&open_app_intent()).await;
        assert!(outcome.is_error());
        assert_eq!(recorder.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_required_argument_is_error_without_invocation() {
        let recorder = Arc::new(RecordingCapability::new(ToolReturn::ok()));
        let executor = Executor::new(
            ToolRegistry::builder()
                .register(ToolName::OpenApp, recorder.clone() as Arc<_>)
                .build(),
        );

        let intent = Intent::tool(ToolName::OpenApp, ToolArgs::new(), "open");
        match executor.execute(&intent).await {
            Outcome::Error { detail, .. } => assert!(detail.contains("app_name")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(recorder.call_count(), 0);
    }
}
