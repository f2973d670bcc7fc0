//! Generative Fallback Classifier - last resolution stage before chat.
//!
//! Prompts the generative backend with the closed tool set and demands one
//! JSON object back. The parse is deliberately tolerant: models wrap JSON in
//! prose and markdown fences, so we take the span from the first `{` to the
//! last `}` and ignore everything around it. Anything that fails the shape
//! gate is a stage miss, never an error.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use serde_json::Value;

use crate::domain::{ArgValue, ToolArgs, ToolName};
use crate::ports::{GenerationRequest, GenerativeProvider};

use super::extract;

/// Structured-output classifier backed by the generative model.
pub struct GenerativeClassifier {
    provider: Arc<dyn GenerativeProvider>,
    timeout: Duration,
    screenshot_dir: PathBuf,
}

impl GenerativeClassifier {
    pub fn new(
        provider: Arc<dyn GenerativeProvider>,
        timeout: Duration,
        screenshot_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            timeout,
            screenshot_dir: screenshot_dir.into(),
        }
    }

    /// Classifies one segment. `None` is a stage miss.
    pub async fn classify(&self, text: &str) -> Option<(ToolName, ToolArgs)> {
        let request = GenerationRequest::new(build_prompt(text))
            .with_temperature(0.0)
            .with_max_tokens(120)
            .with_timeout(self.timeout);

        let raw = match self.provider.generate(request).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(stage = "generative", error = %err, "backend miss");
                return None;
            }
        };

        let (tool, args) = parse_intent_json(&raw)?;
        let args = self.normalize(tool, args)?;

        // The model chose the tool and the arguments; the contract still
        // gates what reaches the executor.
        let contract = tool.contract();
        for required in contract.required {
            if !args.contains(required) {
                debug!(stage = "generative", tool = %tool, missing = required, "shape miss");
                return None;
            }
        }

        debug!(stage = "generative", tool = %tool, "tool selected");
        Some((tool, args))
    }

    /// Post-validation normalization of model-produced arguments.
    fn normalize(&self, tool: ToolName, mut args: ToolArgs) -> Option<ToolArgs> {
        if tool == ToolName::TakeScreenshot && args.get_str("filename").is_none() {
            args.set(
                "filename",
                ArgValue::Str(extract::default_screenshot_path(&self.screenshot_dir)),
            );
        }

        if tool == ToolName::Wait {
            match args.get("seconds") {
                Some(ArgValue::Int(n)) => args.set("seconds", ArgValue::Int((*n).max(1))),
                Some(ArgValue::Str(s)) => {
                    let n: i64 = s.trim().parse().ok()?;
                    args.set("seconds", ArgValue::Int(n.max(1)));
                }
                None => {}
            }
        }

        Some(args)
    }
}

/// Prompt enumerating the closed tool set and demanding a bare JSON object.
fn build_prompt(text: &str) -> String {
    let signatures: Vec<String> = ToolName::ALL
        .iter()
        .map(|tool| tool.signature())
        .collect();

    format!(
        "You are an intent classifier. \
         Return ONLY a JSON object with keys: mode, tool, args. \
         Valid tools: {}. \
         If you are unsure, return {{\"mode\":\"unknown\"}}.\n\n\
         Text: {}\nJSON:",
        signatures.join(", "),
        text
    )
}

/// Extracts and shape-checks the first brace-delimited JSON object.
fn parse_intent_json(raw: &str) -> Option<(ToolName, ToolArgs)> {
    let json = extract_json_object(raw)?;
    let value: Value = serde_json::from_str(json).ok()?;
    let object = value.as_object()?;

    if object.get("mode").and_then(Value::as_str) != Some("tool") {
        return None;
    }

    let tool = object.get("tool").and_then(Value::as_str)?;
    if tool.is_empty() {
        return None;
    }
    let tool = ToolName::from_str(tool).ok()?;

    let args_value = object.get("args")?.as_object()?;
    let mut args = ToolArgs::new();
    for (name, value) in args_value {
        match value {
            Value::String(s) => args.set(name, ArgValue::Str(s.clone())),
            Value::Number(n) => args.set(name, ArgValue::Int(n.as_i64()?)),
            // Booleans, nulls, and nested structures are not valid arguments.
            _ => return None,
        }
    }

    Some((tool, args))
}

/// Span from the first `{` to the last `}`, if both exist in order.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    raw.get(start..=end)
}
