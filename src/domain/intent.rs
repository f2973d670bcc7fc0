//! Intent - structured interpretation of one natural-language segment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::tool::ToolName;

/// A single argument value. Tool arguments are either strings or integers;
/// anything richer is rejected at the classification boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Int(i64),
    Str(String),
}

impl ArgValue {
    /// Returns the string form if this is a string argument.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            ArgValue::Int(_) => None,
        }
    }

    /// Returns the integer form if this is an integer argument.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            ArgValue::Str(_) => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(n) => write!(f, "{}", n),
            ArgValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Int(n)
    }
}

/// Ordered map of argument name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolArgs(BTreeMap<String, ArgValue>);

impl ToolArgs {
    /// Creates an empty argument map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style string argument.
    pub fn with_str(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), ArgValue::Str(value.into()));
        self
    }

    /// Builder-style integer argument.
    pub fn with_int(mut self, name: impl Into<String>, value: i64) -> Self {
        self.0.insert(name.into(), ArgValue::Int(value));
        self
    }

    /// Sets an argument, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: ArgValue) {
        self.0.insert(name.into(), value);
    }

    /// Looks up an argument by name.
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.0.get(name)
    }

    /// Looks up a string argument by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(ArgValue::as_str)
    }

    /// Looks up an integer argument by name.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(ArgValue::as_i64)
    }

    /// True if an argument with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over name/value pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Structured interpretation of one natural-language segment.
///
/// Every segment resolves to exactly one of these; the resolver cascade is
/// total, so `Unknown` only appears when a caller constructs a chain by hand.
/// Each variant keeps the verbatim source segment in `raw` for re-display and
/// for tools that want the original phrasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Intent {
    /// Conversational reply; nothing to dispatch.
    Chat { reply: String, raw: String },
    /// A validated tool invocation.
    Tool {
        tool: ToolName,
        args: ToolArgs,
        raw: String,
    },
    /// Unresolved input.
    Unknown { raw: String },
}

impl Intent {
    /// Creates a chat intent.
    pub fn chat(reply: impl Into<String>, raw: impl Into<String>) -> Self {
        Intent::Chat {
            reply: reply.into(),
            raw: raw.into(),
        }
    }

    /// Creates a tool intent.
    pub fn tool(tool: ToolName, args: ToolArgs, raw: impl Into<String>) -> Self {
        Intent::Tool {
            tool,
            args,
            raw: raw.into(),
        }
    }

    /// Creates an unknown intent.
    pub fn unknown(raw: impl Into<String>) -> Self {
        Intent::Unknown { raw: raw.into() }
    }

    /// The verbatim source segment this intent was resolved from.
    pub fn raw(&self) -> &str {
        match self {
            Intent::Chat { raw, .. } | Intent::Tool { raw, .. } | Intent::Unknown { raw } => raw,
        }
    }

    /// True if this intent dispatches a tool.
    pub fn is_tool(&self) -> bool {
        matches!(self, Intent::Tool { .. })
    }

    /// True if this intent is a conversational reply.
    pub fn is_chat(&self) -> bool {
        matches!(self, Intent::Chat { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arg_value_accessors() {
        assert_eq!(ArgValue::Str("hi".into()).as_str(), Some("hi"));
        assert_eq!(ArgValue::Int(3).as_i64(), Some(3));
        assert_eq!(ArgValue::Int(3).as_str(), None);
        assert_eq!(ArgValue::Str("hi".into()).as_i64(), None);
    }

    #[test]
    fn arg_value_serde_is_untagged() {
        let n: ArgValue = serde_json::from_str("42").unwrap();
        assert_eq!(n, ArgValue::Int(42));

        let s: ArgValue = serde_json::from_str("\"notepad\"").unwrap();
        assert_eq!(s, ArgValue::Str("notepad".into()));
    }

    #[test]
    fn tool_args_builder_and_lookup() {
        let args = ToolArgs::new()
            .with_str("app_name", "notepad")
            .with_int("seconds", 3);

        assert_eq!(args.get_str("app_name"), Some("notepad"));
        assert_eq!(args.get_i64("seconds"), Some(3));
        assert!(args.contains("seconds"));
        assert!(!args.contains("missing"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn intent_serializes_with_mode_tag() {
        let intent = Intent::tool(
            ToolName::OpenApp,
            ToolArgs::new().with_str("app_name", "notepad"),
            "open notepad",
        );

        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["mode"], "tool");
        assert_eq!(json["tool"], "open_app");
        assert_eq!(json["args"]["app_name"], "notepad");
        assert_eq!(json["raw"], "open notepad");
    }

    #[test]
    fn intent_round_trips_through_json() {
        let intent = Intent::chat("hello there", "hi");
        let json = serde_json::to_string(&intent).unwrap();
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intent);
        assert_eq!(back.raw(), "hi");
    }
}
