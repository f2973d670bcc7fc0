//! Argument extractors.
//!
//! Shared by every cascade stage: the rule matcher and the semantic
//! classifier both select a tool first and then call [`args_for`] on the raw
//! segment text. Extraction can fail even when tool selection succeeded;
//! callers treat that as a stage miss and fall through.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::domain::{ToolArgs, ToolName};

static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://\S+").unwrap());
static DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:[a-z0-9\-]+\.)+[a-z]{2,}\b").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+").unwrap());

/// First quoted span in the text.
pub fn quoted(text: &str) -> Option<String> {
    QUOTED_RE
        .captures(text)
        .map(|captures| captures[1].trim().to_string())
}

/// Remainder of the text after the first matching keyword.
pub fn after_keywords(text: &str, keywords: &[&str]) -> Option<String> {
    let lowered = text.to_lowercase();
    for keyword in keywords {
        if let Some(idx) = lowered.find(keyword) {
            // Byte offsets line up for ASCII; bail out rather than panic if
            // lowercasing shifted a boundary.
            let value = text.get(idx + keyword.len()..)?.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Target of an "open"-style phrase: a quoted span, or the remainder after an
/// opening verb.
pub fn open_target(text: &str) -> Option<String> {
    quoted(text).or_else(|| {
        after_keywords(
            text,
            &[
                "open ",
                "launch ",
                "start ",
                "run ",
                "show me ",
                "go to ",
                "take me to ",
            ],
        )
    })
}

/// Query of a search phrase.
pub fn search_query(text: &str) -> Option<String> {
    after_keywords(
        text,
        &["search for ", "search ", "look up ", "google ", "find "],
    )
}

/// First URL, or bare domain, in the text.
pub fn url(text: &str) -> Option<String> {
    if let Some(m) = URL_RE.find(text) {
        return Some(m.as_str().to_string());
    }
    DOMAIN_RE.find(text).map(|m| m.as_str().to_string())
}

/// Every integer in the text, in order.
pub fn numbers(text: &str) -> Vec<i64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// First number interpreted as a wait duration, clamped to >= 1.
pub fn wait_seconds(text: &str) -> Option<i64> {
    numbers(text).first().map(|n| (*n).max(1))
}

/// Remainder after a verb such as "type" or "press".
pub fn text_payload(text: &str, verbs: &[&str]) -> Option<String> {
    let keywords: Vec<String> = verbs.iter().map(|verb| format!("{} ", verb)).collect();
    let refs: Vec<&str> = keywords.iter().map(String::as_str).collect();
    after_keywords(text, &refs)
}

/// File path: a quoted span, or the remainder after an "open file" phrase.
pub fn file_path(text: &str) -> Option<String> {
    quoted(text).or_else(|| after_keywords(text, &["open file ", "open the file "]))
}

/// Splits `"<head> in <app>"` at the last separator. Returns the head and the
/// app name, if any.
pub fn split_for_app(text: &str) -> (String, Option<String>) {
    let lowered = text.to_lowercase();
    for separator in [" in ", " into "] {
        if let Some(idx) = lowered.rfind(separator) {
            if let (Some(head), Some(app)) = (text.get(..idx), text.get(idx + separator.len()..)) {
                return (head.trim().to_string(), Some(app.trim().to_string()));
            }
        }
    }
    (text.trim().to_string(), None)
}

/// Strips the first matching prefix (case-insensitive) and trims.
pub fn strip_prefix_any(text: &str, prefixes: &[&str]) -> String {
    let lowered = text.to_lowercase();
    for prefix in prefixes {
        if lowered.starts_with(prefix) {
            if let Some(rest) = text.get(prefix.len()..) {
                return rest.trim().to_string();
            }
        }
    }
    text.trim().to_string()
}

/// Timestamp-derived default screenshot path.
pub fn default_screenshot_path(screenshot_dir: &Path) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    screenshot_dir
        .join(format!("screenshot_{}.png", timestamp))
        .display()
        .to_string()
}

/// Recipient (first long digit run) and trailing message of a WhatsApp phrase.
pub fn whatsapp(text: &str) -> Option<(String, String)> {
    let recipient = text
        .split_whitespace()
        .find(|token| token.len() >= 8 && token.chars().all(|c| c.is_ascii_digit()))?;
    let message = text
        .split_once(recipient)
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default();
    Some((recipient.to_string(), message))
}

/// Builds the argument map for a selected tool from the raw segment text.
///
/// Returns `None` when a required argument cannot be located; the caller
/// falls through to the next cascade stage.
pub fn args_for(tool: ToolName, text: &str, screenshot_dir: &Path) -> Option<ToolArgs> {
    match tool {
        ToolName::OpenFolderByName => {
            open_target(text).map(|folder| ToolArgs::new().with_str("folder_name", folder))
        }
        ToolName::OpenApp => open_target(text).map(|app| ToolArgs::new().with_str("app_name", app)),
        ToolName::SearchWeb => {
            search_query(text).map(|query| ToolArgs::new().with_str("query", query))
        }
        ToolName::OpenUrl => url(text).map(|url| ToolArgs::new().with_str("url", url)),
        ToolName::PlayYoutubeVideo => search_query(text)
            .or_else(|| open_target(text))
            .map(|topic| ToolArgs::new().with_str("topic", topic)),
        ToolName::SendWhatsapp => whatsapp(text).map(|(recipient, message)| {
            ToolArgs::new()
                .with_str("recipient", recipient)
                .with_str("message", message)
        }),
        ToolName::TakeScreenshot => {
            let filename = after_keywords(text, &["as ", "to "])
                .unwrap_or_else(|| default_screenshot_path(screenshot_dir));
            Some(ToolArgs::new().with_str("filename", filename))
        }
        ToolName::GetScreenSize => Some(ToolArgs::new()),
        ToolName::Wait => {
            wait_seconds(text).map(|seconds| ToolArgs::new().with_int("seconds", seconds))
        }
        ToolName::TypeText => {
            text_payload(text, &["type"]).map(|payload| ToolArgs::new().with_str("text", payload))
        }
        ToolName::PasteText => {
            text_payload(text, &["paste"]).map(|payload| ToolArgs::new().with_str("text", payload))
        }
        ToolName::KeyboardPress => {
            text_payload(text, &["press"]).map(|key| ToolArgs::new().with_str("key", key))
        }
        ToolName::PressHotkey => {
            text_payload(text, &["press"]).map(|keys| ToolArgs::new().with_str("keys", keys))
        }
        ToolName::MouseMove => {
            let nums = numbers(text);
            if nums.len() < 2 {
                return None;
            }
            Some(ToolArgs::new().with_int("x", nums[0]).with_int("y", nums[1]))
        }
        ToolName::MouseClick => {
            let nums = numbers(text);
            if nums.len() < 2 {
                return None;
            }
            let button = if text.to_lowercase().contains("right") {
                "right"
            } else {
                "left"
            };
            Some(
                ToolArgs::new()
                    .with_int("x", nums[0])
                    .with_int("y", nums[1])
                    .with_str("button", button),
            )
        }
        ToolName::MouseScroll => {
            let nums = numbers(text);
            let mut amount = *nums.first()?;
            if text.to_lowercase().contains("down") {
                amount = -amount.abs();
            }
            Some(ToolArgs::new().with_int("amount", amount))
        }
        ToolName::OpenFile => {
            file_path(text).map(|path| ToolArgs::new().with_str("filepath", path))
        }
        ToolName::SearchFiles => {
            search_query(text).map(|query| ToolArgs::new().with_str("query", query))
        }
        ToolName::SummarizeUrlToApp => {
            let (head, app) = split_for_app(text);
            let app = app?;
            let url = url(&head)?;
            Some(ToolArgs::new().with_str("url", url).with_str("app_name", app))
        }
        ToolName::ResearchTopicToApp => {
            let (head, app) = split_for_app(text);
            let app = app?;
            let topic = strip_prefix_any(&head, &["research "]);
            if topic.is_empty() {
                return None;
            }
            Some(
                ToolArgs::new()
                    .with_str("topic", topic)
                    .with_str("app_name", app),
            )
        }
        ToolName::WriteReportToApp => {
            let (head, app) = split_for_app(text);
            let app = app?;
            let topic = strip_prefix_any(
                &head,
                &[
                    "write report on ",
                    "write a report on ",
                    "write report ",
                    "write a report ",
                ],
            );
            if topic.is_empty() {
                return None;
            }
            Some(
                ToolArgs::new()
                    .with_str("topic", topic)
                    .with_str("app_name", app),
            )
        }
        ToolName::GatherTopicToWord => {
            let (head, app) = split_for_app(text);
            // Only Word is supported for this automation path.
            let app = app?;
            if !matches!(app.to_lowercase().as_str(), "word" | "ms word" | "microsoft word") {
                return None;
            }
            let topic = strip_prefix_any(&head, &["gather ", "collect info on ", "collect "]);
            if topic.is_empty() {
                return None;
            }
            Some(ToolArgs::new().with_str("topic", topic))
        }
    }
}
