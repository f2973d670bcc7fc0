//! Tool names and argument contracts.
//!
//! The capability catalog is closed: every tool the pipeline can dispatch is a
//! variant of [`ToolName`], and unknown names are a parse error rather than a
//! runtime lookup surprise. Each tool declares an [`ArgContract`] listing the
//! argument names it requires and optionally accepts; the Executor re-checks
//! the contract before invoking a capability.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of dispatchable capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    // Files
    OpenFile,
    SearchFiles,
    // Folders
    OpenFolderByName,
    // Apps & system
    OpenApp,
    // Web
    OpenUrl,
    SearchWeb,
    SendWhatsapp,
    // Media
    PlayYoutubeVideo,
    // Input automation
    TypeText,
    PasteText,
    MouseMove,
    MouseClick,
    MouseScroll,
    KeyboardPress,
    PressHotkey,
    // Utilities
    GetScreenSize,
    TakeScreenshot,
    Wait,
    // Document generation
    SummarizeUrlToApp,
    ResearchTopicToApp,
    WriteReportToApp,
    GatherTopicToWord,
}

impl ToolName {
    /// Every registered tool, in catalog order.
    pub const ALL: [ToolName; 22] = [
        ToolName::OpenFile,
        ToolName::SearchFiles,
        ToolName::OpenFolderByName,
        ToolName::OpenApp,
        ToolName::OpenUrl,
        ToolName::SearchWeb,
        ToolName::SendWhatsapp,
        ToolName::PlayYoutubeVideo,
        ToolName::TypeText,
        ToolName::PasteText,
        ToolName::MouseMove,
        ToolName::MouseClick,
        ToolName::MouseScroll,
        ToolName::KeyboardPress,
        ToolName::PressHotkey,
        ToolName::GetScreenSize,
        ToolName::TakeScreenshot,
        ToolName::Wait,
        ToolName::SummarizeUrlToApp,
        ToolName::ResearchTopicToApp,
        ToolName::WriteReportToApp,
        ToolName::GatherTopicToWord,
    ];

    /// Wire name of the tool (snake_case, matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::OpenFile => "open_file",
            ToolName::SearchFiles => "search_files",
            ToolName::OpenFolderByName => "open_folder_by_name",
            ToolName::OpenApp => "open_app",
            ToolName::OpenUrl => "open_url",
            ToolName::SearchWeb => "search_web",
            ToolName::SendWhatsapp => "send_whatsapp",
            ToolName::PlayYoutubeVideo => "play_youtube_video",
            ToolName::TypeText => "type_text",
            ToolName::PasteText => "paste_text",
            ToolName::MouseMove => "mouse_move",
            ToolName::MouseClick => "mouse_click",
            ToolName::MouseScroll => "mouse_scroll",
            ToolName::KeyboardPress => "keyboard_press",
            ToolName::PressHotkey => "press_hotkey",
            ToolName::GetScreenSize => "get_screen_size",
            ToolName::TakeScreenshot => "take_screenshot",
            ToolName::Wait => "wait",
            ToolName::SummarizeUrlToApp => "summarize_url_to_app",
            ToolName::ResearchTopicToApp => "research_topic_to_app",
            ToolName::WriteReportToApp => "write_report_to_app",
            ToolName::GatherTopicToWord => "gather_topic_to_word",
        }
    }

    /// Declared argument contract for this tool.
    pub fn contract(&self) -> ArgContract {
        match self {
            ToolName::OpenFile => ArgContract::required(&["filepath"]),
            ToolName::SearchFiles => ArgContract::required(&["query"]),
            ToolName::OpenFolderByName => ArgContract::required(&["folder_name"]),
            ToolName::OpenApp => ArgContract::required(&["app_name"]),
            ToolName::OpenUrl => ArgContract::required(&["url"]),
            ToolName::SearchWeb => ArgContract::required(&["query"]),
            ToolName::SendWhatsapp => ArgContract::required(&["recipient", "message"]),
            ToolName::PlayYoutubeVideo => ArgContract::required(&["topic"]),
            ToolName::TypeText => ArgContract::required(&["text"]),
            ToolName::PasteText => ArgContract::required(&["text"]),
            ToolName::MouseMove => ArgContract::required(&["x", "y"]),
            ToolName::MouseClick => ArgContract::new(&["x", "y"], &["button"]),
            ToolName::MouseScroll => ArgContract::required(&["amount"]),
            ToolName::KeyboardPress => ArgContract::required(&["key"]),
            ToolName::PressHotkey => ArgContract::required(&["keys"]),
            ToolName::GetScreenSize => ArgContract::none(),
            ToolName::TakeScreenshot => ArgContract::required(&["filename"]),
            ToolName::Wait => ArgContract::required(&["seconds"]),
            ToolName::SummarizeUrlToApp => ArgContract::required(&["url", "app_name"]),
            ToolName::ResearchTopicToApp => ArgContract::required(&["topic", "app_name"]),
            ToolName::WriteReportToApp => ArgContract::required(&["topic", "app_name"]),
            ToolName::GatherTopicToWord => ArgContract::required(&["topic"]),
        }
    }

    /// Render `name(arg1,arg2)` for the classifier prompt.
    pub fn signature(&self) -> String {
        let contract = self.contract();
        let mut names: Vec<&str> = contract.required.to_vec();
        names.extend_from_slice(contract.optional);
        format!("{}({})", self.as_str(), names.join(","))
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a wire name does not belong to the catalog.
#[derive(Debug, Clone, Error)]
#[error("unknown tool: {0}")]
pub struct UnknownToolError(pub String);

impl FromStr for ToolName {
    type Err = UnknownToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownToolError(s.to_string()))
    }
}

/// Declared argument names for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgContract {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl ArgContract {
    /// Creates a contract with both required and optional arguments.
    pub const fn new(
        required: &'static [&'static str],
        optional: &'static [&'static str],
    ) -> Self {
        Self { required, optional }
    }

    /// Creates a contract with only required arguments.
    pub const fn required(required: &'static [&'static str]) -> Self {
        Self {
            required,
            optional: &[],
        }
    }

    /// Creates an empty contract (tool takes no arguments).
    pub const fn none() -> Self {
        Self {
            required: &[],
            optional: &[],
        }
    }
}
