//! Rule Matcher - the deterministic first stage of the resolver cascade.
//!
//! An ordered list of keyword predicates covering the highest-frequency
//! phrasings; first match wins and no network call is made. A rule whose
//! extractor cannot produce the required arguments yields nothing, and the
//! cascade falls through to the semantic stage.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{ToolArgs, ToolName};

use super::extract;

const FOLDER_NAMES: &[&str] = &[
    "documents",
    "document",
    "docs",
    "downloads",
    "desktop",
    "pictures",
    "photos",
    "videos",
    "music",
];

const OPEN_VERBS: &[&str] = &[
    "open",
    "show",
    "show me",
    "go to",
    "take me to",
    "launch",
    "start",
];

/// Deterministic phrase/keyword matcher.
pub struct RuleMatcher {
    screenshot_dir: PathBuf,
}

impl RuleMatcher {
    pub fn new(screenshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            screenshot_dir: screenshot_dir.into(),
        }
    }

    /// Runs the rules in priority order against one lower-cased segment.
    pub fn matches(&self, text: &str) -> Option<(ToolName, ToolArgs)> {
        let result = self
            .common_folders(text)
            .or_else(|| self.simple_tools(text))
            .or_else(|| self.report_tools(text));

        if let Some((tool, _)) = &result {
            debug!(stage = "rules", tool = %tool, "rule matched");
        }
        result
    }

    /// Opening verb plus a well-known folder word.
    fn common_folders(&self, text: &str) -> Option<(ToolName, ToolArgs)> {
        let lowered = text.to_lowercase();
        if !OPEN_VERBS.iter().any(|verb| lowered.contains(verb)) {
            return None;
        }
        let folder = FOLDER_NAMES
            .iter()
            .find(|name| lowered.contains(*name))?;
        Some((
            ToolName::OpenFolderByName,
            ToolArgs::new().with_str("folder_name", *folder),
        ))
    }

    /// Screenshot and screen-size keywords.
    fn simple_tools(&self, text: &str) -> Option<(ToolName, ToolArgs)> {
        let lowered = text.to_lowercase();
        if lowered.contains("screenshot")
            || lowered.contains("screen shot")
            || lowered.contains("capture screen")
        {
            let filename = extract::default_screenshot_path(&self.screenshot_dir);
            return Some((
                ToolName::TakeScreenshot,
                ToolArgs::new().with_str("filename", filename),
            ));
        }
        if lowered.contains("screen size") || lowered.contains("screen resolution") {
            return Some((ToolName::GetScreenSize, ToolArgs::new()));
        }
        None
    }

    /// Summarize/research/report phrasings; all require an " in <app>" tail.
    fn report_tools(&self, text: &str) -> Option<(ToolName, ToolArgs)> {
        let lowered = text.to_lowercase();
        if !lowered.contains(" in ") {
            return None;
        }

        if lowered.starts_with("summarize") {
            if let Some(args) = extract::args_for(ToolName::SummarizeUrlToApp, text, self.dir()) {
                return Some((ToolName::SummarizeUrlToApp, args));
            }
        }

        if lowered.starts_with("research ") {
            if let Some(args) = extract::args_for(ToolName::ResearchTopicToApp, text, self.dir()) {
                return Some((ToolName::ResearchTopicToApp, args));
            }
        }

        if lowered.starts_with("write report") || lowered.starts_with("write a report") {
            if let Some(args) = extract::args_for(ToolName::WriteReportToApp, text, self.dir()) {
                return Some((ToolName::WriteReportToApp, args));
            }
        }

        None
    }

    fn dir(&self) -> &Path {
        &self.screenshot_dir
    }
}
