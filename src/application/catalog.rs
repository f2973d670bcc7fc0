//! Curated example phrases per tool, used by the semantic classifier.
//!
//! Wording matters more than coverage here: each phrase anchors a region of
//! embedding space, and the classifier picks the tool of the single closest
//! example. Keep phrases short and idiomatic.

use crate::domain::ToolName;

/// One tool and its anchor phrases.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub tool: ToolName,
    pub examples: &'static [&'static str],
}

/// The full example catalog, in priority-neutral order.
pub const INTENT_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        tool: ToolName::OpenFolderByName,
        examples: &[
            "open my documents folder",
            "show me downloads",
            "open the desktop folder",
            "go to my pictures",
            "find the music folder",
        ],
    },
    CatalogEntry {
        tool: ToolName::OpenApp,
        examples: &[
            "open notepad",
            "launch chrome",
            "start calculator",
            "open visual studio code",
            "open microsoft edge",
        ],
    },
    CatalogEntry {
        tool: ToolName::SearchWeb,
        examples: &[
            "search the web for python decorators",
            "look up bitcoin price",
            "google ai news",
            "find information about tesla",
        ],
    },
    CatalogEntry {
        tool: ToolName::OpenUrl,
        examples: &[
            "open https://openai.com",
            "go to github.com",
            "visit https://example.com",
        ],
    },
    CatalogEntry {
        tool: ToolName::PlayYoutubeVideo,
        examples: &[
            "play lo-fi on youtube",
            "search youtube for python tutorial",
            "play meditation music on youtube",
        ],
    },
    CatalogEntry {
        tool: ToolName::SendWhatsapp,
        examples: &[
            "send whatsapp to 911234567890 hello",
            "message 911234567890 on whatsapp saying hi",
        ],
    },
    CatalogEntry {
        tool: ToolName::TakeScreenshot,
        examples: &["take a screenshot", "capture the screen", "screenshot now"],
    },
    CatalogEntry {
        tool: ToolName::GetScreenSize,
        examples: &[
            "what is my screen size",
            "get screen resolution",
            "screen size",
        ],
    },
    CatalogEntry {
        tool: ToolName::Wait,
        examples: &[
            "wait 3 seconds",
            "pause for 5 seconds",
            "sleep 2 seconds",
        ],
    },
    CatalogEntry {
        tool: ToolName::TypeText,
        examples: &["type hello world", "type my email"],
    },
    CatalogEntry {
        tool: ToolName::PasteText,
        examples: &["paste hello world", "paste this text"],
    },
    CatalogEntry {
        tool: ToolName::KeyboardPress,
        examples: &["press enter", "press tab"],
    },
    CatalogEntry {
        tool: ToolName::PressHotkey,
        examples: &["press ctrl shift s", "press alt f4"],
    },
    CatalogEntry {
        tool: ToolName::MouseMove,
        examples: &["move mouse to 100 200", "move cursor to 400 600"],
    },
    CatalogEntry {
        tool: ToolName::MouseClick,
        examples: &["click at 300 400", "right click at 500 600"],
    },
    CatalogEntry {
        tool: ToolName::MouseScroll,
        examples: &["scroll down 300", "scroll up 200"],
    },
    CatalogEntry {
        tool: ToolName::OpenFile,
        examples: &[
            "open file C:\\Users\\me\\notes.txt",
            "open file \"C:\\Users\\me\\Desktop\\todo.txt\"",
        ],
    },
    CatalogEntry {
        tool: ToolName::SearchFiles,
        examples: &["search files for report", "find files named budget"],
    },
    CatalogEntry {
        tool: ToolName::SummarizeUrlToApp,
        examples: &[
            "summarize https://example.com in word",
            "summarize https://openai.com in google docs",
        ],
    },
    CatalogEntry {
        tool: ToolName::ResearchTopicToApp,
        examples: &[
            "research ai agents in word",
            "research quantum computing in notion",
        ],
    },
    CatalogEntry {
        tool: ToolName::WriteReportToApp,
        examples: &[
            "write report on climate change in word",
            "write a report on ai in google docs",
        ],
    },
    CatalogEntry {
        tool: ToolName::GatherTopicToWord,
        examples: &[
            "gather ai agents into word",
            "collect info on climate change in word",
            "gather virat kohli in word",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_has_catalog_examples() {
        for tool in ToolName::ALL {
            let entry = INTENT_CATALOG.iter().find(|entry| entry.tool == tool);
            let entry = entry.unwrap_or_else(|| panic!("no catalog entry for {}", tool));
            assert!(!entry.examples.is_empty());
        }
    }

    #[test]
    fn catalog_has_no_duplicate_tools() {
        for (i, entry) in INTENT_CATALOG.iter().enumerate() {
            assert!(
                !INTENT_CATALOG[i + 1..].iter().any(|e| e.tool == entry.tool),
                "duplicate entry for {}",
                entry.tool
            );
        }
    }
}
