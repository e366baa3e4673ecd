//! Command output model.

use crate::catalog::Catalog;
use crate::progress::Progress;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Text,
    Success,
    Error,
    Clear,
    Component,
}

/// One row of the challenge listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeEntry {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    pub solved: bool,
}

impl ChallengeEntry {
    /// One entry per catalog challenge, in catalog order.
    pub fn listing(catalog: &Catalog, progress: &Progress) -> Vec<Self> {
        catalog
            .all()
            .iter()
            .map(|c| ChallengeEntry {
                id: c.id.clone(),
                title: c.title.clone(),
                difficulty: c.difficulty.to_string(),
                solved: progress.is_solved(&c.id),
            })
            .collect()
    }
}

/// Structured payloads a front-end may render richly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Progress {
        solved: usize,
        total: usize,
        badges: String,
    },
    ChallengeList {
        entries: Vec<ChallengeEntry>,
    },
    Achievements {
        lines: Vec<String>,
        unlocked: usize,
        total: usize,
    },
}

impl Component {
    /// Plain-text rendering used for the transcript.
    pub fn render_text(&self) -> String {
        match self {
            Component::Progress {
                solved,
                total,
                badges,
            } => {
                let width = 20;
                let filled = if *total == 0 { 0 } else { solved * width / total };
                let mut out = format!(
                    "[{}{}] {}/{} challenges solved",
                    "#".repeat(filled),
                    "-".repeat(width - filled),
                    solved,
                    total
                );
                if !badges.is_empty() {
                    out.push_str(&format!("\nBadges: {}", badges));
                }
                out
            }
            Component::ChallengeList { entries } => {
                if entries.is_empty() {
                    return "No challenges available.".to_string();
                }
                entries
                    .iter()
                    .map(|e| {
                        format!(
                            "{} {:<16} {:<24} ({})",
                            if e.solved { "[x]" } else { "[ ]" },
                            e.id,
                            e.title,
                            e.difficulty
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Component::Achievements {
                lines,
                unlocked,
                total,
            } => {
                let mut out = format!("Achievements {}/{}", unlocked, total);
                for line in lines {
                    out.push('\n');
                    out.push_str(line);
                }
                out
            }
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Output {
    pub kind: OutputKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
}

impl Output {
    fn plain(kind: OutputKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            component: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::plain(OutputKind::Text, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::plain(OutputKind::Success, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::plain(OutputKind::Error, content)
    }

    pub fn clear() -> Self {
        Self::plain(OutputKind::Clear, "")
    }

    pub fn component(component: Component) -> Self {
        Self {
            kind: OutputKind::Component,
            content: component.render_text(),
            component: Some(component),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == OutputKind::Error
    }
}
