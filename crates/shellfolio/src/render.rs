//! Transcript line rendering.

use owo_colors::OwoColorize;
use shellfolio_core::{LineKind, TranscriptLine};

pub struct Renderer {
    prompt: String,
    color: bool,
}

impl Renderer {
    pub fn new(prompt: &str, color: bool) -> Self {
        Self {
            prompt: prompt.to_string(),
            color,
        }
    }

    pub fn prompt(&self) -> String {
        if self.color {
            self.prompt.green().bold().to_string()
        } else {
            self.prompt.clone()
        }
    }

    pub fn line(&self, line: &TranscriptLine) -> String {
        match line.kind {
            LineKind::Input => format!("{}{}", self.prompt(), line.content),
            LineKind::Output => line.content.clone(),
            LineKind::Error if self.color => line.content.red().to_string(),
            LineKind::System if self.color => line.content.yellow().to_string(),
            LineKind::Error | LineKind::System => line.content.clone(),
        }
    }
}
