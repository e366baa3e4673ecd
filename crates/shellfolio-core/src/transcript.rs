//! Terminal transcript: the ordered lines shown for one session.

use crate::output::{Output, OutputKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Input,
    Output,
    Error,
    System,
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::Error => write!(f, "error"),
            Self::System => write!(f, "system"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptLine {
    pub fn new(kind: LineKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn input(content: impl Into<String>) -> Self {
        Self::new(LineKind::Input, content)
    }

    pub fn output(content: impl Into<String>) -> Self {
        Self::new(LineKind::Output, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(LineKind::Error, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(LineKind::System, content)
    }
}

/// Append-only list of lines, cleared in bulk.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
    clears: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: TranscriptLine) {
        self.lines.push(line);
    }

    /// Append a command output, one line per text line. `clear` outputs
    /// carry nothing to show and are ignored here.
    pub fn push_output(&mut self, output: &Output) {
        let kind = match output.kind {
            OutputKind::Clear => return,
            OutputKind::Error => LineKind::Error,
            OutputKind::Text | OutputKind::Success | OutputKind::Component => LineKind::Output,
        };
        for line in output.content.lines() {
            self.lines.push(TranscriptLine::new(kind, line));
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.clears += 1;
    }

    /// How many times the transcript has been cleared
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
