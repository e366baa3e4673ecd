//! Input history with Up/Down style navigation.

#[derive(Debug, Default, Clone)]
pub struct InputHistory {
    entries: Vec<String>,
    index: Option<usize>,
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line and drop any navigation position.
    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.index = None;
    }

    /// Oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Step to an older entry. Stays on the oldest once there.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = match self.index {
            None => self.entries.len() - 1,
            Some(idx) => idx.saturating_sub(1),
        };
        self.index = Some(idx);
        Some(self.entries[idx].as_str())
    }

    /// Step to a newer entry; past the newest returns an empty draft.
    pub fn forward(&mut self) -> &str {
        match self.index {
            Some(idx) if idx + 1 < self.entries.len() => {
                self.index = Some(idx + 1);
                self.entries[idx + 1].as_str()
            }
            _ => {
                // At bottom of history, back to an empty draft
                self.index = None;
                ""
            }
        }
    }

    pub fn is_navigating(&self) -> bool {
        self.index.is_some()
    }
}
