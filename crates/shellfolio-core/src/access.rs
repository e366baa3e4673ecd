//! Session-local lock state.
//!
//! Locked until unlocked; nothing re-locks a session. Not persisted.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct AccessState {
    unlocked: bool,
    awaiting_password: bool,
    attempts: HashMap<String, u32>,
}

impl AccessState {
    pub fn new(unlocked: bool) -> Self {
        Self {
            unlocked,
            ..Self::default()
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn unlock(&mut self) {
        self.unlocked = true;
        self.awaiting_password = false;
    }

    /// The next submitted line is a password, not a command.
    pub fn request_password(&mut self) {
        self.awaiting_password = true;
    }

    pub fn awaiting_password(&self) -> bool {
        self.awaiting_password
    }

    pub fn cancel_password(&mut self) {
        self.awaiting_password = false;
    }

    /// Count a wrong answer and return the running total.
    pub fn record_attempt(&mut self, challenge_id: &str) -> u32 {
        let count = self.attempts.entry(challenge_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn attempts(&self, challenge_id: &str) -> u32 {
        self.attempts.get(challenge_id).copied().unwrap_or(0)
    }
}
