//! Key-sequence detector for the Konami code.
//!
//! Keeps a fixed-size window of the most recent keys. A full match fires
//! every subscriber once, in registration order, and empties the window.
//! A gap longer than the idle window between two keys empties the window
//! first, so a stale partial sequence cannot be finished by unrelated
//! typing later.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Escape,
    Tab,
    Char(char),
    Other,
}

/// Up Up Down Down Left Right Left Right B A
pub const KONAMI_SEQUENCE: [Key; 10] = [
    Key::Up,
    Key::Up,
    Key::Down,
    Key::Down,
    Key::Left,
    Key::Right,
    Key::Left,
    Key::Right,
    Key::Char('b'),
    Key::Char('a'),
];

pub const DEFAULT_IDLE_WINDOW: Duration = Duration::from_secs(2);

pub struct SequenceDetector {
    target: Vec<Key>,
    window: VecDeque<Key>,
    idle_window: Option<Duration>,
    last_key_at: Option<Instant>,
    subscribers: Vec<Box<dyn FnMut()>>,
}

impl SequenceDetector {
    pub fn new(target: Vec<Key>, idle_window: Option<Duration>) -> Self {
        Self {
            window: VecDeque::with_capacity(target.len()),
            target,
            idle_window,
            last_key_at: None,
            subscribers: Vec::new(),
        }
    }

    /// Konami detector with the default idle window.
    pub fn konami() -> Self {
        Self::new(KONAMI_SEQUENCE.to_vec(), Some(DEFAULT_IDLE_WINDOW))
    }

    pub fn with_idle_window(mut self, idle_window: Option<Duration>) -> Self {
        self.idle_window = idle_window;
        self
    }

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn push(&mut self, key: Key) -> bool {
        self.push_at(key, Instant::now())
    }

    /// Feed one key observed at `at`. Returns true when it completed the
    /// sequence.
    pub fn push_at(&mut self, key: Key, at: Instant) -> bool {
        if self.target.is_empty() {
            return false;
        }

        if let (Some(window), Some(last)) = (self.idle_window, self.last_key_at) {
            if at.saturating_duration_since(last) > window {
                self.window.clear();
            }
        }
        self.last_key_at = Some(at);

        self.window.push_back(key);
        while self.window.len() > self.target.len() {
            self.window.pop_front();
        }

        if self.window.len() == self.target.len() && self.window.iter().eq(self.target.iter()) {
            debug!(subscribers = self.subscribers.len(), "key sequence matched");
            for callback in self.subscribers.iter_mut() {
                callback();
            }
            self.window.clear();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.last_key_at = None;
    }

    /// Keys currently held in the window
    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    pub fn target(&self) -> &[Key] {
        &self.target
    }
}

impl Default for SequenceDetector {
    fn default() -> Self {
        Self::konami()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_detector() -> (SequenceDetector, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let mut detector = SequenceDetector::konami().with_idle_window(None);
        let counter = Rc::clone(&hits);
        detector.subscribe(move || counter.set(counter.get() + 1));
        (detector, hits)
    }

    #[test]
    fn test_window_never_grows_past_target() {
        let (mut detector, _) = counting_detector();
        for _ in 0..50 {
            detector.push(Key::Char('x'));
        }
        assert_eq!(detector.buffered(), KONAMI_SEQUENCE.len());
    }

    #[test]
    fn test_match_after_noise() {
        let (mut detector, hits) = counting_detector();
        for c in "hello".chars() {
            detector.push(Key::Char(c));
        }
        for key in KONAMI_SEQUENCE {
            detector.push(key);
        }
        assert_eq!(hits.get(), 1);
        assert_eq!(detector.buffered(), 0);
    }

    #[test]
    fn test_case_sensitive_keys() {
        let (mut detector, hits) = counting_detector();
        for key in &KONAMI_SEQUENCE[..8] {
            detector.push(*key);
        }
        detector.push(Key::Char('B'));
        detector.push(Key::Char('A'));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_empty_target_never_matches() {
        let mut detector = SequenceDetector::new(Vec::new(), None);
        assert!(!detector.push(Key::Up));
    }
}
