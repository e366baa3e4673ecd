//! CTF challenge catalog and answer validation.
//!
//! The catalog order is fixed; its length is the total used by the
//! achievement thresholds.
//!
//! Answers are compared after `trim()` and `to_lowercase()` only. No Unicode
//! normalisation is applied, so a precomposed and a decomposed accent are
//! different answers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One puzzle definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub solution: String,
    pub reward: String,
    pub difficulty: Difficulty,
}

impl Challenge {
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        solution: &str,
        reward: &str,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            hint: None,
            solution: solution.to_string(),
            reward: reward.to_string(),
            difficulty,
        }
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// Exact match after trimming and lower-casing both sides.
    pub fn accepts(&self, answer: &str) -> bool {
        let expected = normalize(&self.solution);
        !expected.is_empty() && normalize(answer) == expected
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Immutable, ordered set of challenges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    challenges: Vec<Challenge>,
}

impl Catalog {
    /// Build a catalog. Later duplicates of an id are dropped.
    pub fn new(challenges: Vec<Challenge>) -> Self {
        let mut unique: Vec<Challenge> = Vec::with_capacity(challenges.len());
        for challenge in challenges {
            if unique.iter().all(|c| c.id != challenge.id) {
                unique.push(challenge);
            }
        }
        Self { challenges: unique }
    }

    /// The challenges the terminal ships with.
    pub fn builtin() -> Self {
        Self::new(vec![
            Challenge::new(
                "base64-decode",
                "Intercepted Transmission",
                "We caught this on the wire: S2hhbGlkIGJ1aWxkcyBicmlkZ2VzLi4u",
                "Khalid builds bridges...",
                "FLAG{b64_is_not_encryption}",
                Difficulty::Easy,
            )
            .with_hint("64 characters in the alphabet, padding optional."),
            Challenge::new(
                "rot13",
                "Caesar's Favourite",
                "Gur pbqr vf n pensg",
                "the code is a craft",
                "FLAG{r0t_and_r0ll}",
                Difficulty::Easy,
            )
            .with_hint("Half the alphabet is all you need."),
            Challenge::new(
                "hex-dump",
                "Memory Dump",
                "A stray buffer: 706f7274666f6c696f",
                "portfolio",
                "FLAG{0x_marks_the_spot}",
                Difficulty::Medium,
            )
            .with_hint("Two characters per byte."),
            Challenge::new(
                "binary-whisper",
                "Binary Whisper",
                "01110010 01110101 01110011 01110100",
                "rust",
                "FLAG{zer0s_and_0nes}",
                Difficulty::Medium,
            ),
            Challenge::new(
                "morse-signal",
                "Signal From The Void",
                ".... . .-.. .-.. --- / .-- --- .-. .-.. -..",
                "hello world",
                "FLAG{dit_dit_dah}",
                Difficulty::Hard,
            )
            .with_hint("Samuel would know."),
        ])
    }

    pub fn all(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn get(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.challenges.iter().map(|c| c.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Check an answer. Unknown ids are simply wrong.
    pub fn validate(&self, id: &str, answer: &str) -> bool {
        self.get(id).map(|c| c.accepts(answer)).unwrap_or(false)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
