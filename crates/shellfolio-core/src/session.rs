//! Terminal session controller.
//!
//! Owns the transcript, the input history, the command table and the
//! lock state. Front-ends feed it lines and key presses and read the
//! transcript back; nothing here returns an error.

use crate::access::AccessState;
use crate::achievements::{self, format_achievement_unlock};
use crate::catalog::Catalog;
use crate::commands;
use crate::config::Config;
use crate::history::InputHistory;
use crate::konami::{Key, SequenceDetector, KONAMI_SEQUENCE};
use crate::output::{Output, OutputKind};
use crate::progress::{Progress, ProgressStore};
use crate::registry::{CommandContext, CommandRegistry};
use crate::storage::Storage;
use crate::transcript::{Transcript, TranscriptLine};
use std::time::Instant;
use tracing::{info, info_span, warn};
use uuid::Uuid;

pub struct TerminalSession {
    id: Uuid,
    config: Config,
    catalog: Catalog,
    registry: CommandRegistry,
    progress: ProgressStore,
    access: AccessState,
    detector: SequenceDetector,
    transcript: Transcript,
    history: InputHistory,
}

impl TerminalSession {
    /// Session with the built-in catalog and commands.
    pub fn new(config: Config, storage: Box<dyn Storage>) -> Self {
        Self::with_parts(
            config,
            Catalog::builtin(),
            commands::builtin_registry(),
            storage,
        )
    }

    pub fn with_parts(
        config: Config,
        catalog: Catalog,
        registry: CommandRegistry,
        storage: Box<dyn Storage>,
    ) -> Self {
        let progress = ProgressStore::new(storage, &catalog);
        let access = AccessState::new(progress.current().konami_unlocked);
        let detector =
            SequenceDetector::new(KONAMI_SEQUENCE.to_vec(), config.konami_idle_window());
        Self {
            id: Uuid::new_v4(),
            config,
            catalog,
            registry,
            progress,
            access,
            detector,
            transcript: Transcript::new(),
            history: InputHistory::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Append the welcome banner.
    pub fn greet(&mut self) {
        self.system("Welcome to the portfolio terminal.");
        self.system("Type 'help' to see what you can do.");
        if self.access.is_unlocked() {
            self.system("Secret access remembered. Type 'challenges' to continue.");
        }
    }

    /// Run one line of user input.
    pub fn submit(&mut self, line: &str) {
        let span = info_span!("submit", session = %self.id);
        let _enter = span.enter();

        if self.access.awaiting_password() {
            self.submit_password(line);
            return;
        }

        self.transcript.push(TranscriptLine::input(line));
        if line.trim().is_empty() {
            return;
        }
        self.history.push(line);

        let output = {
            let mut ctx = CommandContext {
                progress: &mut self.progress,
                catalog: &self.catalog,
                access: &mut self.access,
                config: &self.config,
                history: self.history.entries(),
            };
            self.registry.execute(line, &mut ctx)
        };
        self.apply_output(&output);
    }

    /// Drop every transcript line.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    pub fn history_back(&mut self) -> Option<&str> {
        self.history.back()
    }

    pub fn history_forward(&mut self) -> &str {
        self.history.forward()
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn handle_key(&mut self, key: Key) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Feed a key press to the secret-sequence detector. Returns true when
    /// it completed the sequence.
    pub fn handle_key_at(&mut self, key: Key, at: Instant) -> bool {
        if !self.detector.push_at(key, at) {
            return false;
        }
        self.unlock_by_sequence();
        true
    }

    /// Run `callback` every time the secret sequence is entered.
    pub fn on_unlock(&mut self, callback: impl FnMut() + 'static) {
        self.detector.subscribe(callback);
    }

    pub fn is_unlocked(&self) -> bool {
        self.access.is_unlocked()
    }

    pub fn awaiting_password(&self) -> bool {
        self.access.awaiting_password()
    }

    pub fn transcript(&self) -> &[TranscriptLine] {
        self.transcript.lines()
    }

    pub fn clear_count(&self) -> u64 {
        self.transcript.clear_count()
    }

    pub fn progress(&self) -> &Progress {
        self.progress.current()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// For registering extra or replacement commands after construction.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    fn apply_output(&mut self, output: &Output) {
        if output.kind == OutputKind::Clear {
            self.clear();
            return;
        }
        self.transcript.push_output(output);
    }

    fn submit_password(&mut self, line: &str) {
        self.access.cancel_password();
        self.transcript
            .push(TranscriptLine::input("*".repeat(line.chars().count())));

        if line.trim() == self.config.sudo_password {
            self.access.unlock();
            info!(session = %self.id, "unlocked by password");
            self.apply_output(&Output::success(
                "Access granted. Welcome to /secret.\nType 'challenges' to begin.",
            ));
        } else {
            warn!(session = %self.id, "wrong sudo password");
            self.apply_output(&Output::error("Sorry, try again."));
        }
    }

    fn unlock_by_sequence(&mut self) {
        let already = self.access.is_unlocked() && self.progress.current().konami_unlocked;
        let before = self.progress.current().achievements.clone();
        let progress = self.progress.unlock_konami();
        self.access.unlock();
        info!(session = %self.id, "unlocked by key sequence");

        self.system("^ ^ v v < > < > B A");
        if already {
            self.system("You already know the code. Access remains granted.");
        } else {
            self.system("Access granted. Hidden challenges unlocked.");
            self.system("Type 'challenges' to begin.");
        }
        for ach in achievements::newly_unlocked(&before, &progress.achievements) {
            self.system(&format_achievement_unlock(&ach));
        }
    }

    fn system(&mut self, text: &str) {
        self.transcript.push(TranscriptLine::system(text));
    }
}
