//! Core of the shellfolio terminal: command registry and dispatch, CTF
//! catalog and progress, the Konami detector and the session controller.
//!
//! Nothing here touches a real terminal. Front-ends own the screen and
//! feed a `TerminalSession` with lines and key presses.

pub mod access;
pub mod achievements;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod konami;
pub mod output;
pub mod progress;
pub mod registry;
pub mod session;
pub mod storage;
pub mod transcript;

pub use catalog::{Catalog, Challenge, Difficulty};
pub use config::Config;
pub use error::{CommandError, ConfigError, StorageError};
pub use konami::{Key, SequenceDetector, KONAMI_SEQUENCE};
pub use output::{ChallengeEntry, Component, Output, OutputKind};
pub use progress::{Progress, ProgressStore, LEGACY_UNLOCK_KEY, PROGRESS_KEY};
pub use registry::{
    parse, Command, CommandContext, CommandRegistry, CommandResult, FnCommand, Invocation,
    ParsedInput,
};
pub use session::TerminalSession;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use transcript::{LineKind, Transcript, TranscriptLine};

/// Crate version, shown by `shellfolio --version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
