//! Shellfolio terminal front-end - exposes modules for testing

pub mod errors;
pub mod logging;
pub mod render;
pub mod repl;
pub mod tui;
