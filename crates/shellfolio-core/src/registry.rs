//! Command registry: parsing, lookup and dispatch.
//!
//! Every command is a single verb; multi-word phrases such as
//! `ls projects` or `sudo make me a coffee` reach the verb as arguments.
//! Dispatch never fails outward: unknown verbs, handler errors and handler
//! panics all come back as `error` outputs.

use crate::access::AccessState;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::CommandError;
use crate::output::Output;
use crate::progress::ProgressStore;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

pub type CommandResult = Result<Output, CommandError>;

/// Session state a handler may read or change.
pub struct CommandContext<'a> {
    pub progress: &'a mut ProgressStore,
    pub catalog: &'a Catalog,
    pub access: &'a mut AccessState,
    pub config: &'a Config,
    /// Previously submitted lines, oldest first
    pub history: &'a [String],
}

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub command: String,
    pub args: Vec<String>,
}

/// What a handler is called with
pub struct Invocation<'r> {
    pub command: &'r str,
    pub args: &'r [String],
    pub registry: &'r CommandRegistry,
}

impl Invocation<'_> {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Arguments from `start` joined back with single spaces
    pub fn rest(&self, start: usize) -> String {
        self.args.get(start..).unwrap_or_default().join(" ")
    }
}

pub trait Command {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    fn usage(&self) -> Option<&str> {
        None
    }

    /// Hidden commands dispatch but are left out of `help`.
    fn hidden(&self) -> bool {
        false
    }

    fn execute(&self, call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult;
}

/// Command backed by a function or closure
pub struct FnCommand<F> {
    name: String,
    description: String,
    usage: Option<String>,
    hidden: bool,
    handler: F,
}

impl<F> FnCommand<F>
where
    F: Fn(&Invocation<'_>, &mut CommandContext<'_>) -> CommandResult,
{
    pub fn new(name: &str, description: &str, handler: F) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            usage: None,
            hidden: false,
            handler,
        }
    }

    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Keep the command out of `help`.
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&Invocation<'_>, &mut CommandContext<'_>) -> CommandResult,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    fn hidden(&self) -> bool {
        self.hidden
    }

    fn execute(&self, call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
        (self.handler)(call, ctx)
    }
}

const NOT_FOUND_MESSAGES: &[&str] = &[
    "command not found. Try 'help'.",
    "command not found. Did you mean 'help'?",
    "no such command. This terminal is smaller than it looks.",
    "command not found. Nice try, though.",
    "unknown command. Type 'help' for the list.",
];

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under the lower-cased name; a later registration replaces
    /// an earlier one.
    pub fn register<C: Command + 'static>(&mut self, command: C) {
        self.register_boxed(Box::new(command));
    }

    pub fn register_boxed(&mut self, command: Box<dyn Command>) {
        let key = command.name().to_lowercase();
        if self.commands.insert(key.clone(), command).is_some() {
            debug!(command = %key, "command re-registered");
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(&name.to_lowercase()).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All commands, in no particular order.
    pub fn list(&self) -> Vec<&dyn Command> {
        self.commands.values().map(|c| c.as_ref()).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn parse(input: &str) -> ParsedInput {
        parse(input)
    }

    /// Parse and run one line.
    pub fn execute(&self, input: &str, ctx: &mut CommandContext<'_>) -> Output {
        let parsed = parse(input);
        let Some(command) = self.commands.get(&parsed.command) else {
            debug!(command = %parsed.command, "command not found");
            return not_found(&parsed.command);
        };

        let call = Invocation {
            command: &parsed.command,
            args: &parsed.args,
            registry: self,
        };
        debug!(command = %parsed.command, args = parsed.args.len(), "dispatching");

        match panic::catch_unwind(AssertUnwindSafe(|| command.execute(&call, ctx))) {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(command = %parsed.command, code = e.code(), error = %e, "command failed");
                Output::error(e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(command = %parsed.command, error = %message, "command panicked");
                Output::error(format!("{}: {}", parsed.command, message))
            }
        }
    }
}

fn not_found(command: &str) -> Output {
    let message = NOT_FOUND_MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("command not found");
    if command.is_empty() {
        Output::error(message)
    } else {
        Output::error(format!("{}: {}", command, message))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "internal error".to_string()
    }
}

/// Split on whitespace, keeping double-quoted runs together (quotes
/// stripped). The first token is lower-cased into the command name.
pub fn parse(input: &str) -> ParsedInput {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_token = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    let mut tokens = tokens.into_iter();
    let command = tokens.next().unwrap_or_default().to_lowercase();
    ParsedInput {
        command,
        args: tokens.collect(),
    }
}
