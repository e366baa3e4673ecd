//! Built-in terminal commands.

mod ctf;
mod info;
mod sudo;

use crate::registry::{CommandRegistry, FnCommand};

/// A registry holding every built-in command.
pub fn builtin_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry);
    registry
}

pub fn register_builtins(registry: &mut CommandRegistry) {
    // General
    registry.register(
        FnCommand::new("help", "List commands, or describe one", info::help)
            .with_usage("help [command]"),
    );
    registry.register(FnCommand::new("clear", "Clear the terminal", info::clear));
    registry.register(
        FnCommand::new("echo", "Print the arguments", info::echo).with_usage("echo <text...>"),
    );
    registry.register(FnCommand::new("whoami", "Who is at the keyboard", info::whoami));
    registry.register(FnCommand::new("date", "Show the current date and time", info::date));
    registry.register(FnCommand::new("history", "Show previously entered commands", info::history));
    registry.register(
        FnCommand::new("ls", "List portfolio sections", info::ls).with_usage("ls [projects|skills]"),
    );
    registry.register(
        FnCommand::new("cat", "Print a portfolio file", info::cat).with_usage("cat <about|contact>"),
    );
    for name in ["exit", "logout", "quit"] {
        registry.register(FnCommand::new(name, "Leave the terminal", info::exit).hide());
    }

    // Privilege
    registry.register(
        FnCommand::new("sudo", "Run a command as root", sudo::sudo)
            .with_usage("sudo <access /secret | make me a coffee>"),
    );

    // CTF
    registry.register(FnCommand::new("challenges", "List CTF challenges", ctf::challenges));
    registry.register(
        FnCommand::new("hint", "Show the hint for a challenge", ctf::hint).with_usage("hint <id>"),
    );
    registry.register(
        FnCommand::new("solve", "Submit an answer", ctf::solve).with_usage("solve <id> <answer>"),
    );
    registry.register(FnCommand::new("progress", "Show CTF progress", ctf::progress));
    registry.register(FnCommand::new("achievements", "Show achievements", ctf::achievements));
    registry.register(
        FnCommand::new("reset", "Erase all CTF progress", ctf::reset).with_usage("reset --confirm"),
    );
    registry.register(FnCommand::new("konami", "It's not that easy", ctf::konami).hide());
}
