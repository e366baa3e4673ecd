//! General commands: help, navigation and small utilities.

use crate::error::CommandError;
use crate::output::Output;
use crate::registry::{CommandContext, CommandResult, Invocation};

const PROJECTS: &[(&str, &str)] = &[
    ("shellfolio", "This terminal. Command registry, CTF engine, Konami detector."),
    ("bridge-kit", "Schema-first API gateway with typed request validation."),
    ("tidewatch", "Log shipper that survives flaky networks."),
    ("paper-lantern", "Static site generator with incremental builds."),
];

const SKILLS: &[(&str, &str)] = &[
    ("languages", "Rust, TypeScript, Python, SQL"),
    ("systems", "Linux, networking, containers"),
    ("practice", "testing, code review, writing things down"),
];

const ABOUT: &str = "I build bridges between ideas and code.\n\
Engineer, tinkerer, occasional puzzle maker.\n\
There is more to this terminal than meets the eye.";

const CONTACT: &str = "email:  hello@example.com\n\
github: github.com/example\n\
Or just keep typing. Someone is listening.";

pub(super) fn help(call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    if let Some(name) = call.arg(0) {
        let command = call
            .registry
            .get(name)
            .ok_or_else(|| CommandError::Failed(format!("help: no help for '{}'", name)))?;
        let mut out = format!("{} - {}", command.name(), command.description());
        if let Some(usage) = command.usage() {
            out.push_str(&format!("\nusage: {}", usage));
        }
        return Ok(Output::text(out));
    }

    let mut commands: Vec<_> = call
        .registry
        .list()
        .into_iter()
        .filter(|c| !c.hidden())
        .collect();
    commands.sort_by(|a, b| a.name().cmp(b.name()));

    let width = commands.iter().map(|c| c.name().len()).max().unwrap_or(0);
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        commands
            .iter()
            .map(|c| format!("  {:<width$}  {}", c.name(), c.description(), width = width)),
    );
    Ok(Output::text(lines.join("\n")))
}

pub(super) fn clear(_call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    Ok(Output::clear())
}

pub(super) fn echo(call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    Ok(Output::text(call.rest(0)))
}

pub(super) fn whoami(_call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    if ctx.access.is_unlocked() {
        Ok(Output::text(format!("{} (root)", ctx.config.user)))
    } else {
        Ok(Output::text(ctx.config.user.clone()))
    }
}

pub(super) fn date(_call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    let now = chrono::Local::now();
    Ok(Output::text(now.format("%a %b %e %H:%M:%S %Z %Y").to_string()))
}

pub(super) fn history(_call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    let lines: Vec<String> = ctx
        .history
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>4}  {}", i + 1, line))
        .collect();
    Ok(Output::text(lines.join("\n")))
}

pub(super) fn ls(call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    let listing = |entries: &[(&str, &str)]| {
        entries
            .iter()
            .map(|(name, desc)| format!("{:<14} {}", name, desc))
            .collect::<Vec<_>>()
            .join("\n")
    };
    match call.arg(0).map(|a| a.trim_end_matches('/')) {
        None => Ok(Output::text("projects/  skills/  about.txt  contact.txt")),
        Some("projects") => Ok(Output::text(listing(PROJECTS))),
        Some("skills") => Ok(Output::text(listing(SKILLS))),
        Some(other) => Err(CommandError::Failed(format!(
            "ls: cannot access '{}': No such file or directory",
            other
        ))),
    }
}

pub(super) fn cat(call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    let file = call
        .arg(0)
        .ok_or_else(|| CommandError::Usage("cat <about|contact>".to_string()))?;
    match file.trim_end_matches(".txt") {
        "about" => Ok(Output::text(ABOUT)),
        "contact" => Ok(Output::text(CONTACT)),
        _ => Err(CommandError::Failed(format!(
            "cat: {}: No such file or directory",
            file
        ))),
    }
}

pub(super) fn exit(_call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    Ok(Output::text("logout"))
}
