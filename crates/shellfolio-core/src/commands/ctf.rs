//! CTF commands. Everything that reveals challenges is gated on the
//! session being unlocked.

use crate::achievements::{self, format_achievement_unlock};
use crate::error::CommandError;
use crate::output::{ChallengeEntry, Component, Output};
use crate::registry::{CommandContext, CommandResult, Invocation};

fn require_unlocked(ctx: &CommandContext<'_>, what: &str) -> Result<(), CommandError> {
    if ctx.access.is_unlocked() {
        Ok(())
    } else {
        Err(CommandError::Locked(format!(
            "{} is restricted. Some doors open with an old cheat code.",
            what
        )))
    }
}

pub(super) fn challenges(_call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    require_unlocked(ctx, "challenges")?;
    let entries = ChallengeEntry::listing(ctx.catalog, ctx.progress.current());
    Ok(Output::component(Component::ChallengeList { entries }))
}

pub(super) fn hint(call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    require_unlocked(ctx, "hint")?;
    let id = call
        .arg(0)
        .ok_or_else(|| CommandError::Usage("hint <id>".to_string()))?;
    let challenge = ctx
        .catalog
        .get(id)
        .ok_or_else(|| CommandError::UnknownChallenge(id.to_string()))?;
    let mut out = format!("{}\n{}", challenge.title, challenge.description);
    match &challenge.hint {
        Some(hint) => out.push_str(&format!("\nHint: {}", hint)),
        None => out.push_str("\nNo hint for this one. You're on your own."),
    }
    Ok(Output::text(out))
}

pub(super) fn solve(call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    require_unlocked(ctx, "solve")?;
    let (Some(id), answer) = (call.arg(0), call.rest(1)) else {
        return Err(CommandError::Usage("solve <id> <answer>".to_string()));
    };
    if answer.trim().is_empty() {
        return Err(CommandError::Usage("solve <id> <answer>".to_string()));
    }
    let challenge = ctx
        .catalog
        .get(id)
        .ok_or_else(|| CommandError::UnknownChallenge(id.to_string()))?;

    if ctx.progress.current().is_solved(&challenge.id) {
        return Ok(Output::text(format!("{} is already solved.", challenge.id)));
    }

    if !ctx.catalog.validate(&challenge.id, &answer) {
        let attempts = ctx.access.record_attempt(&challenge.id);
        return Err(CommandError::Failed(format!(
            "Incorrect. Attempts on {}: {}",
            challenge.id, attempts
        )));
    }

    let before = ctx.progress.current().achievements.clone();
    let progress = ctx.progress.mark_solved(&challenge.id);
    let mut out = format!("Correct! {}", challenge.reward);
    for ach in achievements::newly_unlocked(&before, &progress.achievements) {
        out.push('\n');
        out.push_str(&format_achievement_unlock(&ach));
    }
    Ok(Output::success(out))
}

pub(super) fn progress(_call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    let progress = ctx.progress.current();
    Ok(Output::component(Component::Progress {
        solved: progress.solved_count(),
        total: ctx.catalog.len(),
        badges: achievements::format_badges(&progress.achievements),
    }))
}

pub(super) fn achievements(_call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    let unlocked = &ctx.progress.current().achievements;
    let all = achievements::all_achievements();
    let lines = all
        .iter()
        .map(|a| {
            let mark = if unlocked.contains(a.id) { a.badge } else { "[?]" };
            format!("{:<7} {:<15} {}", mark, a.name, a.description)
        })
        .collect();
    Ok(Output::component(Component::Achievements {
        lines,
        unlocked: all.iter().filter(|a| unlocked.contains(a.id)).count(),
        total: all.len(),
    }))
}

pub(super) fn reset(call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    if call.arg(0) != Some("--confirm") {
        return Ok(Output::text(
            "This erases all CTF progress. Run 'reset --confirm' to continue.",
        ));
    }
    ctx.progress.reset();
    Ok(Output::success("Progress erased."))
}

pub(super) fn konami(_call: &Invocation<'_>, _ctx: &mut CommandContext<'_>) -> CommandResult {
    Ok(Output::text("Typing it doesn't count. Use the arrow keys."))
}
