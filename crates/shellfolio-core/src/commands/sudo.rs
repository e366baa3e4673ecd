use crate::error::CommandError;
use crate::output::Output;
use crate::registry::{CommandContext, CommandResult, Invocation};

pub(super) fn sudo(call: &Invocation<'_>, ctx: &mut CommandContext<'_>) -> CommandResult {
    let request = call.rest(0).to_lowercase();
    match request.as_str() {
        "" => Err(CommandError::Usage(
            "sudo <access /secret | make me a coffee>".to_string(),
        )),
        "access /secret" | "access secret" => {
            if ctx.access.is_unlocked() {
                Ok(Output::success(
                    "Access granted. Welcome to /secret.\nType 'challenges' to begin.",
                ))
            } else {
                // the session treats the next line as the password
                ctx.access.request_password();
                Ok(Output::text(format!("[sudo] password for {}:", ctx.config.user)))
            }
        }
        "make me a coffee" | "make me a sandwich" => {
            Ok(Output::success("Okay. Brewing... (c[_])"))
        }
        _ => Err(CommandError::Failed(format!(
            "{} is not in the sudoers file. This incident will be reported.",
            ctx.config.user
        ))),
    }
}
