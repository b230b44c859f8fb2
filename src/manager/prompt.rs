// History operations - save, load, history

use std::io::IsTerminal;

use crate::cli::{FileArgs, HistoryArgs, PromptArgs};
use crate::core::data::{Action, Reply, Status};
use crate::core::operations::PromptOperations;
use crate::utils::error::AppResult;
use crate::utils::interactive::{prompt_multiline, read_stdin};
use crate::utils::output::{DisplayFormatter, OutputStyle, print_reply};
use crate::utils::pagination::print_paged;

fn file_arg(file: &Option<String>) -> &str {
    file.as_deref().unwrap_or_default()
}

/// Prompt text from the argument, piped stdin, or an interactive editor.
/// `None` when the user backed out of the editor.
pub(crate) fn collect_prompt(args: &PromptArgs) -> AppResult<Option<String>> {
    if let Some(prompt) = &args.prompt {
        return Ok(Some(prompt.clone()));
    }
    if std::io::stdin().is_terminal() {
        prompt_multiline(&format!("{}", OutputStyle::label("Prompt (Enter to finish, Esc to cancel):")))
    } else {
        read_stdin().map(Some)
    }
}

pub fn handle_save_command(ops: &mut PromptOperations, args: &PromptArgs) -> AppResult<()> {
    let reply = match collect_prompt(args)? {
        Some(prompt) => ops.process(Action::Save, &prompt, file_arg(&args.file)),
        None => Reply::empty(Status::Cancelled),
    };
    // the saved text is already on screen, only report the outcome
    OutputStyle::print_status(&reply.status);
    Ok(())
}

pub fn handle_load_command(ops: &mut PromptOperations, args: &FileArgs) -> AppResult<()> {
    let reply = ops.process(Action::Load, "", file_arg(&args.file));
    print_reply(&reply);
    Ok(())
}

pub fn handle_history_command(ops: &mut PromptOperations, args: &HistoryArgs) -> AppResult<()> {
    let file = file_arg(&args.file);

    if let Some(format) = &args.format {
        return match ops.history_entries(file) {
            Ok(entries) => DisplayFormatter::format_entries(&entries, format),
            Err(status) => {
                OutputStyle::print_status(&status);
                Ok(())
            }
        };
    }

    let reply = ops.process(Action::LoadHistory, "", file);
    if !reply.prompt.is_empty() {
        print_paged(&reply.prompt, ops.config().general.pager)?;
    }
    OutputStyle::print_status(&reply.status);
    Ok(())
}
