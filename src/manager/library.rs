// Library operations - random, clean, add, list

use crate::cli::{FileArgs, PromptArgs, RandomArgs};
use crate::core::data::{Action, Reply, Status};
use crate::core::operations::PromptOperations;
use crate::manager::prompt::collect_prompt;
use crate::utils::error::AppResult;
use crate::utils::output::{DisplayFormatter, OutputStyle, print_reply};

pub fn handle_random_command(ops: &mut PromptOperations, args: &RandomArgs) -> AppResult<()> {
    if let Some(seed) = args.seed {
        ops.reseed(seed);
    }
    let reply = ops.process(Action::RandomCombination, "", args.file.as_deref().unwrap_or_default());
    print_reply(&reply);
    Ok(())
}

pub fn handle_clean_command(ops: &mut PromptOperations, args: &FileArgs) -> AppResult<()> {
    let reply = ops.process(Action::CleanLibrary, "", args.file.as_deref().unwrap_or_default());
    print_reply(&reply);
    Ok(())
}

pub fn handle_add_command(ops: &mut PromptOperations, args: &PromptArgs) -> AppResult<()> {
    let reply = match collect_prompt(args)? {
        Some(prompt) => ops.process(Action::AddToLibrary, &prompt, args.file.as_deref().unwrap_or_default()),
        None => Reply::empty(Status::Cancelled),
    };
    OutputStyle::print_status(&reply.status);
    Ok(())
}

pub fn handle_library_command(ops: &mut PromptOperations, args: &FileArgs) -> AppResult<()> {
    match ops.library(args.file.as_deref().unwrap_or_default()) {
        Ok(library) => DisplayFormatter::print_library(&library),
        Err(status) => OutputStyle::print_status(&status),
    }
    Ok(())
}
