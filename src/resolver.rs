//! Path resolvers used by the command-line front end

use crate::core::data::ResolveMode;
use crate::core::traits::PathResolver;
use crate::utils::error::AppResult;
use crate::utils::interactive::{prompt_input, prompt_line_editable};
use crate::utils::output::OutputStyle;
use std::io::IsTerminal;
use std::path::PathBuf;

fn question(mode: ResolveMode) -> &'static str {
    match mode {
        ResolveMode::Save => "Save to (Esc to cancel): ",
        ResolveMode::Open => "Open file (Esc to cancel): ",
    }
}

fn non_empty(answer: Option<String>) -> Option<PathBuf> {
    answer.filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Raw-mode line editor pre-filled with the proposed path
pub struct TerminalResolver;

impl PathResolver for TerminalResolver {
    fn resolve(&self, proposed: &str, mode: ResolveMode) -> AppResult<Option<PathBuf>> {
        if mode == ResolveMode::Open && !proposed.is_empty() {
            eprintln!("{}", OutputStyle::muted(&format!("{} does not exist", proposed)));
        }
        prompt_line_editable(&OutputStyle::label(question(mode)).to_string(), proposed).map(non_empty)
    }
}

/// Plain line read for pipes and dumb terminals
pub struct LineResolver;

impl PathResolver for LineResolver {
    fn resolve(&self, proposed: &str, mode: ResolveMode) -> AppResult<Option<PathBuf>> {
        let hint = match mode {
            ResolveMode::Save => "Enter a path to save to (e.g. /path/to/prompts.txt), blank to cancel",
            ResolveMode::Open => "Enter a path to open (e.g. /path/to/prompts.txt), blank to cancel",
        };
        eprintln!("{}", hint);
        if !proposed.is_empty() {
            eprintln!("{}", OutputStyle::muted(&format!("proposed: {}", proposed)));
        }
        prompt_input("> ").map(non_empty)
    }
}

/// Pick the resolver once, based on whether stdin is an interactive terminal
pub fn detect() -> Box<dyn PathResolver> {
    if std::io::stdin().is_terminal() {
        Box::new(TerminalResolver)
    } else {
        Box::new(LineResolver)
    }
}
