//! Promptvault - keep generation prompts in a history log and a fragment library
//!
//! The history log is a plain text file of `=== <timestamp> ===` blocks; the
//! library is a single comma-separated line of unique fragments. Every
//! operation answers with a `(prompt, status)` pair and never fails loudly.

pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod resolver;
pub mod utils;

// Re-export core types and traits for easier use
pub use crate::core::{
    data::{Action, HistoryEntry, Library, Reply, ResolveMode, Status},
    history::HistoryLog,
    library::LibraryStore,
    operations::PromptOperations,
    traits::{NoPrompt, PathResolver},
};
