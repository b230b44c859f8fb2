//! Core data structures for prompt management
//!
//! This module contains the library and history types plus the
//! `(data, status)` reply every operation hands back to its caller.

use crate::utils::format::FRAGMENT_SEPARATOR;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Ordered, duplicate-free list of prompt fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    fragments: Vec<String>,
}

impl Library {
    /// Create a new empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Split on `,`, trim, drop empty pieces and keep only the first
    /// occurrence of each fragment.
    pub fn parse(raw: &str) -> Self {
        let mut seen = HashSet::new();
        let fragments = raw
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(*p))
            .map(str::to_string)
            .collect();
        Self { fragments }
    }

    /// Number of non-empty pieces before deduplication
    pub fn count_raw(raw: &str) -> usize {
        raw.split(',').filter(|p| !p.trim().is_empty()).count()
    }

    pub fn serialize(&self) -> String {
        self.fragments.join(FRAGMENT_SEPARATOR)
    }

    /// Append a fragment unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, fragment: &str) -> bool {
        let fragment = fragment.trim();
        if fragment.is_empty() || self.contains(fragment) {
            return false;
        }
        self.fragments.push(fragment.to_string());
        true
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.fragments.iter().any(|f| f == fragment)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }
}

/// A single timestamped block of the history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub body: String,
}

/// Whether a path is wanted for writing or for reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    Save,
    Open,
}

/// What the caller asked the prompt manager to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Save,
    Load,
    LoadHistory,
    RandomCombination,
    CleanLibrary,
    AddToLibrary,
}

impl Action {
    pub fn mode(&self) -> ResolveMode {
        match self {
            Action::Save | Action::AddToLibrary => ResolveMode::Save,
            _ => ResolveMode::Open,
        }
    }
}

/// Outcome of an operation, rendered as the human-readable status string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Saved { path: PathBuf },
    Loaded { path: PathBuf },
    HistoryLoaded { path: PathBuf },
    Combined { picked: usize, total: usize },
    Cleaned { raw: usize, unique: usize },
    Added { added: usize, total: usize },
    EmptyInput,
    NotFound { path: PathBuf },
    Cancelled,
    Duplicate,
    NoNewContent,
    EmptyLibrary,
    EmptyHistory,
    IoFailure(String),
}

impl Status {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Status::EmptyInput
                | Status::NotFound { .. }
                | Status::EmptyLibrary
                | Status::IoFailure(_)
        )
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => Ok(()),
            Status::Saved { path } => write!(f, "Saved prompt to {}", path.display()),
            Status::Loaded { path } => write!(f, "Loaded last prompt from {}", path.display()),
            Status::HistoryLoaded { path } => {
                write!(f, "Loaded prompt history from {}", path.display())
            }
            Status::Combined { picked, total } => write!(
                f,
                "Combined {} of {} unique library fragments",
                picked, total
            ),
            Status::Cleaned { raw, unique } => write!(
                f,
                "Cleaned library: {} fragments before, {} unique after",
                raw, unique
            ),
            Status::Added { added, total } => write!(
                f,
                "Added {} new fragment(s), library now holds {}",
                added, total
            ),
            Status::EmptyInput => write!(f, "Prompt is empty, nothing to save"),
            Status::NotFound { path } => write!(f, "File not found: {}", path.display()),
            Status::Cancelled => write!(f, "Cancelled: no file selected"),
            Status::Duplicate => write!(f, "Prompt already in history, not saved"),
            Status::NoNewContent => write!(f, "No new fragments, library unchanged"),
            Status::EmptyLibrary => write!(f, "No usable fragments found in library"),
            Status::EmptyHistory => write!(f, "History is empty"),
            Status::IoFailure(msg) => write!(f, "File operation failed: {}", msg),
        }
    }
}

/// The `(prompt, status)` pair every operation returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub prompt: String,
    pub status: Status,
}

impl Reply {
    pub fn new(prompt: impl Into<String>, status: Status) -> Self {
        Self {
            prompt: prompt.into(),
            status,
        }
    }

    /// Reply carrying no data
    pub fn empty(status: Status) -> Self {
        Self::new(String::new(), status)
    }

    pub fn into_pair(self) -> (String, String) {
        (self.prompt, self.status.to_string())
    }
}
