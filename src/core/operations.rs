//! Core operations implementation
//!
//! `PromptOperations` is the single entry point a host drives: it picks the
//! target file, hands the request to the library store or the history log,
//! and always answers with a `(prompt, status)` reply.

use crate::config::Config;
use crate::core::{
    data::{Action, HistoryEntry, Library, Reply, ResolveMode, Status},
    history::HistoryLog,
    library::LibraryStore,
    traits::PathResolver,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main operations hub
pub struct PromptOperations {
    config: Config,
    resolver: Box<dyn PathResolver>,
    rng: Box<dyn RngCore>,
}

impl PromptOperations {
    /// Create a new PromptOperations instance drawing from OS entropy
    pub fn new(config: Config, resolver: Box<dyn PathResolver>) -> Self {
        Self {
            config,
            resolver,
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source, e.g. with a seeded generator
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Switch to a seeded generator so the next draws are repeatable
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Box::new(StdRng::seed_from_u64(seed));
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pick the file to work on.
    ///
    /// A blank proposal means the configured default. Save targets with a
    /// parent directory and open targets that exist are taken as given;
    /// anything else goes through the resolver.
    fn resolve_path(&self, proposed: &str, default: &Path, mode: ResolveMode) -> Result<PathBuf, Status> {
        let proposed = proposed.trim();
        let candidate = if proposed.is_empty() {
            default.to_path_buf()
        } else {
            PathBuf::from(proposed)
        };

        let usable = match mode {
            ResolveMode::Save => candidate
                .parent()
                .is_some_and(|p| !p.as_os_str().is_empty()),
            ResolveMode::Open => candidate.exists(),
        };
        if usable {
            return Ok(candidate);
        }

        debug!(proposed = %candidate.display(), ?mode, "asking resolver for a path");
        match self.resolver.resolve(&candidate.to_string_lossy(), mode) {
            Ok(Some(path)) if !path.as_os_str().is_empty() => Ok(path),
            Ok(_) => Err(Status::Cancelled),
            Err(e) => {
                warn!("path resolution failed: {}", e);
                Err(Status::IoFailure(e.to_string()))
            }
        }
    }

    fn history_path(&self, proposed: &str, mode: ResolveMode) -> Result<PathBuf, Status> {
        self.resolve_path(proposed, &self.config.general.history_file, mode)
    }

    fn library_path(&self, proposed: &str, mode: ResolveMode) -> Result<PathBuf, Status> {
        self.resolve_path(proposed, &self.config.general.library_file, mode)
    }

    /// Dispatch an action the way a host node would
    pub fn process(&mut self, action: Action, prompt: &str, path: &str) -> Reply {
        match action {
            Action::None => Reply::new(prompt, Status::Idle),
            Action::Save => self.save(prompt, path),
            Action::Load => self.load(path),
            Action::LoadHistory => self.load_history(path),
            Action::RandomCombination => self.random_combination(path),
            Action::CleanLibrary => self.clean_library(path),
            Action::AddToLibrary => self.add_to_library(prompt, path),
        }
    }

    /// Append `prompt` to the history log
    pub fn save(&self, prompt: &str, path: &str) -> Reply {
        if prompt.trim().is_empty() {
            return Reply::new(prompt, Status::EmptyInput);
        }
        match self.history_path(path, ResolveMode::Save) {
            Ok(path) => HistoryLog::new(path).append(prompt),
            Err(status) => Reply::new(prompt, status),
        }
    }

    /// Most recent prompt in the history log
    pub fn load(&self, path: &str) -> Reply {
        match self.history_path(path, ResolveMode::Open) {
            Ok(path) => HistoryLog::new(path).read_last(),
            Err(status) => Reply::empty(status),
        }
    }

    /// The whole history log as stored
    pub fn load_history(&self, path: &str) -> Reply {
        match self.history_path(path, ResolveMode::Open) {
            Ok(path) => HistoryLog::new(path).read_all(),
            Err(status) => Reply::empty(status),
        }
    }

    pub fn random_combination(&mut self, path: &str) -> Reply {
        match self.library_path(path, ResolveMode::Open) {
            Ok(path) => LibraryStore::new(path)
                .random_combination(&mut *self.rng, self.config.general.max_picks),
            Err(status) => Reply::empty(status),
        }
    }

    pub fn clean_library(&self, path: &str) -> Reply {
        match self.library_path(path, ResolveMode::Open) {
            Ok(path) => LibraryStore::new(path).clean(),
            Err(status) => Reply::empty(status),
        }
    }

    pub fn add_to_library(&self, prompt: &str, path: &str) -> Reply {
        if prompt.trim().is_empty() {
            return Reply::new(prompt, Status::EmptyInput);
        }
        match self.library_path(path, ResolveMode::Save) {
            Ok(path) => LibraryStore::new(path).add(prompt),
            Err(status) => Reply::new(prompt, status),
        }
    }

    /// Current library contents for listing
    pub fn library(&self, path: &str) -> Result<Library, Status> {
        let path = self.library_path(path, ResolveMode::Open)?;
        Ok(LibraryStore::new(path).load())
    }

    /// Structured history entries for listing
    pub fn history_entries(&self, path: &str) -> Result<Vec<HistoryEntry>, Status> {
        let path = self.history_path(path, ResolveMode::Open)?;
        if !path.exists() {
            return Err(Status::NotFound { path });
        }
        HistoryLog::new(path)
            .entries()
            .map_err(|e| Status::IoFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneralConfig;
    use crate::core::traits::NoPrompt;
    use crate::utils::error::AppResult;
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Answers every request with the same path and counts how often it was asked
    struct FixedResolver {
        answer: Option<PathBuf>,
        calls: Rc<Cell<usize>>,
    }

    impl PathResolver for FixedResolver {
        fn resolve(&self, _proposed: &str, _mode: ResolveMode) -> AppResult<Option<PathBuf>> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.answer.clone())
        }
    }

    fn test_config(dir: &TempDir) -> Config {
        Config {
            general: GeneralConfig {
                history_file: dir.path().join("history.txt"),
                library_file: dir.path().join("library.txt"),
                max_picks: 3,
                color: false,
                pager: false,
            },
        }
    }

    fn ops(dir: &TempDir) -> PromptOperations {
        PromptOperations::new(test_config(dir), Box::new(NoPrompt)).with_rng(StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_none_action_passes_prompt_through() {
        let dir = TempDir::new().unwrap();
        let (data, status) = ops(&dir).process(Action::None, "keep me", "").into_pair();
        assert_eq!(data, "keep me");
        assert_eq!(status, "");
    }

    #[test]
    fn test_save_and_load_with_default_paths() {
        let dir = TempDir::new().unwrap();
        let mut ops = ops(&dir);

        let reply = ops.process(Action::Save, "first", "");
        assert!(matches!(reply.status, Status::Saved { .. }));
        ops.process(Action::Save, "second", "");

        let reply = ops.process(Action::Load, "", "");
        assert_eq!(reply.prompt, "second");

        let reply = ops.process(Action::LoadHistory, "", "");
        assert_eq!(reply.prompt, fs::read_to_string(dir.path().join("history.txt")).unwrap());
    }

    #[test]
    fn test_save_empty_prompt_skips_resolution() {
        let dir = TempDir::new().unwrap();
        let calls = Rc::new(Cell::new(0));
        let resolver = FixedResolver {
            answer: Some(dir.path().join("x.txt")),
            calls: calls.clone(),
        };
        let ops = PromptOperations::new(test_config(&dir), Box::new(resolver));

        let reply = ops.save("   ", "bare-name.txt");
        assert_eq!(reply.status, Status::EmptyInput);
        assert_eq!(calls.get(), 0);
        assert!(!dir.path().join("x.txt").exists());
    }

    #[test]
    fn test_bare_file_name_asks_resolver() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("chosen.txt");
        let calls = Rc::new(Cell::new(0));
        let resolver = FixedResolver {
            answer: Some(target.clone()),
            calls: calls.clone(),
        };
        let ops = PromptOperations::new(test_config(&dir), Box::new(resolver));

        let reply = ops.save("hello", "bare-name.txt");
        assert_eq!(reply.status, Status::Saved { path: target.clone() });
        assert_eq!(calls.get(), 1);

        // an existing file is opened without asking again
        let reply = ops.load(&target.to_string_lossy());
        assert_eq!(reply.prompt, "hello");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_cancelled_resolution_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let ops = ops(&dir);

        let reply = ops.save("something", "bare-name.txt");
        assert_eq!(reply.prompt, "something");
        assert_eq!(reply.status, Status::Cancelled);

        let reply = ops.add_to_library("a, b", "bare-name.txt");
        assert_eq!(reply.status, Status::Cancelled);

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_open_missing_file_without_resolver_is_cancelled() {
        let dir = TempDir::new().unwrap();
        let mut ops = ops(&dir);
        assert_eq!(ops.load("").status, Status::Cancelled);
        assert_eq!(ops.random_combination("").status, Status::Cancelled);
        assert_eq!(ops.clean_library("").status, Status::Cancelled);
    }

    #[test]
    fn test_resolver_pointing_at_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");
        let resolver = FixedResolver {
            answer: Some(missing.clone()),
            calls: Rc::new(Cell::new(0)),
        };
        let mut ops = PromptOperations::new(test_config(&dir), Box::new(resolver));

        assert_eq!(ops.load("").status, Status::NotFound { path: missing.clone() });
        assert_eq!(ops.load_history("").status, Status::NotFound { path: missing });
        assert_eq!(ops.random_combination("").status, Status::EmptyLibrary);
    }

    #[test]
    fn test_library_flow() {
        let dir = TempDir::new().unwrap();
        let mut ops = ops(&dir);

        let reply = ops.process(Action::AddToLibrary, "red, blue, red", "");
        assert_eq!(reply.status, Status::Added { added: 2, total: 2 });

        let reply = ops.process(Action::AddToLibrary, "blue, red", "");
        assert_eq!(reply.status, Status::NoNewContent);

        let reply = ops.process(Action::RandomCombination, "", "");
        let picked: Vec<&str> = reply.prompt.split(", ").collect();
        assert!((1..=2).contains(&picked.len()));
        assert!(picked.iter().all(|p| *p == "red" || *p == "blue"));

        fs::write(dir.path().join("library.txt"), "red, blue, red, green").unwrap();
        let reply = ops.process(Action::CleanLibrary, "", "");
        assert_eq!(reply.prompt, "red, blue, green");
        assert_eq!(reply.status, Status::Cleaned { raw: 4, unique: 3 });

        assert_eq!(ops.library("").unwrap().fragments(), ["red", "blue", "green"]);
    }

    #[test]
    fn test_seeded_rng_is_repeatable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("library.txt"), "a, b, c, d, e, f").unwrap();

        let draw = |seed| {
            let mut ops = PromptOperations::new(test_config(&dir), Box::new(NoPrompt))
                .with_rng(StdRng::seed_from_u64(seed));
            (0..5)
                .map(|_| ops.random_combination("").prompt)
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));

        let mut ops = ops(&dir);
        ops.reseed(9);
        let reseeded: Vec<_> = (0..5).map(|_| ops.random_combination("").prompt).collect();
        assert_eq!(reseeded, draw(9));
    }

    #[test]
    fn test_history_entries() {
        let dir = TempDir::new().unwrap();
        let ops = ops(&dir);
        let missing = dir.path().join("history.txt");
        fs::write(dir.path().join("other.txt"), "").unwrap();

        assert_eq!(
            ops.history_entries(&dir.path().join("other.txt").to_string_lossy()).unwrap(),
            Vec::new()
        );
        assert_eq!(ops.history_entries(""), Err(Status::Cancelled));

        ops.save("one", "");
        ops.save("two\nlines", "");
        let entries = ops.history_entries(&missing.to_string_lossy()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].body, "two\nlines");
    }
}
