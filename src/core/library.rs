//! Comma-delimited fragment library kept in a single text file

use crate::core::data::{Library, Reply, Status};
use crate::utils::error::{AppError, AppResult};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default upper bound on fragments drawn per combination
pub const DEFAULT_MAX_PICKS: usize = 3;

pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file text, `None` when the file does not exist
    fn read_raw(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::io(&self.path, e)),
        }
    }

    /// Load the deduplicated library. Missing or unreadable files yield an empty library.
    pub fn load(&self) -> Library {
        match self.read_raw() {
            Ok(Some(raw)) => {
                let library = Library::parse(&raw);
                debug!(path = %self.path.display(), fragments = library.len(), "loaded library");
                library
            }
            Ok(None) => Library::new(),
            Err(e) => {
                warn!("treating library as empty: {}", e);
                Library::new()
            }
        }
    }

    fn write(&self, library: &Library) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
        fs::write(&self.path, library.serialize()).map_err(|e| AppError::io(&self.path, e))?;
        info!(path = %self.path.display(), fragments = library.len(), "wrote library");
        Ok(())
    }

    /// Join between 1 and `min(max_picks, len)` distinct fragments drawn from the whole library
    pub fn random_combination<R: Rng + ?Sized>(&self, rng: &mut R, max_picks: usize) -> Reply {
        let library = self.load();
        if library.is_empty() {
            return Reply::empty(Status::EmptyLibrary);
        }

        let upper = max_picks.max(1).min(library.len());
        let picked = rng.gen_range(1..=upper);
        let selected: Vec<&str> = library
            .fragments()
            .choose_multiple(rng, picked)
            .map(String::as_str)
            .collect();

        debug!(picked, total = library.len(), "drew random combination");
        Reply::new(
            selected.join(", "),
            Status::Combined {
                picked,
                total: library.len(),
            },
        )
    }

    /// Rewrite the file with its deduplicated serialization
    pub fn clean(&self) -> Reply {
        let raw = match self.read_raw() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Reply::empty(Status::EmptyLibrary),
            Err(e) => return Reply::empty(Status::IoFailure(e.to_string())),
        };

        let library = Library::parse(&raw);
        if library.is_empty() {
            return Reply::empty(Status::EmptyLibrary);
        }

        let raw_count = Library::count_raw(&raw);
        if let Err(e) = self.write(&library) {
            return Reply::empty(Status::IoFailure(e.to_string()));
        }

        Reply::new(
            library.serialize(),
            Status::Cleaned {
                raw: raw_count,
                unique: library.len(),
            },
        )
    }

    /// Split `prompt` like a library and append the fragments not yet present
    pub fn add(&self, prompt: &str) -> Reply {
        if prompt.trim().is_empty() {
            return Reply::new(prompt, Status::EmptyInput);
        }

        let mut library = self.load();
        let added = Library::parse(prompt)
            .fragments()
            .iter()
            .filter(|candidate| library.insert(candidate))
            .count();

        if added == 0 {
            return Reply::new(prompt, Status::NoNewContent);
        }

        if let Err(e) = self.write(&library) {
            return Reply::new(prompt, Status::IoFailure(e.to_string()));
        }

        Reply::new(
            prompt,
            Status::Added {
                added,
                total: library.len(),
            },
        )
    }
}
