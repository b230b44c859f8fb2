//! Core trait definitions
//!
//! The prompt manager never decides on its own how a file path is chosen;
//! whoever drives it supplies a resolver.

use crate::core::data::ResolveMode;
use crate::utils::error::AppResult;
use std::path::PathBuf;

/// Chooses the file an operation should work on
///
/// Only asked when the proposed path cannot be used as-is. Returning
/// `Ok(None)` means the user declined, which the operations treat as a
/// cancellation rather than an error.
pub trait PathResolver {
    fn resolve(&self, proposed: &str, mode: ResolveMode) -> AppResult<Option<PathBuf>>;
}

/// Resolver that always declines, for hosts with no way to ask
pub struct NoPrompt;

impl PathResolver for NoPrompt {
    fn resolve(&self, _proposed: &str, _mode: ResolveMode) -> AppResult<Option<PathBuf>> {
        Ok(None)
    }
}
