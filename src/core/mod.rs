//! Core business logic layer
//!
//! This module contains the fragment library, the history log, and the
//! operations hub that routes actions to them.

pub mod data;
pub mod history;
pub mod library;
pub mod operations;
pub mod traits;
