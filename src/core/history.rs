//! Append-only prompt history made of `=== <timestamp> ===` blocks

use crate::core::data::{HistoryEntry, Reply, Status};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::{history_header, now_timestamp, parse_timestamp};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DELIMITER: &str = "===";

pub struct HistoryLog {
    path: PathBuf,
}

/// Timestamp carried by a `=== <timestamp> ===` line, `None` for ordinary lines
fn header_timestamp(line: &str) -> Option<&str> {
    let inner = line
        .trim()
        .strip_prefix(DELIMITER)?
        .strip_suffix(DELIMITER)?
        .strip_prefix(' ')?
        .strip_suffix(' ')?;
    parse_timestamp(inner).map(|_| inner.trim())
}

/// Trim a prompt and fold its line endings the way the parser reads them back
fn normalize_body(text: &str) -> String {
    text.trim().lines().collect::<Vec<_>>().join("\n")
}

/// Split log text into entries. Text ahead of the first delimiter and
/// blocks without a body are skipped.
pub fn parse_entries(content: &str) -> Vec<HistoryEntry> {
    let mut entries = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in content.lines() {
        if let Some(timestamp) = header_timestamp(line) {
            if let Some((ts, lines)) = current.take() {
                push_entry(&mut entries, ts, &lines);
            }
            current = Some((timestamp, Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some((ts, lines)) = current {
        push_entry(&mut entries, ts, &lines);
    }

    entries
}

fn push_entry(entries: &mut Vec<HistoryEntry>, timestamp: &str, lines: &[&str]) {
    let body = lines.join("\n").trim().to_string();
    if !body.is_empty() {
        entries.push(HistoryEntry {
            timestamp: timestamp.to_string(),
            body,
        });
    }
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::io(&self.path, e)),
        }
    }

    /// All structured entries in file order
    pub fn entries(&self) -> AppResult<Vec<HistoryEntry>> {
        Ok(self
            .read()?
            .map(|content| parse_entries(&content))
            .unwrap_or_default())
    }

    /// Distinct bodies already stored, used for duplicate checks
    pub fn extract_bodies(&self) -> AppResult<HashSet<String>> {
        let bodies: HashSet<String> = self.entries()?.into_iter().map(|e| e.body).collect();
        debug!(path = %self.path.display(), bodies = bodies.len(), "extracted history bodies");
        Ok(bodies)
    }

    /// Append a new timestamped block unless the same body is already logged
    pub fn append(&self, prompt: &str) -> Reply {
        let body = normalize_body(prompt);
        if body.is_empty() {
            return Reply::new(prompt, Status::EmptyInput);
        }

        let existing = self.extract_bodies().unwrap_or_else(|e| {
            warn!("skipping duplicate check: {}", e);
            HashSet::new()
        });
        if existing.contains(&body) {
            debug!(path = %self.path.display(), "prompt already logged");
            return Reply::new(prompt, Status::Duplicate);
        }

        match self.write_block(&now_timestamp(), &body) {
            Ok(()) => Reply::new(
                prompt,
                Status::Saved {
                    path: self.path.clone(),
                },
            ),
            Err(e) => Reply::new(prompt, Status::IoFailure(e.to_string())),
        }
    }

    fn write_block(&self, timestamp: &str, body: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let block = format!("{}\n{}\n\n", history_header(timestamp), body);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| AppError::io(&self.path, e))?;
        // one write per block so concurrent appenders never split an entry
        file.write_all(block.as_bytes())
            .map_err(|e| AppError::io(&self.path, e))?;

        info!(path = %self.path.display(), timestamp, "appended history entry");
        Ok(())
    }

    /// Body of the most recent entry; a log without delimiters is returned whole
    pub fn read_last(&self) -> Reply {
        let content = match self.read() {
            Ok(Some(content)) => content,
            Ok(None) => {
                return Reply::empty(Status::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Reply::empty(Status::IoFailure(e.to_string())),
        };

        let body = match parse_entries(&content).pop() {
            Some(entry) => entry.body,
            None => content.trim().to_string(),
        };

        if body.is_empty() {
            return Reply::empty(Status::EmptyHistory);
        }

        Reply::new(
            body,
            Status::Loaded {
                path: self.path.clone(),
            },
        )
    }

    /// The whole log file, unparsed
    pub fn read_all(&self) -> Reply {
        match self.read() {
            Ok(Some(content)) => Reply::new(
                content,
                Status::HistoryLoaded {
                    path: self.path.clone(),
                },
            ),
            Ok(None) => Reply::empty(Status::NotFound {
                path: self.path.clone(),
            }),
            Err(e) => Reply::empty(Status::IoFailure(e.to_string())),
        }
    }
}
