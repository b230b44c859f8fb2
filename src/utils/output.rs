use crate::cli::ListFormat;
use crate::core::data::{HistoryEntry, Library, Reply, Status};
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::truncate_string;
use colored::*;

pub struct OutputStyle;

impl OutputStyle {
    pub fn content(text: &str) -> ColoredString {
        text.clear()
    }

    pub fn fragment(text: &str) -> ColoredString {
        text.bright_cyan()
    }

    pub fn timestamp(text: &str) -> ColoredString {
        text.bright_yellow()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn separator() -> String {
        "─".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", "═".repeat(50));
    }

    /// Status line on stderr, colored by outcome
    pub fn print_status(status: &Status) {
        let text = status.to_string();
        if text.is_empty() {
            return;
        }
        match status {
            Status::Cancelled => eprintln!("⏹️  {}", Self::muted(&text)),
            Status::Duplicate | Status::NoNewContent | Status::EmptyHistory => {
                eprintln!("⚠️  {}", Self::warning(&text))
            }
            s if s.is_failure() => eprintln!("❌ {}", Self::error(&text)),
            _ => eprintln!("✅ {}", Self::success(&text)),
        }
    }
}

/// Print the data half of a reply to stdout and the status to stderr
pub fn print_reply(reply: &Reply) {
    if !reply.prompt.is_empty() {
        println!("{}", reply.prompt);
    }
    OutputStyle::print_status(&reply.status);
}

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn format_entries(entries: &[HistoryEntry], format: &ListFormat) -> AppResult<()> {
        if entries.is_empty() {
            println!("{}", OutputStyle::muted("No history entries found"));
            return Ok(());
        }

        match format {
            ListFormat::Simple => {
                for entry in entries {
                    println!(
                        "{}  {}",
                        OutputStyle::timestamp(&entry.timestamp),
                        OutputStyle::content(&truncate_string(&entry.body, 80))
                    );
                }
            }
            ListFormat::Detailed => {
                OutputStyle::print_header(&format!("📜 History ({} entries)", entries.len()));
                for entry in entries {
                    println!("{}", OutputStyle::timestamp(&entry.timestamp));
                    println!("{}", OutputStyle::content(&entry.body));
                    println!("{}", OutputStyle::muted(&OutputStyle::separator()));
                }
            }
            ListFormat::Json => {
                let json = serde_json::to_string_pretty(entries)
                    .map_err(|e| AppError::System(format!("Failed to serialize history: {}", e)))?;
                println!("{}", json);
            }
        }

        Ok(())
    }

    pub fn print_library(library: &Library) {
        if library.is_empty() {
            println!("{}", OutputStyle::muted("Library is empty"));
            return;
        }

        OutputStyle::print_header(&format!("📚 Library ({} fragments)", library.len()));
        for (i, fragment) in library.fragments().iter().enumerate() {
            println!("{:>4}. {}", i + 1, OutputStyle::fragment(fragment));
        }
    }
}
