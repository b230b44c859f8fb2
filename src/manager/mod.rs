// Command handlers for the CLI front end
pub mod config;    // Configuration management
pub mod library;   // Fragment library commands
pub mod prompt;    // History log commands
