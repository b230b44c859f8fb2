use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use crate::config::Config;
use crate::core::data::Action;
use crate::core::operations::PromptOperations;
use crate::manager::{config, library, prompt};
use crate::utils::error::AppResult;

#[derive(Parser)]
#[command(name = "promptvault")]
#[command(about = "Keep a prompt history log and a reusable fragment library")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub fn execute(self, config: Config, config_path: &Path, ops: &mut PromptOperations) -> AppResult<()> {
        match self {
            Commands::Save(args) => prompt::handle_save_command(ops, &args),
            Commands::Load(args) => prompt::handle_load_command(ops, &args),
            Commands::History(args) => prompt::handle_history_command(ops, &args),
            Commands::Random(args) => library::handle_random_command(ops, &args),
            Commands::Clean(args) => library::handle_clean_command(ops, &args),
            Commands::Add(args) => library::handle_add_command(ops, &args),
            Commands::Library(args) => library::handle_library_command(ops, &args),
            Commands::Config(args) => config::handle_config_command(config, config_path, args.command),
        }
    }

    /// The operation this command maps to, if any
    pub fn action(&self) -> Option<Action> {
        match self {
            Commands::Save(_) => Some(Action::Save),
            Commands::Load(_) => Some(Action::Load),
            Commands::History(args) if args.format.is_none() => Some(Action::LoadHistory),
            Commands::Random(_) => Some(Action::RandomCombination),
            Commands::Clean(_) => Some(Action::CleanLibrary),
            Commands::Add(_) => Some(Action::AddToLibrary),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a prompt to the history log
    Save(PromptArgs),

    /// Print the most recent prompt from the history log
    Load(FileArgs),

    /// Show the whole history log
    History(HistoryArgs),

    /// Combine 1-3 random fragments from the library
    Random(RandomArgs),

    /// Deduplicate the library file in place
    Clean(FileArgs),

    /// Add the fragments of a prompt to the library
    Add(PromptArgs),

    /// List library fragments
    Library(FileArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct FileArgs {
    #[arg(short, long, value_name = "PATH", help = "File to use instead of the configured one")]
    pub file: Option<String>,
}

#[derive(Args)]
pub struct PromptArgs {
    #[arg(help = "Prompt text (read from stdin or asked for when omitted)")]
    pub prompt: Option<String>,

    #[arg(short, long, value_name = "PATH", help = "File to use instead of the configured one")]
    pub file: Option<String>,
}

#[derive(Args)]
pub struct HistoryArgs {
    #[arg(short, long, value_name = "PATH", help = "File to use instead of the configured one")]
    pub file: Option<String>,

    #[arg(long, help = "List parsed entries instead of the raw log")]
    pub format: Option<ListFormat>,
}

#[derive(Args)]
pub struct RandomArgs {
    #[arg(short, long, value_name = "PATH", help = "File to use instead of the configured one")]
    pub file: Option<String>,

    #[arg(long, help = "Seed for a repeatable draw")]
    pub seed: Option<u64>,
}

#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ListFormat {
    Simple,
    Detailed,
    Json,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_save_with_file() {
        let cli = Cli::try_parse_from(["promptvault", "save", "a cat, a hat", "--file", "/tmp/h.txt"]).unwrap();
        match cli.command {
            Commands::Save(args) => {
                assert_eq!(args.prompt.as_deref(), Some("a cat, a hat"));
                assert_eq!(args.file.as_deref(), Some("/tmp/h.txt"));
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["promptvault", "random", "--seed", "7", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(!cli.no_color);
        match cli.command {
            Commands::Random(args) => {
                assert_eq!(args.seed, Some(7));
                assert!(args.file.is_none());
            }
            _ => panic!("expected random"),
        }
    }

    #[test]
    fn test_history_format() {
        let cli = Cli::try_parse_from(["promptvault", "history", "--format", "json"]).unwrap();
        assert_eq!(cli.command.action(), None);

        let cli = Cli::try_parse_from(["promptvault", "history"]).unwrap();
        assert_eq!(cli.command.action(), Some(Action::LoadHistory));
    }

    #[test]
    fn test_command_actions() {
        let cases = [
            ("save", Some(Action::Save)),
            ("load", Some(Action::Load)),
            ("clean", Some(Action::CleanLibrary)),
            ("add", Some(Action::AddToLibrary)),
            ("library", None),
        ];
        for (name, expected) in cases {
            let cli = Cli::try_parse_from(["promptvault", name]).unwrap();
            assert_eq!(cli.command.action(), expected, "{}", name);
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["promptvault", "history", "--format", "xml"]).is_err());
    }
}
