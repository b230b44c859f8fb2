use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use promptvault::cli::Cli;
use promptvault::config::Config;
use promptvault::utils::report_error;
use promptvault::{PromptOperations, resolver};

fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_file_path);
    let config = Config::load_custom(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if cli.no_color || !config.general.color {
        colored::control::set_override(false);
    }

    let mut ops = PromptOperations::new(config.clone(), resolver::detect());
    debug!(action = ?cli.command.action(), config = %config_path.display(), "dispatching");

    if let Err(e) = cli.command.execute(config, &config_path, &mut ops) {
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
