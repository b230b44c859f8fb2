// Configuration operations

use crate::cli::ConfigCommands;
use crate::config::Config;
use crate::utils;
use crate::utils::error::AppResult;
use crate::utils::output::OutputStyle;
use std::path::Path;

pub fn handle_config_command(
    mut config: Config,
    config_path: &Path,
    command: Option<ConfigCommands>,
) -> AppResult<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Path) => {
            println!("{}", config_path.display());
            Ok(())
        }
        Some(ConfigCommands::Reset) => handle_reset_command(&mut config, config_path),
        None => handle_config_help(config_path),
    }
}

fn handle_show_command(config: &Config) -> AppResult<()> {
    OutputStyle::print_header("⚙️  Promptvault Configuration");

    println!("General:");
    println!("  History file: {}", config.general.history_file.display());
    println!("  Library file: {}", config.general.library_file.display());
    println!("  Max picks: {}", config.general.max_picks);
    println!("  Color: {}", config.general.color);
    println!("  Pager: {}", config.general.pager);

    Ok(())
}

fn handle_config_help(config_path: &Path) -> AppResult<()> {
    OutputStyle::print_header("⚙️  Configuration Management");
    println!("Available configuration commands:");
    println!("  promptvault config show    - Show current configuration");
    println!("  promptvault config path    - Print the configuration file location");
    println!("  promptvault config reset   - Reset configuration to defaults");
    println!();
    println!(
        "Configuration file location: {}",
        config_path.display()
    );
    Ok(())
}

fn handle_reset_command(config: &mut Config, config_path: &Path) -> AppResult<()> {
    if utils::interactive::prompt_yes_no(
        "Are you sure you want to reset configuration to defaults? This will overwrite your current settings.",
    )? {
        *config = Config::default();
        config.save_to(config_path)?;
        println!("✓ Configuration reset to defaults!");
    } else {
        println!("Reset cancelled.");
    }
    Ok(())
}
