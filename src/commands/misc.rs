use std::fs;
use std::path::Path;

use panela::color::{self, emoji};
use panela::config::{Config, CONFIG_FILE};
use panela::form::FormState;
use panela::log::Event;

use super::{logger, open_store};

/// Write a default panela.toml and create the state directory.
pub fn cmd_init(config: &Config) -> Result<(), String> {
    println!("Initializing panela...");

    if Path::new(CONFIG_FILE).exists() {
        println!("  Config already exists: {}", CONFIG_FILE);
    } else {
        fs::write(CONFIG_FILE, Config::default_toml())
            .map_err(|e| format!("failed to create {}: {}", CONFIG_FILE, e))?;
        println!("  Created {}", CONFIG_FILE);
    }

    if config.files_state_dir.is_empty() {
        return Err("state dir path is empty".to_string());
    }
    fs::create_dir_all(&config.files_state_dir)
        .map_err(|e| format!("failed to create state dir {}: {}", config.files_state_dir, e))?;
    println!("  Created state directory: {}", config.files_state_dir);

    println!("\nPanela initialized.");
    println!("  Use 'panela --players <FILE>' to load a roster and draw.");
    Ok(())
}

/// Restore the draw inputs to their defaults. History is kept.
pub fn cmd_reset(config: &Config) -> Result<(), String> {
    let mut store = open_store(config)?;
    let mut form = FormState::load(&store);
    form.reset();
    form.save(&mut store).map_err(|e| e.to_string())?;

    logger(config).record(Event::Reset, "draw inputs restored to defaults");
    println!("{} {}", emoji::CHECK, color::success("Roster, sizing and restrictions reset."));
    Ok(())
}
