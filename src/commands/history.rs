use panela::color::{self, emoji};
use panela::config::{CliArgs, Config};
use panela::export;
use panela::history::History;
use panela::log::Event;

use super::{logger, open_store};
use crate::output::{self, DEFAULT_LOG_TAIL};

/// Show past draws, newest first.
pub fn cmd_history(config: &Config) -> Result<(), String> {
    let store = open_store(config)?;
    output::print_history(History::load(&store).entries());
    Ok(())
}

/// Delete all recorded draws.
pub fn cmd_clear_history(config: &Config) -> Result<(), String> {
    let mut store = open_store(config)?;
    let mut history = History::load(&store);
    let removed = history.len();
    history.clear();
    history.save(&mut store).map_err(|e| e.to_string())?;

    logger(config).record(Event::History, &format!("cleared {} entries", removed));
    println!("{} History cleared ({} removed).", emoji::BROOM, color::number(removed));
    Ok(())
}

/// Write the latest draw as text to PATH or the configured export file.
pub fn cmd_export(config: &Config, cli: &CliArgs) -> Result<(), String> {
    let path = match cli.positional.as_slice() {
        [] => config.files_export.clone(),
        [path] => path.clone(),
        _ => return Err("usage: panela export [PATH]".to_string()),
    };

    let store = open_store(config)?;
    let history = History::load(&store);
    let latest = history
        .latest()
        .ok_or_else(|| "nothing to export: no teams have been drawn yet".to_string())?;

    export::write_text(&path, &latest.teams)?;

    logger(config).record(Event::Export, &format!("{} teams to {}", latest.teams.len(), path));
    println!("{} Exported {} teams to {}", emoji::FOLDER, color::number(latest.teams.len()), color::info(&path));
    Ok(())
}

/// Show the last N lines of the draw log.
pub fn cmd_log(config: &Config, cli: &CliArgs) -> Result<(), String> {
    let count = match cli.positional.as_slice() {
        [] => DEFAULT_LOG_TAIL,
        [n] => n
            .parse()
            .map_err(|_| format!("expected a line count, got '{}'", n))?,
        _ => return Err("usage: panela log [N]".to_string()),
    };

    let log = logger(config);
    let total = log
        .line_count()
        .map_err(|e| format!("failed to read {}: {}", log.path.display(), e))?;
    if total == 0 {
        println!("No log entries yet.");
        return Ok(());
    }

    let lines = log
        .read_recent(count)
        .map_err(|e| format!("failed to read {}: {}", log.path.display(), e))?;
    println!(
        "{} (last {} of {} lines)",
        color::label(&log.path.display().to_string()),
        color::number(lines.len()),
        color::number(total)
    );
    for line in &lines {
        println!("{}", output::render_log_line(line));
    }
    Ok(())
}
