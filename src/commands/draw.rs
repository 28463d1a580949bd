use std::fs;

use panela::color::{self, emoji};
use panela::config::{CliArgs, Config};
use panela::draw::{self, Sizing};
use panela::form::FormState;
use panela::history::{DrawSettings, History, HistoryEntry};
use panela::log::Event;

use super::{logger, open_store};
use crate::output;

/// Draw teams from the saved form, applying any CLI overrides first.
pub fn cmd_draw(config: &Config, cli: &CliArgs) -> Result<(), String> {
    let mut store = open_store(config)?;
    let mut form = FormState::load(&store);

    if let Some(ref path) = cli.players_file {
        form.participants_text =
            fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path, e))?;
    }
    if cli.teams.is_some() || cli.size.is_some() {
        match Sizing::from_options(cli.teams, cli.size).map_err(|e| e.to_string())? {
            Sizing::TeamCount(count) => form.use_team_count(count.get()),
            Sizing::TeamSize(size) => form.use_players_per_team(size.get()),
        }
    }
    form.save(&mut store).map_err(|e| e.to_string())?;

    let roster = form.participants();
    for pair in form.restrictions.iter() {
        for name in [&pair.first, &pair.second] {
            if !roster.contains(name) {
                eprintln!("warning: restriction {} names {}, who is not in the roster", pair, name);
            }
        }
    }

    let request = form
        .to_request(config.min_participants, config.draw_seed)
        .map_err(|e| e.to_string())?;
    let teams = draw::draw(&request).map_err(|e| e.to_string())?;

    output::print_teams(&teams);

    let log = logger(config);
    let violations = draw::violations(&teams, &request.restrictions);
    output::print_violations(&violations);
    for pair in &violations {
        log.record(Event::Forced, &format!("placed together: {}", pair));
    }

    let sizes: Vec<String> = teams.iter().map(|t| t.len().to_string()).collect();
    log.record(
        Event::Draw,
        &format!(
            "{} players into {} teams [{}] ({}, {} restrictions{})",
            roster.len(),
            teams.len(),
            sizes.join(","),
            form.split_type.as_str(),
            request.restrictions.len(),
            request.seed.map(|s| format!(", seed {}", s)).unwrap_or_default()
        ),
    );

    if cli.no_save {
        println!("{} Draw not saved (--no-save).", emoji::SPARKLES);
        return Ok(());
    }

    let mut history = History::load(&store);
    let entry = HistoryEntry::new(teams, DrawSettings::from_form(&form));
    let id = entry.id.clone();
    history.record(entry, config.history_max_entries);
    history.save(&mut store).map_err(|e| e.to_string())?;
    log.record(Event::History, &format!("recorded {} ({} kept)", id, history.len()));

    println!("{} {}", emoji::CHECK, color::success("Teams drawn and added to history."));
    Ok(())
}
