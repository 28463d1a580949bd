use panela::color::{self, emoji};
use panela::config::{CliArgs, Config};
use panela::form::FormState;
use panela::log::Event;

use super::{logger, open_store};

/// List the saved roster.
pub fn cmd_players(config: &Config) -> Result<(), String> {
    let store = open_store(config)?;
    let players = FormState::load(&store).participants();

    if players.is_empty() {
        println!("No players yet. Use --players <FILE> to load a roster.");
        return Ok(());
    }

    println!("{} Players ({}):", emoji::TEAM, color::number(players.len()));
    for (i, name) in players.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, name);
    }
    if players.len() < config.min_participants {
        println!(
            "{}",
            color::warning(&format!("At least {} players are needed to draw.", config.min_participants))
        );
    }
    Ok(())
}

/// List restrictions with the numbers `unrestrict` expects.
pub fn cmd_restrictions(config: &Config) -> Result<(), String> {
    let store = open_store(config)?;
    let form = FormState::load(&store);

    if form.restrictions.is_empty() {
        println!("No restrictions.");
        return Ok(());
    }

    println!("{} Restrictions ({}):", emoji::LINK, color::number(form.restrictions.len()));
    for (i, pair) in form.restrictions.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, pair);
    }
    Ok(())
}

/// Add a restriction between two roster players.
pub fn cmd_restrict(config: &Config, cli: &CliArgs) -> Result<(), String> {
    let (first, second) = match cli.positional.as_slice() {
        [first, second] => (first.as_str(), second.as_str()),
        _ => return Err("usage: panela restrict <PLAYER> <PLAYER>".to_string()),
    };

    let mut store = open_store(config)?;
    let mut form = FormState::load(&store);
    let roster = form.participants();
    let added = form
        .restrictions
        .add(first, second, &roster)
        .map_err(|e| e.to_string())?
        .to_string();
    form.save(&mut store).map_err(|e| e.to_string())?;

    logger(config).record(Event::Restrict, &format!("added {}", added));
    println!("{} Added restriction: {}", emoji::CHECK, color::info(&added));
    Ok(())
}

/// Remove the restriction listed as number N.
pub fn cmd_unrestrict(config: &Config, cli: &CliArgs) -> Result<(), String> {
    let number: usize = match cli.positional.as_slice() {
        [n] => n
            .parse()
            .map_err(|_| format!("expected a restriction number, got '{}'", n))?,
        _ => return Err("usage: panela unrestrict <N>".to_string()),
    };
    if number == 0 {
        return Err("restriction numbers start at 1".to_string());
    }

    let mut store = open_store(config)?;
    let mut form = FormState::load(&store);
    let removed = form.restrictions.remove(number - 1).map_err(|e| e.to_string())?;
    form.save(&mut store).map_err(|e| e.to_string())?;

    logger(config).record(Event::Restrict, &format!("removed {}", removed));
    println!("{} Removed restriction: {}", emoji::CHECK, color::info(&removed.to_string()));
    Ok(())
}
