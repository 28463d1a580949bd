use panela::color::{self, emoji};
use panela::config::{self, DEFAULT_STATE_DIR};
use panela::draw::Team;
use panela::export::{team_label, DEFAULT_EXPORT_FILE};
use panela::history::{HistoryEntry, DEFAULT_MAX_ENTRIES};
use panela::roster::Restriction;
use panela::validate::DEFAULT_MIN_PARTICIPANTS;

pub(crate) fn print_help() {
    println!(
        r#"panela - team draw that keeps restricted players apart

USAGE:
    panela [OPTIONS] [COMMAND]

COMMANDS:
    draw                  Draw teams from the saved roster (default)
    init                  Write {config_file} and create the state directory
    players               List the saved roster
    restrictions          List restrictions
    restrict <A> <B>      Keep players A and B on different teams
    unrestrict <N>        Remove restriction number N
    history               Show past draws, newest first
    clear-history         Delete all past draws
    export [PATH]         Write the latest draw to a text file [default: {export}]
    reset                 Restore the draw inputs to their defaults
    log [N]               Show the last N lines of the draw log [default: {log_lines}]

OPTIONS:
    -h, --help                Show this help message
    -V, --version             Show version
    -c, --config <PATH>       Path to config file [default: {config_file}]
    --players <FILE>          Replace the roster with the names in FILE (one per line)
    --teams <N>               Draw N teams
    --size <N>                Draw teams of N players
    --seed <N>                Seed the draw so it can be reproduced
    --state-dir <PATH>        Where state and logs live [default: {state_dir}]
    --min-players <N>         Smallest roster accepted [default: {min}]
    --max-history <N>         Draws kept in history [default: {history}]
    --no-save                 Do not record this draw in history
    --no-color                Plain output

EXAMPLES:
    panela --players squad.txt --teams 3     Draw three teams from squad.txt
    panela restrict Ana Bruno                Never put Ana and Bruno together
    panela --size 5 --seed 7                 Reproducible draw of 5-player teams
    panela export teams.txt                  Save the latest draw"#,
        config_file = config::CONFIG_FILE,
        export = DEFAULT_EXPORT_FILE,
        state_dir = DEFAULT_STATE_DIR,
        min = DEFAULT_MIN_PARTICIPANTS,
        history = DEFAULT_MAX_ENTRIES,
        log_lines = DEFAULT_LOG_TAIL,
    );
}

/// Render teams as colored blocks, one numbered line per player.
pub(crate) fn render_teams(teams: &[Team]) -> String {
    let mut out = String::new();
    for (index, team) in teams.iter().enumerate() {
        let heading = format!("Team {} ({})", team_label(index), team.len());
        out.push_str(&format!("  {}\n", color::team(index, &heading)));
        if team.is_empty() {
            out.push_str(&format!("    {}\n", color::timestamp("(empty)")));
        }
        for (pos, player) in team.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", pos + 1, player));
        }
    }
    out
}

pub(crate) fn print_teams(teams: &[Team]) {
    println!();
    println!("=== {} {} ===", emoji::BALL, color::label("TEAMS"));
    println!();
    print!("{}", render_teams(teams));
    println!();
}

/// Warn about restricted pairs that ended up together.
pub(crate) fn print_violations(violations: &[Restriction]) {
    if violations.is_empty() {
        return;
    }
    eprintln!(
        "{} {}",
        emoji::WARNING,
        color::warning("Some restrictions could not be honored:")
    );
    for pair in violations {
        eprintln!("   {}", pair);
    }
}

/// Lines shown by `panela log` when no count is given.
pub(crate) const DEFAULT_LOG_TAIL: usize = 20;

/// Colorize a draw log line: `timestamp | event | message`.
/// Lines in any other shape are returned as-is.
pub(crate) fn render_log_line(line: &str) -> String {
    let parts: Vec<&str> = line.splitn(3, " | ").collect();
    let [ts, event, message] = parts.as_slice() else {
        return line.to_string();
    };
    let event = match *event {
        "forced" => color::warning(event),
        "draw" => color::success(event),
        _ => color::info(event),
    };
    format!("{} | {} | {}", color::timestamp(ts), event, message)
}

/// Render one history entry: when, what, restrictions, teams.
pub(crate) fn render_history_entry(number: usize, entry: &HistoryEntry) -> String {
    let mut out = format!(
        "{}. {} {}\n",
        number,
        color::timestamp(&entry.display_time()),
        color::label(&entry.summary())
    );
    if !entry.settings.restrictions.is_empty() {
        let pairs: Vec<String> = entry.settings.restrictions.iter().map(|r| r.to_string()).collect();
        out.push_str(&format!("   Restrictions: {}\n", pairs.join(", ")));
    }
    out.push_str(&render_teams(&entry.teams));
    out
}

pub(crate) fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No draws yet.");
        return;
    }
    println!("=== {} {} ({}) ===", emoji::CLOCK, color::label("HISTORY"), color::number(entries.len()));
    for (i, entry) in entries.iter().enumerate() {
        println!();
        print!("{}", render_history_entry(i + 1, entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panela::form::SplitType;
    use panela::history::DrawSettings;

    fn team(names: &[&str]) -> Team {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_teams_lists_players_in_order() {
        let out = render_teams(&[team(&["Ana", "Bruno"]), team(&["Carla"])]);
        assert!(out.contains("Team A (2)"));
        assert!(out.contains("Team B (1)"));
        let ana = out.find("1. Ana").unwrap();
        let bruno = out.find("2. Bruno").unwrap();
        let carla = out.find("1. Carla").unwrap();
        assert!(ana < bruno && bruno < carla);
    }

    #[test]
    fn test_render_teams_marks_empty_team() {
        let out = render_teams(&[team(&["Ana"]), team(&[])]);
        assert!(out.contains("Team B (0)"));
        assert!(out.contains("(empty)"));
    }

    #[test]
    fn test_render_log_line_keeps_fields() {
        let line = "2026-03-14 18:30:00 | forced | placed together: Ana x Bruno";
        let out = render_log_line(line);
        assert!(out.contains("2026-03-14 18:30:00"));
        assert!(out.contains("forced"));
        assert!(out.ends_with(" | placed together: Ana x Bruno"));
    }

    #[test]
    fn test_render_log_line_other_shape_unchanged() {
        assert_eq!(render_log_line("not a log line"), "not a log line");
    }

    #[test]
    fn test_render_history_entry() {
        let entry = HistoryEntry {
            id: "x".to_string(),
            timestamp: 0,
            teams: vec![team(&["Ana"]), team(&["Bruno"])],
            settings: DrawSettings {
                participants: vec!["Ana".into(), "Bruno".into()],
                split_type: SplitType::ByTeamCount,
                team_count: Some(2),
                players_per_team: None,
                restrictions: vec![Restriction::new("Ana", "Bruno")],
            },
        };
        let out = render_history_entry(3, &entry);
        assert!(out.starts_with("3. "));
        assert!(out.contains("2 teams drawn (2 players)"));
        assert!(out.contains("Restrictions: Ana x Bruno"));
        assert!(out.contains("1. Bruno"));
    }
}
