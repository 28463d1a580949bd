//! Plain-text export of a draw.

use std::fs;
use std::path::Path;

use crate::draw::Team;

/// First line of every export.
pub const EXPORT_HEADER: &str = "Generated Teams - Panela";

/// Default export file name.
pub const DEFAULT_EXPORT_FILE: &str = "panela_teams.txt";

/// Label for the team at `index`: A..Z, then AA, AB, ...
///
/// # Examples
/// ```
/// use panela::export::team_label;
/// assert_eq!(team_label(0), "A");
/// assert_eq!(team_label(25), "Z");
/// assert_eq!(team_label(26), "AA");
/// ```
pub fn team_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// Render teams as text: one block per team, one numbered line per player.
pub fn render_text(teams: &[Team]) -> String {
    let mut out = format!("{}\n\n", EXPORT_HEADER);
    for (index, team) in teams.iter().enumerate() {
        out.push_str(&format!("Team {}:\n", team_label(index)));
        for (pos, player) in team.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", pos + 1, player));
        }
        out.push('\n');
    }
    out
}

/// Write the rendered teams to `path`, creating parent directories.
pub fn write_text<P: AsRef<Path>>(path: P, teams: &[Team]) -> Result<(), String> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {}", parent.display(), e))?;
        }
    }
    fs::write(path, render_text(teams)).map_err(|e| format!("failed to write {}: {}", path.display(), e))
}
