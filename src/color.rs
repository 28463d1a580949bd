//! Terminal color utilities using ANSI escape codes.
//!
//! Provides colored output for team headings, player names and status
//! messages. Coloring can be switched off globally (`--no-color`, `NO_COLOR`).

use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";

    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_BLUE: &str = "\x1b[94m";
    pub const BRIGHT_MAGENTA: &str = "\x1b[95m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

use codes::*;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn coloring on or off for the whole process.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

fn paint(styles: &[&str], text: &str) -> String {
    if !is_enabled() {
        return text.to_string();
    }
    format!("{}{}{}", styles.concat(), text, RESET)
}

/// Colors for team headings, picked by team position.
const TEAM_COLORS: &[&str] = &[
    CYAN,
    MAGENTA,
    YELLOW,
    BLUE,
    GREEN,
    BRIGHT_CYAN,
    BRIGHT_MAGENTA,
    BRIGHT_YELLOW,
    BRIGHT_BLUE,
    BRIGHT_GREEN,
];

/// Get a deterministic color for the team at `index`.
pub fn team_color(index: usize) -> &'static str {
    TEAM_COLORS[index % TEAM_COLORS.len()]
}

/// Color a team heading.
pub fn team(index: usize, text: &str) -> String {
    paint(&[BOLD, team_color(index)], text)
}

/// Color a timestamp (dim).
pub fn timestamp(ts: &str) -> String {
    paint(&[DIM], ts)
}

/// Color success messages (green).
pub fn success(text: &str) -> String {
    paint(&[GREEN], text)
}

/// Color warning messages (yellow).
pub fn warning(text: &str) -> String {
    paint(&[YELLOW], text)
}

/// Color info messages (cyan).
pub fn info(text: &str) -> String {
    paint(&[CYAN], text)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    paint(&[BOLD], text)
}

/// Color a number/count (bright cyan).
pub fn number(n: impl std::fmt::Display) -> String {
    paint(&[BRIGHT_CYAN], &n.to_string())
}

/// Emoji constants for consistent usage
pub mod emoji {
    pub const CHECK: &str = "✅";
    pub const WARNING: &str = "⚠️";
    pub const SPARKLES: &str = "✨";
    pub const BALL: &str = "⚽";
    pub const TEAM: &str = "👥";
    pub const CLOCK: &str = "🕐";
    pub const FOLDER: &str = "📁";
    pub const LINK: &str = "🔗";
    pub const BROOM: &str = "🧹";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_team_color_deterministic() {
        assert_eq!(team_color(0), team_color(0));
        assert_eq!(team_color(3), team_color(3 + TEAM_COLORS.len()));
    }

    #[test]
    fn test_team_color_varies() {
        assert_ne!(team_color(0), team_color(1));
    }

    #[test]
    fn test_team_heading_colored() {
        let _guard = LOCK.lock().unwrap();
        let text = team(1, "Team B");
        assert!(text.contains("Team B"));
        assert!(text.contains(BOLD));
        assert!(text.contains(team_color(1)));
        assert!(text.ends_with(RESET));
    }

    #[test]
    fn test_warning_yellow() {
        let _guard = LOCK.lock().unwrap();
        let text = warning("careful");
        assert!(text.contains(YELLOW));
        assert!(text.contains(RESET));
    }

    #[test]
    fn test_disabled_returns_plain_text() {
        let _guard = LOCK.lock().unwrap();
        set_enabled(false);
        let plain = (team(0, "Team A"), number(3), timestamp("12:00"));
        set_enabled(true);

        assert_eq!(plain.0, "Team A");
        assert_eq!(plain.1, "3");
        assert_eq!(plain.2, "12:00");
    }
}
