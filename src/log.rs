//! Draw log with rotation.
//!
//! Every state-changing action (draws, forced placements, restriction edits,
//! history and export operations) is appended to `<state_dir>/draw.log`. The
//! file is rotated to a timestamped backup once it exceeds a line limit.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

/// Default maximum number of lines before rotation.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Log file name inside the state directory.
pub const LOG_FILE: &str = "draw.log";

/// Kinds of logged events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Draw,
    Forced,
    Restrict,
    History,
    Export,
    Reset,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Forced => "forced",
            Self::Restrict => "restrict",
            Self::History => "history",
            Self::Export => "export",
            Self::Reset => "reset",
        }
    }
}

/// Appends timestamped event lines to the draw log.
pub struct DrawLogger {
    /// Path to the log file.
    pub path: PathBuf,
    /// Maximum lines before rotation.
    pub max_lines: usize,
}

impl DrawLogger {
    /// Create a logger writing to `draw.log` inside `state_dir`.
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(LOG_FILE),
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    /// Create a logger with a custom max lines setting.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Write a log entry.
    ///
    /// Format: `YYYY-MM-DD HH:MM:SS | <event> | <message>`
    pub fn log(&self, event: Event, message: &str) -> io::Result<()> {
        self.ensure_dir()?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("{} | {} | {}\n", timestamp, event.as_str(), message);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        self.rotate_if_needed()
    }

    /// Log an event, reporting failures as warnings instead of errors.
    pub fn record(&self, event: Event, message: &str) {
        if let Err(e) = self.log(event, message) {
            eprintln!("warning: failed to write {}: {}", self.path.display(), e);
        }
    }

    fn ensure_dir(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    fn rotate_if_needed(&self) -> io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        if count_lines(&self.path)? <= self.max_lines {
            return Ok(());
        }

        rotate_log(&self.path)
    }

    /// Get the current line count of the log file.
    pub fn line_count(&self) -> io::Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        count_lines(&self.path)
    }

    /// Read the last N lines from the log file.
    pub fn read_recent(&self, n: usize) -> io::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let lines: Vec<String> = BufReader::new(file).lines().collect::<Result<_, _>>()?;
        let start = lines.len().saturating_sub(n);
        Ok(lines[start..].to_vec())
    }
}

/// Count lines in a file.
pub fn count_lines(path: &Path) -> io::Result<usize> {
    let file = File::open(path)?;
    Ok(BufReader::new(file).lines().count())
}

/// Move a log file to a timestamped `.bak` backup and start a fresh one.
pub fn rotate_log(path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = format!(
        "{}.{}.bak",
        path.file_name().and_then(|n| n.to_str()).unwrap_or(LOG_FILE),
        timestamp
    );
    fs::rename(path, path.with_file_name(backup_name))?;
    File::create(path)?;

    Ok(())
}
