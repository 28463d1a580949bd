use std::path::{Path, PathBuf};

use thiserror::Error;

use super::cli::CliArgs;
use super::{env, toml};
use crate::export::DEFAULT_EXPORT_FILE;
use crate::history::DEFAULT_MAX_ENTRIES;
use crate::log::DEFAULT_MAX_LINES;
use crate::validate::DEFAULT_MIN_PARTICIPANTS;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "panela.toml";

/// Default state directory.
pub const DEFAULT_STATE_DIR: &str = ".panela";

/// Panela configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Smallest roster accepted for a draw.
    pub min_participants: usize,
    /// Fixed seed for reproducible draws.
    pub draw_seed: Option<u64>,
    /// Number of draws kept in history.
    pub history_max_entries: usize,
    /// Directory holding state.json and draw.log.
    pub files_state_dir: String,
    /// Default export path.
    pub files_export: String,
    /// Draw log lines before rotation.
    pub log_max_lines: usize,
    /// Colored terminal output.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_participants: DEFAULT_MIN_PARTICIPANTS,
            draw_seed: None,
            history_max_entries: DEFAULT_MAX_ENTRIES,
            files_state_dir: DEFAULT_STATE_DIR.to_string(),
            files_export: DEFAULT_EXPORT_FILE.to_string(),
            log_max_lines: DEFAULT_MAX_LINES,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// Precedence: CLI args > env vars > config file > defaults.
    ///
    /// An explicit `--config` path must exist and parse. The implicit
    /// `panela.toml` is skipped with a warning when it does not parse.
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ref path) = cli_args.config {
            config = Self::load_from_file(path)?;
        } else if Path::new(CONFIG_FILE).exists() {
            match Self::load_from_file(CONFIG_FILE) {
                Ok(file_config) => config = file_config,
                Err(e) => eprintln!("warning: ignoring {}: {}", CONFIG_FILE, e),
            }
        }

        config.apply_env();
        config.apply_cli(cli_args);

        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        toml::load_from_file(path)
    }

    /// Parse TOML content into configuration.
    pub(super) fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::parse_toml(content)
    }

    fn apply_env(&mut self) {
        env::apply_env(self);
    }

    /// Apply CLI arguments.
    pub(super) fn apply_cli(&mut self, args: &CliArgs) {
        if let Some(n) = args.min_players {
            self.min_participants = n;
        }
        if let Some(n) = args.max_history {
            self.history_max_entries = n;
        }
        if let Some(seed) = args.seed {
            self.draw_seed = Some(seed);
        }
        if let Some(ref dir) = args.state_dir {
            self.files_state_dir = dir.clone();
        }
        if args.no_color {
            self.color = false;
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        PathBuf::from(&self.files_state_dir)
    }

    /// Generate default panela.toml content.
    pub fn default_toml() -> String {
        format!(
            r#"# Panela configuration

[draw]
min_participants = {}
# seed = 42

[history]
max_entries = {}

[files]
state_dir = "{}"
export = "{}"

[log]
max_lines = {}

[output]
color = true
"#,
            DEFAULT_MIN_PARTICIPANTS, DEFAULT_MAX_ENTRIES, DEFAULT_STATE_DIR, DEFAULT_EXPORT_FILE, DEFAULT_MAX_LINES
        )
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading config file.
    #[error("config I/O error: {0}")]
    Io(String),
    /// Parse error in config file.
    #[error("config parse error: {0}")]
    Parse(String),
}
