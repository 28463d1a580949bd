use std::fs;
use std::path::Path;

use super::types::{Config, ConfigError};

pub(super) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
    Config::parse_toml(&content)
}

pub(super) fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let mut current_section = String::new();

    for line in content.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        // Section headers like [draw]
        if line.starts_with('[') && line.ends_with(']') {
            current_section = line[1..line.len() - 1].trim().to_string();
            continue;
        }

        let Some((key, value)) = parse_toml_line(line) else {
            return Err(ConfigError::Parse(format!("expected key = value: {}", line)));
        };

        let full_key = if current_section.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", current_section, key)
        };

        match full_key.as_str() {
            "draw.min_participants" => config.min_participants = parse_number(&full_key, value)?,
            "draw.seed" => config.draw_seed = Some(parse_number(&full_key, value)?),
            "history.max_entries" => config.history_max_entries = parse_number(&full_key, value)?,
            "files.state_dir" => config.files_state_dir = unquote(value).to_string(),
            "files.export" => config.files_export = unquote(value).to_string(),
            "log.max_lines" => config.log_max_lines = parse_number(&full_key, value)?,
            "output.color" => {
                config.color = match unquote(value).to_lowercase().as_str() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(ConfigError::Parse(format!("invalid {}: {}", full_key, value))),
                }
            }
            _ => {} // Ignore unknown keys
        }
    }

    Ok(config)
}

/// Parse a TOML line into key-value pair.
fn parse_toml_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), value.trim()))
}

/// Drop a trailing `# comment` that is not inside a quoted string.
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    unquote(value)
        .parse()
        .map_err(|_| ConfigError::Parse(format!("invalid {}: {}", key, value)))
}
