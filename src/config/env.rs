use std::env;

use super::types::Config;

pub(super) fn apply_env(config: &mut Config) {
    if let Ok(val) = env::var("PANELA_MIN_PARTICIPANTS") {
        if let Ok(n) = val.parse() {
            config.min_participants = n;
        }
    }
    if let Ok(val) = env::var("PANELA_SEED") {
        if let Ok(n) = val.parse() {
            config.draw_seed = Some(n);
        }
    }
    if let Ok(val) = env::var("PANELA_HISTORY_MAX") {
        if let Ok(n) = val.parse() {
            config.history_max_entries = n;
        }
    }
    if let Ok(val) = env::var("PANELA_STATE_DIR") {
        config.files_state_dir = val;
    }
    if let Ok(val) = env::var("PANELA_EXPORT_FILE") {
        config.files_export = val;
    }
    if let Ok(val) = env::var("PANELA_LOG_MAX_LINES") {
        if let Ok(n) = val.parse() {
            config.log_max_lines = n;
        }
    }
    if let Ok(val) = env::var("PANELA_COLOR") {
        config.color = val == "true" || val == "1";
    }
    // https://no-color.org: any non-empty value disables color.
    if env::var("NO_COLOR").map(|v| !v.is_empty()).unwrap_or(false) {
        config.color = false;
    }
}
