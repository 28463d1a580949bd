pub mod draw;
pub mod history;
pub mod misc;
pub mod roster;

pub use draw::cmd_draw;
pub use history::{cmd_clear_history, cmd_export, cmd_history, cmd_log};
pub use misc::{cmd_init, cmd_reset};
pub use roster::{cmd_players, cmd_restrict, cmd_restrictions, cmd_unrestrict};

use panela::config::Config;
use panela::log::DrawLogger;
use panela::store::Store;

/// Open the state store under the configured state directory.
pub(crate) fn open_store(config: &Config) -> Result<Store, String> {
    Store::open_in(config.state_dir()).map_err(|e| e.to_string())
}

/// Draw log under the configured state directory.
pub(crate) fn logger(config: &Config) -> DrawLogger {
    DrawLogger::new(&config.state_dir()).with_max_lines(config.log_max_lines)
}
