use std::env;
use std::process;

use panela::color;
use panela::config::{self, Command, Config};

mod commands;
mod output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = env::args().collect();
    let cli = config::parse_args(args);

    if cli.help {
        output::print_help();
        return;
    }

    if cli.version {
        println!("panela {}", VERSION);
        return;
    }

    if let Some(e) = cli.errors.first() {
        eprintln!("error: {}", e);
        eprintln!("Run 'panela --help' for usage.");
        process::exit(1);
    }

    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    color::set_enabled(config.color);

    // Default command is Draw if none specified
    let command = cli.command.unwrap_or(Command::Draw);

    let result = match command {
        Command::Init => commands::cmd_init(&config),
        Command::Draw => commands::cmd_draw(&config, &cli),
        Command::Players => commands::cmd_players(&config),
        Command::Restrictions => commands::cmd_restrictions(&config),
        Command::Restrict => commands::cmd_restrict(&config, &cli),
        Command::Unrestrict => commands::cmd_unrestrict(&config, &cli),
        Command::History => commands::cmd_history(&config),
        Command::ClearHistory => commands::cmd_clear_history(&config),
        Command::Export => commands::cmd_export(&config, &cli),
        Command::Reset => commands::cmd_reset(&config),
        Command::Log => commands::cmd_log(&config, &cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
