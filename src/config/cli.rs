/// CLI arguments parsed from command line.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Subcommand to execute.
    pub command: Option<Command>,
    /// Arguments following the subcommand.
    pub positional: Vec<String>,
    /// Path to config file.
    pub config: Option<String>,
    /// File whose lines replace the roster.
    pub players_file: Option<String>,
    /// Draw this many teams.
    pub teams: Option<usize>,
    /// Draw teams of this many players.
    pub size: Option<usize>,
    /// Seed for a reproducible draw.
    pub seed: Option<u64>,
    /// State directory override.
    pub state_dir: Option<String>,
    /// Minimum roster size override.
    pub min_players: Option<usize>,
    /// History length override.
    pub max_history: Option<usize>,
    /// Draw without recording history.
    pub no_save: bool,
    /// Disable colored output.
    pub no_color: bool,
    /// Show help.
    pub help: bool,
    /// Show version.
    pub version: bool,
    /// Problems found while parsing, reported before anything runs.
    pub errors: Vec<String>,
}

/// Panela subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Write panela.toml and create the state directory.
    Init,
    /// Draw teams from the saved roster.
    Draw,
    /// List the saved roster.
    Players,
    /// List restrictions.
    Restrictions,
    /// Add a restriction between two players.
    Restrict,
    /// Remove a restriction by its listed number.
    Unrestrict,
    /// Show past draws.
    History,
    /// Delete all past draws.
    ClearHistory,
    /// Write the latest draw to a text file.
    Export,
    /// Restore the draw inputs to their defaults.
    Reset,
    /// Show the most recent draw log lines.
    Log,
}

impl Command {
    /// Parse command from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "init" => Some(Self::Init),
            "draw" => Some(Self::Draw),
            "players" => Some(Self::Players),
            "restrictions" => Some(Self::Restrictions),
            "restrict" => Some(Self::Restrict),
            "unrestrict" => Some(Self::Unrestrict),
            "history" => Some(Self::History),
            "clear-history" => Some(Self::ClearHistory),
            "export" => Some(Self::Export),
            "reset" => Some(Self::Reset),
            "log" => Some(Self::Log),
            _ => None,
        }
    }
}

/// Parse CLI arguments from an iterator.
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: IntoIterator<Item = String>,
{
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    // Skip program name
    args.next();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => cli.help = true,
            "-V" | "--version" => cli.version = true,
            "-c" | "--config" => cli.config = value_for(&arg, args.next(), &mut cli.errors),
            "--players" => cli.players_file = value_for(&arg, args.next(), &mut cli.errors),
            "--state-dir" => cli.state_dir = value_for(&arg, args.next(), &mut cli.errors),
            "--teams" => cli.teams = number_for(&arg, args.next(), &mut cli.errors),
            "--size" => cli.size = number_for(&arg, args.next(), &mut cli.errors),
            "--seed" => cli.seed = number_for(&arg, args.next(), &mut cli.errors),
            "--min-players" => cli.min_players = number_for(&arg, args.next(), &mut cli.errors),
            "--max-history" => cli.max_history = number_for(&arg, args.next(), &mut cli.errors),
            "--no-save" => cli.no_save = true,
            "--no-color" => cli.no_color = true,
            _ if arg.starts_with('-') && arg.len() > 1 => {
                cli.errors.push(format!("unknown option: {}", arg));
            }
            _ if cli.command.is_none() && cli.positional.is_empty() => match Command::parse(&arg) {
                Some(command) => cli.command = Some(command),
                None => cli.errors.push(format!("unknown command: {}", arg)),
            },
            _ => cli.positional.push(arg),
        }
    }

    cli
}

fn value_for(flag: &str, value: Option<String>, errors: &mut Vec<String>) -> Option<String> {
    if value.is_none() {
        errors.push(format!("{} requires a value", flag));
    }
    value
}

fn number_for<T: std::str::FromStr>(flag: &str, value: Option<String>, errors: &mut Vec<String>) -> Option<T> {
    let value = value_for(flag, value, errors)?;
    match value.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(format!("{} expects a non-negative number, got '{}'", flag, value));
            None
        }
    }
}
