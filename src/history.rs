//! Draw history.
//!
//! Each successful draw is recorded together with the inputs that produced
//! it. Entries are kept newest first and capped; the newest entry holds the
//! teams currently on display.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::draw::Team;
use crate::form::{FormState, SplitType};
use crate::roster::Restriction;
use crate::store::{Store, StoreError};

/// Store key holding the serialized history.
pub const KEY_HISTORY: &str = "draw_history";

/// Default number of entries retained.
pub const DEFAULT_MAX_ENTRIES: usize = 20;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// Inputs that produced a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSettings {
    pub participants: Vec<String>,
    pub split_type: SplitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players_per_team: Option<usize>,
    #[serde(default)]
    pub restrictions: Vec<Restriction>,
}

impl DrawSettings {
    /// Snapshot the inputs of a form; only the active sizing value is kept.
    pub fn from_form(form: &FormState) -> Self {
        let (team_count, players_per_team) = match form.split_type {
            SplitType::ByTeamCount => (Some(form.team_count), None),
            SplitType::ByPlayerCount => (None, Some(form.players_per_team)),
        };
        Self {
            participants: form.participants(),
            split_type: form.split_type,
            team_count,
            players_per_team,
            restrictions: form.restrictions.as_slice().to_vec(),
        }
    }
}

/// One recorded draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub teams: Vec<Team>,
    pub settings: DrawSettings,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time.
    pub fn new(teams: Vec<Team>, settings: DrawSettings) -> Self {
        Self::recorded(teams, settings, Utc::now(), &mut rand::thread_rng())
    }

    /// Create an entry stamped with `at`.
    pub fn recorded<R: Rng + ?Sized>(
        teams: Vec<Team>,
        settings: DrawSettings,
        at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self {
            id: format!("{}{}", at.to_rfc3339_opts(SecondsFormat::Millis, true), suffix),
            timestamp: at.timestamp_millis(),
            teams,
            settings,
        }
    }

    /// Local time the draw was recorded, if the timestamp is representable.
    pub fn recorded_at(&self) -> Option<DateTime<Local>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp).map(|utc| utc.with_timezone(&Local))
    }

    /// Timestamp as shown in listings: `dd/mm/yyyy at HH:MM`.
    pub fn display_time(&self) -> String {
        match self.recorded_at() {
            Some(at) => at.format("%d/%m/%Y at %H:%M").to_string(),
            None => "unknown time".to_string(),
        }
    }

    /// One-line summary: `3 teams drawn (12 players)`.
    pub fn summary(&self) -> String {
        let teams = self.teams.len();
        let players = self.settings.participants.len();
        format!(
            "{} team{} drawn ({} player{})",
            teams,
            if teams == 1 { "" } else { "s" },
            players,
            if players == 1 { "" } else { "s" }
        )
    }
}

/// Capped, newest-first list of draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn load(store: &Store) -> Self {
        store.get_or(KEY_HISTORY, Self::default())
    }

    pub fn save(&self, store: &mut Store) -> Result<(), StoreError> {
        store.set(KEY_HISTORY, self)
    }

    /// Prepend `entry`, dropping the oldest entries beyond `max_entries`.
    pub fn record(&mut self, entry: HistoryEntry, max_entries: usize) {
        self.entries.insert(0, entry);
        self.entries.truncate(max_entries);
    }

    /// The most recent draw.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
