//! Persisted draw inputs.
//!
//! Mirrors the fields a user edits between draws: the roster text, how to
//! split it, the two sizing values and the restriction list. Every field is
//! stored under its own key so a reader can pick up a single change.

use serde::{Deserialize, Serialize};

use crate::draw::DrawRequest;
use crate::roster::{parse_participants, RestrictionSet};
use crate::store::{Store, StoreError};
use crate::validate::{self, SplitRequest, ValidationError};

pub const KEY_PARTICIPANTS: &str = "participants";
pub const KEY_SPLIT_TYPE: &str = "split_type";
pub const KEY_TEAM_COUNT: &str = "team_count";
pub const KEY_PLAYERS_PER_TEAM: &str = "players_per_team";
pub const KEY_RESTRICTIONS: &str = "restrictions";

pub const DEFAULT_TEAM_COUNT: usize = 2;
pub const DEFAULT_PLAYERS_PER_TEAM: usize = 5;

/// Which sizing value drives the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    #[default]
    ByTeamCount,
    ByPlayerCount,
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByTeamCount => "by_team_count",
            Self::ByPlayerCount => "by_player_count",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub participants_text: String,
    pub split_type: SplitType,
    pub team_count: usize,
    pub players_per_team: usize,
    pub restrictions: RestrictionSet,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            participants_text: String::new(),
            split_type: SplitType::ByTeamCount,
            team_count: DEFAULT_TEAM_COUNT,
            players_per_team: DEFAULT_PLAYERS_PER_TEAM,
            restrictions: RestrictionSet::new(),
        }
    }
}

impl FormState {
    /// Load from the store; missing or unreadable keys take their defaults.
    pub fn load(store: &Store) -> Self {
        let defaults = Self::default();
        Self {
            participants_text: store.get_or(KEY_PARTICIPANTS, defaults.participants_text),
            split_type: store.get_or(KEY_SPLIT_TYPE, defaults.split_type),
            team_count: store.get_or(KEY_TEAM_COUNT, defaults.team_count),
            players_per_team: store.get_or(KEY_PLAYERS_PER_TEAM, defaults.players_per_team),
            restrictions: store.get_or(KEY_RESTRICTIONS, defaults.restrictions),
        }
    }

    pub fn save(&self, store: &mut Store) -> Result<(), StoreError> {
        store.set(KEY_PARTICIPANTS, &self.participants_text)?;
        store.set(KEY_SPLIT_TYPE, &self.split_type)?;
        store.set(KEY_TEAM_COUNT, &self.team_count)?;
        store.set(KEY_PLAYERS_PER_TEAM, &self.players_per_team)?;
        store.set(KEY_RESTRICTIONS, &self.restrictions)?;
        Ok(())
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn participants(&self) -> Vec<String> {
        parse_participants(&self.participants_text)
    }

    /// Switch to a fixed team count.
    pub fn use_team_count(&mut self, count: usize) {
        self.split_type = SplitType::ByTeamCount;
        self.team_count = count;
    }

    /// Switch to a fixed number of players per team.
    pub fn use_players_per_team(&mut self, size: usize) {
        self.split_type = SplitType::ByPlayerCount;
        self.players_per_team = size;
    }

    /// The active split with its value.
    pub fn split(&self) -> SplitRequest {
        match self.split_type {
            SplitType::ByTeamCount => SplitRequest::TeamCount(self.team_count),
            SplitType::ByPlayerCount => SplitRequest::PlayersPerTeam(self.players_per_team),
        }
    }

    /// Validate the current inputs and build the engine request.
    pub fn to_request(&self, min_participants: usize, seed: Option<u64>) -> Result<DrawRequest, ValidationError> {
        validate::validate(
            &self.participants(),
            self.split(),
            self.restrictions.as_slice(),
            min_participants,
            seed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let form = FormState::default();
        assert_eq!(form.split(), SplitRequest::TeamCount(2));
        assert!(form.participants().is_empty());
        assert!(form.restrictions.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_in(temp.path()).unwrap();

        let mut form = FormState::default();
        form.participants_text = "Ana\nBruno\nCarla\nDiego".to_string();
        form.use_players_per_team(2);
        let roster = form.participants();
        form.restrictions.add("Ana", "Bruno", &roster).unwrap();
        form.save(&mut store).unwrap();

        let reopened = Store::open_in(temp.path()).unwrap();
        let loaded = FormState::load(&reopened);
        assert_eq!(loaded, form);
        assert_eq!(loaded.split(), SplitRequest::PlayersPerTeam(2));
    }

    #[test]
    fn test_load_ignores_unreadable_fields() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_in(temp.path()).unwrap();
        store.set(KEY_TEAM_COUNT, "three").unwrap();
        store.set(KEY_SPLIT_TYPE, "sideways").unwrap();
        store.set(KEY_PARTICIPANTS, "Ana").unwrap();

        let form = FormState::load(&store);
        assert_eq!(form.team_count, DEFAULT_TEAM_COUNT);
        assert_eq!(form.split_type, SplitType::ByTeamCount);
        assert_eq!(form.participants_text, "Ana");
    }

    #[test]
    fn test_split_type_serialized_names() {
        assert_eq!(serde_json::to_string(&SplitType::ByPlayerCount).unwrap(), "\"by_player_count\"");
        assert_eq!(SplitType::ByTeamCount.as_str(), "by_team_count");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = FormState::default();
        form.participants_text = "Ana".to_string();
        form.use_team_count(5);
        form.reset();
        assert_eq!(form, FormState::default());
    }

    #[test]
    fn test_to_request_uses_active_split() {
        let mut form = FormState::default();
        form.participants_text = "Ana\nBruno\nCarla\nDiego\nEva".to_string();
        form.team_count = 9;
        form.use_players_per_team(2);

        let request = form.to_request(4, Some(1)).unwrap();
        assert_eq!(request.team_size, Some(2));
        assert_eq!(request.team_count, None);

        form.split_type = SplitType::ByTeamCount;
        assert!(matches!(
            form.to_request(4, None),
            Err(ValidationError::TooManyTeams { teams: 9, players: 5 })
        ));
    }
}
