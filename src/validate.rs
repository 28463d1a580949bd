//! Pre-draw validation.
//!
//! The engine trusts its inputs; these checks run first and keep nonsensical
//! requests (too few players, more teams than players) from reaching it.

use thiserror::Error;

use crate::draw::DrawRequest;
use crate::roster::Restriction;

/// Default minimum roster size for a draw.
pub const DEFAULT_MIN_PARTICIPANTS: usize = 4;

/// How the roster is split, as chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRequest {
    /// Fixed number of teams.
    TeamCount(usize),
    /// Fixed number of players per team.
    PlayersPerTeam(usize),
}

/// Reasons a draw request is refused before it runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least {min} participants are required (got {count})")]
    NotEnoughPlayers { count: usize, min: usize },
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("team count ({teams}) cannot exceed the number of participants ({players})")]
    TooManyTeams { teams: usize, players: usize },
    #[error("players per team ({size}) cannot exceed the number of participants ({players})")]
    TeamSizeTooLarge { size: usize, players: usize },
}

/// Check a request and build the engine input.
pub fn validate(
    players: &[String],
    split: SplitRequest,
    restrictions: &[Restriction],
    min_participants: usize,
    seed: Option<u64>,
) -> Result<DrawRequest, ValidationError> {
    let count = players.len();
    if count < min_participants {
        return Err(ValidationError::NotEnoughPlayers {
            count,
            min: min_participants,
        });
    }

    let (team_count, team_size) = match split {
        SplitRequest::TeamCount(0) => return Err(ValidationError::NotPositive("team count")),
        SplitRequest::PlayersPerTeam(0) => return Err(ValidationError::NotPositive("players per team")),
        SplitRequest::TeamCount(teams) if teams > count => {
            return Err(ValidationError::TooManyTeams { teams, players: count })
        }
        SplitRequest::PlayersPerTeam(size) if size > count => {
            return Err(ValidationError::TeamSizeTooLarge { size, players: count })
        }
        SplitRequest::TeamCount(teams) => (Some(teams), None),
        SplitRequest::PlayersPerTeam(size) => (None, Some(size)),
    };

    Ok(DrawRequest {
        players: players.to_vec(),
        team_count,
        team_size,
        restrictions: restrictions.to_vec(),
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::parse_participants;

    fn six() -> Vec<String> {
        parse_participants("Ana\nBruno\nCarla\nDiego\nEva\nFabio")
    }

    #[test]
    fn test_validate_team_count() {
        let request = validate(&six(), SplitRequest::TeamCount(2), &[], 4, Some(9)).unwrap();
        assert_eq!(request.team_count, Some(2));
        assert_eq!(request.team_size, None);
        assert_eq!(request.players.len(), 6);
        assert_eq!(request.seed, Some(9));
    }

    #[test]
    fn test_validate_players_per_team() {
        let restrictions = vec![Restriction::new("Ana", "Bruno")];
        let request = validate(&six(), SplitRequest::PlayersPerTeam(3), &restrictions, 4, None).unwrap();
        assert_eq!(request.team_count, None);
        assert_eq!(request.team_size, Some(3));
        assert_eq!(request.restrictions, restrictions);
    }

    #[test]
    fn test_validate_not_enough_players() {
        let players = parse_participants("Ana\nBruno");
        assert_eq!(
            validate(&players, SplitRequest::TeamCount(2), &[], 4, None).unwrap_err(),
            ValidationError::NotEnoughPlayers { count: 2, min: 4 }
        );
    }

    #[test]
    fn test_validate_zero_values() {
        assert_eq!(
            validate(&six(), SplitRequest::TeamCount(0), &[], 4, None).unwrap_err(),
            ValidationError::NotPositive("team count")
        );
        assert_eq!(
            validate(&six(), SplitRequest::PlayersPerTeam(0), &[], 4, None).unwrap_err(),
            ValidationError::NotPositive("players per team")
        );
    }

    #[test]
    fn test_validate_out_of_range() {
        assert_eq!(
            validate(&six(), SplitRequest::TeamCount(7), &[], 4, None).unwrap_err(),
            ValidationError::TooManyTeams { teams: 7, players: 6 }
        );
        assert_eq!(
            validate(&six(), SplitRequest::PlayersPerTeam(7), &[], 4, None).unwrap_err(),
            ValidationError::TeamSizeTooLarge { size: 7, players: 6 }
        );
    }

    #[test]
    fn test_validate_boundaries_are_allowed() {
        assert!(validate(&six(), SplitRequest::TeamCount(6), &[], 6, None).is_ok());
        assert!(validate(&six(), SplitRequest::PlayersPerTeam(6), &[], 6, None).is_ok());
    }
}
