//! Roster parsing and restriction editing.
//!
//! The roster is kept as free text (one name per line) and parsed on demand.
//! Restrictions are unordered player pairs that should not share a team.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parse a roster from free text: one name per line, surrounding whitespace
/// trimmed, blank lines dropped.
///
/// # Examples
/// ```
/// use panela::roster::parse_participants;
/// let players = parse_participants("  Ana\n\nBruno \n");
/// assert_eq!(players, vec!["Ana", "Bruno"]);
/// ```
pub fn parse_participants(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// A pair of players who must not be placed on the same team.
///
/// Equality is unordered: `(A, B) == (B, A)`.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Restriction {
    pub first: String,
    pub second: String,
}

impl Restriction {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Check if this restriction names the given player.
    pub fn involves(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }

    /// Check if this restriction forbids `a` and `b` together, in either order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

impl PartialEq for Restriction {
    fn eq(&self, other: &Self) -> bool {
        self.is_between(&other.first, &other.second)
    }
}

impl std::fmt::Display for Restriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.first, self.second)
    }
}

/// Errors from editing the restriction list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestrictionError {
    #[error("select two players for the restriction")]
    Incomplete,
    #[error("a restriction needs two different players (got {0} twice)")]
    SamePlayer(String),
    #[error("restriction already exists: {0}")]
    Duplicate(Restriction),
    #[error("player not in roster: {0}")]
    UnknownPlayer(String),
    #[error("no restriction #{0}")]
    NoSuchIndex(usize),
}

/// Ordered list of active restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestrictionSet {
    pairs: Vec<Restriction>,
}

impl RestrictionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a restriction between two roster players.
    ///
    /// Names are trimmed before checking. Rejects blanks, a player paired with
    /// themselves, names missing from `roster`, and pairs that already exist in
    /// either order.
    pub fn add(
        &mut self,
        first: &str,
        second: &str,
        roster: &[String],
    ) -> Result<&Restriction, RestrictionError> {
        let first = first.trim();
        let second = second.trim();
        if first.is_empty() || second.is_empty() {
            return Err(RestrictionError::Incomplete);
        }
        if first == second {
            return Err(RestrictionError::SamePlayer(first.to_string()));
        }
        for name in [first, second] {
            if !roster.iter().any(|p| p == name) {
                return Err(RestrictionError::UnknownPlayer(name.to_string()));
            }
        }

        let candidate = Restriction::new(first, second);
        if self.pairs.contains(&candidate) {
            return Err(RestrictionError::Duplicate(candidate));
        }
        self.pairs.push(candidate);
        Ok(&self.pairs[self.pairs.len() - 1])
    }

    /// Remove the restriction at `index` (0-based) and return it.
    pub fn remove(&mut self, index: usize) -> Result<Restriction, RestrictionError> {
        if index >= self.pairs.len() {
            return Err(RestrictionError::NoSuchIndex(index + 1));
        }
        Ok(self.pairs.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Restriction> {
        self.pairs.iter()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn as_slice(&self) -> &[Restriction] {
        &self.pairs
    }
}

impl From<Vec<Restriction>> for RestrictionSet {
    fn from(pairs: Vec<Restriction>) -> Self {
        Self { pairs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<String> {
        parse_participants("Ana\nBruno\nCarla\nDiego")
    }

    #[test]
    fn test_parse_participants_trims_and_skips_blanks() {
        let players = parse_participants("\n  Ana  \n\t\nBruno\r\n   \nCarla");
        assert_eq!(players, vec!["Ana", "Bruno", "Carla"]);
    }

    #[test]
    fn test_parse_participants_keeps_duplicates() {
        let players = parse_participants("Ana\nAna\nBruno");
        assert_eq!(players, vec!["Ana", "Ana", "Bruno"]);
    }

    #[test]
    fn test_parse_participants_empty() {
        assert!(parse_participants("").is_empty());
        assert!(parse_participants("\n \n").is_empty());
    }

    #[test]
    fn test_restriction_equality_is_unordered() {
        assert_eq!(Restriction::new("Ana", "Bruno"), Restriction::new("Bruno", "Ana"));
        assert_ne!(Restriction::new("Ana", "Bruno"), Restriction::new("Ana", "Carla"));
    }

    #[test]
    fn test_restriction_involves() {
        let r = Restriction::new("Ana", "Bruno");
        assert!(r.involves("Ana"));
        assert!(r.involves("Bruno"));
        assert!(!r.involves("Carla"));
    }

    #[test]
    fn test_add_restriction() {
        let mut set = RestrictionSet::new();
        let added = set.add("Ana", " Bruno ", &roster()).unwrap().clone();
        assert_eq!(added, Restriction::new("Ana", "Bruno"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_rejects_reversed_duplicate() {
        let mut set = RestrictionSet::new();
        set.add("Ana", "Bruno", &roster()).unwrap();
        let err = set.add("Bruno", "Ana", &roster()).unwrap_err();
        assert!(matches!(err, RestrictionError::Duplicate(_)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_add_rejects_same_player() {
        let mut set = RestrictionSet::new();
        assert_eq!(
            set.add("Ana", "Ana", &roster()),
            Err(RestrictionError::SamePlayer("Ana".to_string()))
        );
    }

    #[test]
    fn test_add_rejects_blank_and_unknown() {
        let mut set = RestrictionSet::new();
        assert_eq!(set.add("", "Ana", &roster()), Err(RestrictionError::Incomplete));
        assert_eq!(
            set.add("Ana", "Zeca", &roster()),
            Err(RestrictionError::UnknownPlayer("Zeca".to_string()))
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_restriction() {
        let mut set = RestrictionSet::new();
        set.add("Ana", "Bruno", &roster()).unwrap();
        set.add("Carla", "Diego", &roster()).unwrap();

        let removed = set.remove(0).unwrap();
        assert_eq!(removed, Restriction::new("Ana", "Bruno"));
        assert_eq!(set.as_slice(), &[Restriction::new("Carla", "Diego")]);

        assert_eq!(set.remove(5), Err(RestrictionError::NoSuchIndex(6)));
    }

    #[test]
    fn test_restriction_set_serializes_as_pairs() {
        let set = RestrictionSet::from(vec![Restriction::new("Ana", "Bruno")]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"[{"first":"Ana","second":"Bruno"}]"#);
        let back: RestrictionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
