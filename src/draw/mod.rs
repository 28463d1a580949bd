//! Team assignment engine.
//!
//! Partitions a roster into teams at random while keeping restricted pairs
//! apart whenever the current state of the draw allows it. Both sizing modes
//! run the same cycle: every team in order gets one chance per cycle to take a
//! compatible player from the pool. Team-size mode adds a capacity limit.
//!
//! When a whole cycle places nobody, every team with room is blocked for every
//! remaining player. A forced placement then puts one random player on the
//! least conflicted team with room, so the draw always terminates with a
//! complete partition.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::roster::Restriction;

/// Players assigned together, in assignment order.
pub type Team = Vec<String>;

/// Engine errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// Zero or two sizing modes were supplied (or a zero value).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// How the roster is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// A fixed number of teams of any size.
    TeamCount(NonZeroUsize),
    /// Teams of at most this many players; as many teams as needed.
    TeamSize(NonZeroUsize),
}

impl Sizing {
    /// Build a sizing rule from the two mutually exclusive options.
    pub fn from_options(team_count: Option<usize>, team_size: Option<usize>) -> Result<Self, DrawError> {
        match (team_count, team_size) {
            (Some(_), Some(_)) => Err(DrawError::InvalidConfiguration(
                "team count and team size cannot both be set".to_string(),
            )),
            (None, None) => Err(DrawError::InvalidConfiguration(
                "either a team count or a team size must be set".to_string(),
            )),
            (Some(count), None) => NonZeroUsize::new(count)
                .map(Self::TeamCount)
                .ok_or_else(|| DrawError::InvalidConfiguration("team count must be positive".to_string())),
            (None, Some(size)) => NonZeroUsize::new(size)
                .map(Self::TeamSize)
                .ok_or_else(|| DrawError::InvalidConfiguration("team size must be positive".to_string())),
        }
    }

    /// Number of teams this rule produces for `players` players.
    pub fn team_count(&self, players: usize) -> usize {
        match self {
            Self::TeamCount(count) => count.get(),
            Self::TeamSize(size) => players.div_ceil(size.get()),
        }
    }

    fn capacity(&self) -> Capacity {
        match self {
            Self::TeamCount(_) => Capacity::Unbounded,
            Self::TeamSize(size) => Capacity::AtMost(size.get()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Capacity {
    Unbounded,
    AtMost(usize),
}

impl Capacity {
    fn has_room(self, members: usize) -> bool {
        match self {
            Self::Unbounded => true,
            Self::AtMost(limit) => members < limit,
        }
    }
}

/// Everything needed for one draw.
#[derive(Debug, Clone, Default)]
pub struct DrawRequest {
    pub players: Vec<String>,
    pub team_count: Option<usize>,
    pub team_size: Option<usize>,
    pub restrictions: Vec<Restriction>,
    /// Fixes the random source so the same request yields the same teams.
    pub seed: Option<u64>,
}

/// Run a draw from a request, seeding the random source when asked to.
pub fn draw(request: &DrawRequest) -> Result<Vec<Team>, DrawError> {
    let sizing = Sizing::from_options(request.team_count, request.team_size)?;
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(assign(&request.players, sizing, &request.restrictions, &mut rng))
}

/// Partition `players` into teams.
///
/// Every input slot lands in exactly one team. Restricted pairs share a team
/// only when a forced placement left no alternative.
pub fn assign<R: Rng + ?Sized>(
    players: &[String],
    sizing: Sizing,
    restrictions: &[Restriction],
    rng: &mut R,
) -> Vec<Team> {
    let mut teams: Vec<Team> = vec![Vec::new(); sizing.team_count(players.len())];
    if teams.is_empty() {
        return teams;
    }

    let capacity = sizing.capacity();
    let conflicts = Conflicts::new(restrictions);
    let mut pool: Vec<String> = players.to_vec();

    while !pool.is_empty() {
        if run_cycle(&mut pool, &mut teams, capacity, &conflicts, rng) == 0 {
            force_place(&mut pool, &mut teams, capacity, &conflicts, rng);
        }
    }

    teams
}

/// Restrictions that ended up inside a single team, without duplicates.
pub fn violations(teams: &[Team], restrictions: &[Restriction]) -> Vec<Restriction> {
    let mut found: Vec<Restriction> = Vec::new();
    for restriction in restrictions {
        if found.contains(restriction) {
            continue;
        }
        let together = teams.iter().any(|team| {
            if restriction.first == restriction.second {
                team.iter().filter(|p| **p == restriction.first).count() > 1
            } else {
                team.contains(&restriction.first) && team.contains(&restriction.second)
            }
        });
        if together {
            found.push(restriction.clone());
        }
    }
    found
}

/// Give each team with room one chance to take a compatible player.
/// Returns how many players were placed.
fn run_cycle<R: Rng + ?Sized>(
    pool: &mut Vec<String>,
    teams: &mut [Team],
    capacity: Capacity,
    conflicts: &Conflicts<'_>,
    rng: &mut R,
) -> usize {
    let mut placed = 0;
    for team in teams.iter_mut() {
        if pool.is_empty() {
            break;
        }
        if !capacity.has_room(team.len()) {
            continue;
        }
        if let Some(idx) = pick_compatible(pool, team, conflicts, rng) {
            team.push(pool.swap_remove(idx));
            placed += 1;
        }
    }
    placed
}

/// Try pool members in random order (no repeats) and return the first one
/// with no restriction against the team.
fn pick_compatible<R: Rng + ?Sized>(
    pool: &[String],
    team: &[String],
    conflicts: &Conflicts<'_>,
    rng: &mut R,
) -> Option<usize> {
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.shuffle(rng);
    order
        .into_iter()
        .find(|&idx| conflicts.count_against(&pool[idx], team) == 0)
}

fn force_place<R: Rng + ?Sized>(
    pool: &mut Vec<String>,
    teams: &mut [Team],
    capacity: Capacity,
    conflicts: &Conflicts<'_>,
    rng: &mut R,
) {
    let player = pool.swap_remove(rng.gen_range(0..pool.len()));
    // Both sizing rules leave room for the whole roster, so a team with room
    // always exists.
    let target = teams
        .iter()
        .enumerate()
        .filter(|(_, team)| capacity.has_room(team.len()))
        .min_by_key(|(idx, team)| (conflicts.count_against(&player, team), team.len(), *idx))
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    teams[target].push(player);
}

/// Symmetric lookup of restricted partners per player.
struct Conflicts<'a> {
    partners: HashMap<&'a str, HashSet<&'a str>>,
}

impl<'a> Conflicts<'a> {
    fn new(restrictions: &'a [Restriction]) -> Self {
        let mut partners: HashMap<&'a str, HashSet<&'a str>> = HashMap::new();
        for r in restrictions {
            partners.entry(r.first.as_str()).or_default().insert(r.second.as_str());
            partners.entry(r.second.as_str()).or_default().insert(r.first.as_str());
        }
        Self { partners }
    }

    /// Number of team members restricted against `player`.
    fn count_against(&self, player: &str, team: &[String]) -> usize {
        match self.partners.get(player) {
            Some(partners) => team.iter().filter(|m| partners.contains(m.as_str())).count(),
            None => 0,
        }
    }
}
