pub mod autosub;
pub mod client;
pub mod fixtures;
pub mod formation;
pub mod fpl;
pub mod league;
pub mod live;
pub mod readiness;
pub mod scoring;

pub use fixtures::{ClubFixture, FixtureBoard, FixtureStatus};
pub use scoring::compute_team_result;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type PlayerId = u32;
pub type ClubId = u32;
pub type EntryId = u64;

pub const SQUAD_SIZE: usize = 15;
pub const STARTER_COUNT: usize = 11;

// ---------------------------------------------------------------------------
// Domain types, independent of the FPL wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
    /// Player missing from the directory.
    #[default]
    Unknown,
}

impl Position {
    pub fn from_element_type(element_type: u32) -> Self {
        match element_type {
            1 => Position::Goalkeeper,
            2 => Position::Defender,
            3 => Position::Midfielder,
            4 => Position::Forward,
            _ => Position::Unknown,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
            Position::Unknown => "UNK",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub short_name: String, // "ARS"
}

#[derive(Debug, Clone, Default)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String, // web name, e.g. "Saka"
    pub club: ClubId,
    pub position: Position,
}

/// Player and club lookup built from the bootstrap snapshot.
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    players: HashMap<PlayerId, PlayerInfo>,
    clubs: HashMap<ClubId, Club>,
}

impl PlayerDirectory {
    pub fn new(players: Vec<PlayerInfo>, clubs: Vec<Club>) -> Self {
        Self {
            players: players.into_iter().map(|p| (p.id, p)).collect(),
            clubs: clubs.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerInfo> {
        self.players.get(&id)
    }

    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.clubs.get(&id)
    }

    pub fn club_short_name(&self, id: ClubId) -> Option<&str> {
        self.club(id).map(|c| c.short_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// One fixture of the current gameweek, as reported upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixture {
    pub id: u32,
    pub home: ClubId,
    pub away: ClubId,
    pub started: bool,
    pub finished_provisional: bool,
    pub finished: bool,
    pub minutes: u16,
    pub kickoff: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveStat {
    pub player_id: PlayerId,
    pub minutes: u16,
    pub total_points: i32,
    pub red_cards: u8,
    pub goals: u8,
    pub assists: u8,
    pub yellow_cards: u8,
    pub bonus: u8,
    pub starts: u8,
}

/// Live stats for every player in the gameweek, keyed by player id.
#[derive(Debug, Clone, Default)]
pub struct LiveStats {
    by_player: HashMap<PlayerId, LiveStat>,
}

impl LiveStats {
    pub fn new(stats: Vec<LiveStat>) -> Self {
        Self {
            by_player: stats.into_iter().map(|s| (s.player_id, s)).collect(),
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&LiveStat> {
        self.by_player.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_player.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SquadPick {
    pub slot: u8,
    pub player_id: PlayerId,
    pub is_captain: bool,
    pub is_vice_captain: bool,
    pub multiplier: u8, // 0 bench, 1 starter, 2 captain, 3 triple captain
}

/// A team's picks for one gameweek plus the event-level transfer deduction.
#[derive(Debug, Clone, Default)]
pub struct TeamPicks {
    pub entry: EntryId,
    pub picks: Vec<SquadPick>,
    pub transfer_cost: i32,
    pub active_chip: Option<String>,
    /// Event points as last settled upstream, before any live recomputation.
    pub official_points: i32,
}

/// One pick annotated with directory, live and fixture data. Owned by one team's result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichedPlayer {
    pub slot: u8,
    pub player_id: PlayerId,
    pub name: String,
    pub club: String,
    pub position: Position,
    /// Post-multiplier for starters; raw for the bench.
    pub points: i32,
    pub multiplier: u8,
    pub minutes: u16,
    pub is_captain: bool,
    pub is_vice_captain: bool,
    pub done: bool,
    pub didnt_play: bool,
    pub in_progress: bool,
    pub bonus_pending: bool,
    pub stat: LiveStat,
    pub fixture: Option<ClubFixture>,
    /// Opponent short name; upper case at home, lower case away.
    pub opponent: String,
}

impl EnrichedPlayer {
    pub fn is_starter(&self) -> bool {
        usize::from(self.slot) <= STARTER_COUNT
    }

    /// Done and recorded no minutes: a candidate for auto-substitution.
    pub fn needs_replacing(&self) -> bool {
        self.done && self.didnt_play
    }

    pub fn fixture_label(&self) -> String {
        self.fixture.map(|f| f.status_label()).unwrap_or_default()
    }

    pub fn captaincy_badge(&self) -> &'static str {
        if self.is_captain {
            " (C)"
        } else if self.is_vice_captain {
            " (V)"
        } else {
            ""
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub bench_slot: u8,
    pub replaces_slot: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamLiveResult {
    pub entry: EntryId,
    pub starting_eleven: Vec<EnrichedPlayer>,
    pub bench: Vec<EnrichedPlayer>,
    /// In activation order (bench slot order).
    pub substitutions: Vec<Substitution>,
    pub live_points: i32,
    pub transfer_cost: i32,
    pub active_chip: Option<String>,
    pub official_points: i32,
}

impl TeamLiveResult {
    pub fn is_activated(&self, bench_slot: u8) -> bool {
        self.substitutions.iter().any(|s| s.bench_slot == bench_slot)
    }

    pub fn is_replaced(&self, starter_slot: u8) -> bool {
        self.substitutions.iter().any(|s| s.replaces_slot == starter_slot)
    }

    /// Slot of the bench player coming on for this starter, if any.
    pub fn replacement_for(&self, starter_slot: u8) -> Option<u8> {
        self.substitutions
            .iter()
            .find(|s| s.replaces_slot == starter_slot)
            .map(|s| s.bench_slot)
    }

    /// Starters whose involvement in the gameweek is over.
    pub fn players_done(&self) -> usize {
        self.starting_eleven.iter().filter(|p| p.done).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    MalformedSnapshot(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MalformedSnapshot(msg) => write!(f, "Malformed snapshot: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
