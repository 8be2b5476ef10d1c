use crate::{EntryId, TeamLiveResult};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeagueKind {
    #[default]
    Classic,
    HeadToHead,
}

impl LeagueKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" | "c" => Some(LeagueKind::Classic),
            "h2h" | "head-to-head" | "headtohead" => Some(LeagueKind::HeadToHead),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeagueKind::Classic => "Classic",
            LeagueKind::HeadToHead => "Head-to-Head",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct H2hRecord {
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
}

/// One team's row in the upstream league standings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueEntry {
    pub entry: EntryId,
    pub team_name: String,
    pub manager: String,
    pub rank: u32,
    /// League points (h2h) or season points (classic).
    pub total: i32,
    pub record: Option<H2hRecord>,
}

/// A team's live outcome. A failed fetch keeps the row with zero points so one
/// team never takes the league view down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamStanding {
    pub entry: LeagueEntry,
    pub live: Option<TeamLiveResult>,
    pub failure: Option<String>,
}

impl TeamStanding {
    pub fn computed(entry: LeagueEntry, live: TeamLiveResult) -> Self {
        Self { entry, live: Some(live), failure: None }
    }

    pub fn failed(entry: LeagueEntry, message: String) -> Self {
        Self { entry, live: None, failure: Some(message) }
    }

    pub fn live_points(&self) -> i32 {
        self.live.as_ref().map(|l| l.live_points).unwrap_or(0)
    }

    pub fn transfer_cost(&self) -> i32 {
        self.live.as_ref().map(|l| l.transfer_cost).unwrap_or(0)
    }
}

/// One head-to-head fixture. `right` is None for a bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub left: EntryId,
    pub right: Option<EntryId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRow {
    pub live_rank: u32,
    pub entry: EntryId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaguePresentation {
    HeadToHead(Vec<Pairing>),
    Ranked(Vec<RankedRow>),
}

impl Default for LeaguePresentation {
    fn default() -> Self {
        LeaguePresentation::Ranked(Vec::new())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LiveLeague {
    pub id: u64,
    pub name: String,
    pub gameweek: u32,
    pub kind: LeagueKind,
    pub standings: Vec<TeamStanding>,
    pub presentation: LeaguePresentation,
    pub favourite: Option<EntryId>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl LiveLeague {
    pub fn standing(&self, entry: EntryId) -> Option<&TeamStanding> {
        self.standings.iter().find(|s| s.entry.entry == entry)
    }

    /// Entries in the order they are presented, for list selection.
    pub fn display_order(&self) -> Vec<EntryId> {
        match &self.presentation {
            LeaguePresentation::Ranked(rows) => rows.iter().map(|r| r.entry).collect(),
            LeaguePresentation::HeadToHead(pairings) => pairings
                .iter()
                .flat_map(|p| std::iter::once(p.left).chain(p.right))
                .collect(),
        }
    }

    pub fn failures(&self) -> usize {
        self.standings.iter().filter(|s| s.failure.is_some()).count()
    }
}

/// Rank by live points, then season total, then team name.
pub fn compose_ranked(standings: &[TeamStanding]) -> Vec<RankedRow> {
    let mut order: Vec<&TeamStanding> = standings.iter().collect();
    order.sort_by(|a, b| {
        b.live_points()
            .cmp(&a.live_points())
            .then_with(|| b.entry.total.cmp(&a.entry.total))
            .then_with(|| a.entry.team_name.cmp(&b.entry.team_name))
    });
    order
        .into_iter()
        .enumerate()
        .map(|(idx, s)| RankedRow { live_rank: idx as u32 + 1, entry: s.entry.entry })
        .collect()
}

/// Keep pairings whose teams are in the league, put the favourite's match first
/// and the favourite on the left.
pub fn compose_head_to_head(
    pairings: Vec<Pairing>,
    standings: &[TeamStanding],
    favourite: Option<EntryId>,
) -> Vec<Pairing> {
    let known = |id: EntryId| standings.iter().any(|s| s.entry.entry == id);

    let mut out: Vec<Pairing> = pairings
        .into_iter()
        .filter(|p| known(p.left) && p.right.is_none_or(known))
        .map(|p| match (favourite, p.right) {
            (Some(fav), Some(right)) if right == fav => Pairing { left: right, right: Some(p.left) },
            _ => p,
        })
        .collect();

    if let Some(fav) = favourite {
        out.sort_by_key(|p| Reverse(p.left == fav));
    }
    out
}
