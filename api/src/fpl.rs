/// Wire types for the fantasy.premierleague.com API.
/// These map to the clean domain types in lib.rs via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// bootstrap-static/
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct BootstrapResponse {
    #[serde(default)]
    pub events: Vec<FplEvent>,
    #[serde(default)]
    pub teams: Vec<FplTeam>,
    #[serde(default)]
    pub elements: Vec<FplElement>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplEvent {
    pub id: u32,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplTeam {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplElement {
    pub id: u32,
    #[serde(default)]
    pub web_name: String,
    #[serde(default)]
    pub team: u32,
    #[serde(default)]
    pub element_type: u32,
}

// ---------------------------------------------------------------------------
// fixtures/?event={gw}
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplFixture {
    pub id: u32,
    pub event: Option<u32>,
    pub team_h: u32,
    pub team_a: u32,
    /// Null until the fixture is scheduled for a kickoff slot.
    pub started: Option<bool>,
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub finished_provisional: bool,
    #[serde(default)]
    pub minutes: u16,
    pub kickoff_time: Option<String>,
}

// ---------------------------------------------------------------------------
// event/{gw}/live/
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct LiveResponse {
    #[serde(default)]
    pub elements: Vec<FplLiveElement>,
}

#[derive(Deserialize, Default, Debug)]
pub struct FplLiveElement {
    pub id: u32,
    #[serde(default)]
    pub stats: FplLiveStats,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct FplLiveStats {
    pub minutes: u16,
    pub goals_scored: u8,
    pub assists: u8,
    pub yellow_cards: u8,
    pub red_cards: u8,
    pub bonus: u8,
    pub total_points: i32,
    pub starts: u8,
}

// ---------------------------------------------------------------------------
// entry/{id}/event/{gw}/picks/
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct PicksResponse {
    pub active_chip: Option<String>,
    #[serde(default)]
    pub entry_history: FplEntryHistory,
    #[serde(default)]
    pub picks: Vec<FplPick>,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default)]
pub struct FplEntryHistory {
    pub points: i32,
    pub event_transfers_cost: i32,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplPick {
    pub element: u32,
    /// Squad slot, 1-11 starters and 12-15 bench.
    pub position: u8,
    #[serde(default)]
    pub multiplier: u8,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
}

// ---------------------------------------------------------------------------
// leagues-classic/{id}/standings/ and leagues-h2h/{id}/standings/
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct StandingsResponse {
    #[serde(default)]
    pub league: FplLeague,
    #[serde(default)]
    pub standings: FplStandings,
}

#[derive(Deserialize, Default, Debug)]
pub struct FplLeague {
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct FplStandings {
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub results: Vec<FplStandingRow>,
}

/// Classic and head-to-head rows share most fields; the h2h-only record
/// columns are absent (and default to zero) on classic leagues.
#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct FplStandingRow {
    pub entry: u64,
    pub entry_name: String,
    pub player_name: String,
    pub rank: u32,
    pub total: i32,
    pub matches_won: u16,
    pub matches_drawn: u16,
    pub matches_lost: u16,
}

// ---------------------------------------------------------------------------
// leagues-h2h-matches/league/{id}/?event={gw}
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct H2hMatchesResponse {
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub results: Vec<FplH2hMatch>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplH2hMatch {
    pub event: u32,
    pub entry_1_entry: Option<u64>,
    /// Null when entry 1 has a bye this gameweek.
    pub entry_2_entry: Option<u64>,
}
