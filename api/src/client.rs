use crate::fpl::{
    BootstrapResponse, FplFixture, FplH2hMatch, FplStandingRow, H2hMatchesResponse, LiveResponse,
    PicksResponse, StandingsResponse,
};
use crate::league::{H2hRecord, LeagueEntry, LeagueKind, Pairing};
use crate::live::GameweekSnapshot;
use crate::{
    Club, EntryId, Fixture, FixtureBoard, LiveStat, LiveStats, PlayerDirectory, PlayerInfo,
    Position, SquadPick, TeamPicks,
};
use chrono::Utc;
use futures_util::future::try_join;
use log::debug;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const FPL_API_BASE: &str = "https://fantasy.premierleague.com/api";

/// Standings and h2h match lists are paged 50 rows at a time. Every entry costs
/// one picks request per refresh, so very large leagues are cut off here.
const MAX_PAGES: u32 = 4;

/// Applies to each upstream request, body included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// FPL API client.
#[derive(Debug, Clone)]
pub struct FplApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for FplApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("fpltui/0.1 (terminal league tracker)")
                .build()
                .unwrap_or_default(),
            base_url: FPL_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Bootstrap data needed for one gameweek: which gameweek is live and who is who.
#[derive(Debug, Clone, Default)]
pub struct Bootstrap {
    pub gameweek: u32,
    pub directory: PlayerDirectory,
}

impl FplApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host (a proxy or a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn fetch_bootstrap(&self) -> ApiResult<Bootstrap> {
        let url = format!("{}/bootstrap-static/", self.base_url);
        let raw: BootstrapResponse = self.get(&url).await?;
        map_bootstrap(raw)
    }

    pub async fn fetch_fixtures(&self, gameweek: u32) -> ApiResult<Vec<Fixture>> {
        let url = format!("{}/fixtures/?event={gameweek}", self.base_url);
        let raw: Vec<FplFixture> = self.get(&url).await?;
        Ok(raw
            .iter()
            .filter(|f| f.event.is_none_or(|e| e == gameweek))
            .map(map_fixture)
            .collect())
    }

    pub async fn fetch_live(&self, gameweek: u32) -> ApiResult<LiveStats> {
        let url = format!("{}/event/{gameweek}/live/", self.base_url);
        let raw: LiveResponse = self.get(&url).await?;
        Ok(map_live(raw))
    }

    /// Bootstrap first (it names the gameweek), then fixtures and live stats together.
    pub async fn fetch_gameweek_snapshot(&self) -> ApiResult<GameweekSnapshot> {
        let bootstrap = self.fetch_bootstrap().await?;
        let gameweek = bootstrap.gameweek;
        debug!("loading gameweek {gameweek} snapshot");
        let (fixtures, live) =
            try_join(self.fetch_fixtures(gameweek), self.fetch_live(gameweek)).await?;
        Ok(GameweekSnapshot {
            gameweek,
            directory: bootstrap.directory,
            fixtures: FixtureBoard::from_fixtures(&fixtures),
            live,
        })
    }

    pub async fn fetch_picks(&self, entry: EntryId, gameweek: u32) -> ApiResult<TeamPicks> {
        let url = format!("{}/entry/{entry}/event/{gameweek}/picks/", self.base_url);
        let raw: PicksResponse = self.get(&url).await?;
        Ok(map_picks(entry, raw))
    }

    /// League name and every entry (up to the page cap) in upstream rank order.
    pub async fn fetch_league_entries(
        &self,
        league_id: u64,
        kind: LeagueKind,
    ) -> ApiResult<(String, Vec<LeagueEntry>)> {
        let path = match kind {
            LeagueKind::Classic => "leagues-classic",
            LeagueKind::HeadToHead => "leagues-h2h",
        };

        let mut name = String::new();
        let mut entries = Vec::new();
        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}/{path}/{league_id}/standings/?page_standings={page}",
                self.base_url
            );
            let raw: StandingsResponse = self.get(&url).await?;
            if page == 1 {
                name = raw.league.name;
            }
            entries.extend(raw.standings.results.iter().map(|r| map_standing_row(r, kind)));
            if !raw.standings.has_next {
                break;
            }
        }

        if entries.is_empty() {
            return Err(ApiError::NotFound(format!("league {league_id} has no entries")));
        }
        Ok((name, entries))
    }

    pub async fn fetch_h2h_pairings(&self, league_id: u64, gameweek: u32) -> ApiResult<Vec<Pairing>> {
        let mut pairings = Vec::new();
        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}/leagues-h2h-matches/league/{league_id}/?event={gameweek}&page={page}",
                self.base_url
            );
            let raw: H2hMatchesResponse = self.get(&url).await?;
            pairings.extend(
                raw.results
                    .iter()
                    .filter(|m| m.event == gameweek)
                    .filter_map(map_h2h_match),
            );
            if !raw.has_next {
                break;
            }
        }
        Ok(pairings)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            // A body that stalls past the deadline is a network failure, not bad JSON.
            Ok(res) => res.json::<T>().await.map_err(|e| {
                if e.is_timeout() {
                    ApiError::Network(e, url.to_owned())
                } else {
                    ApiError::Parsing(e, url.to_owned())
                }
            }),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Err(ApiError::NotFound(format!("{url}: {e}")))
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: FPL wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_bootstrap(raw: BootstrapResponse) -> ApiResult<Bootstrap> {
    // Pre-season there is no current event yet; track the next one instead.
    let gameweek = raw
        .events
        .iter()
        .find(|e| e.is_current)
        .or_else(|| raw.events.iter().find(|e| e.is_next))
        .map(|e| e.id)
        .ok_or_else(|| ApiError::NotFound("no current or next gameweek".into()))?;

    let players = raw
        .elements
        .into_iter()
        .map(|e| PlayerInfo {
            id: e.id,
            name: e.web_name,
            club: e.team,
            position: Position::from_element_type(e.element_type),
        })
        .collect();
    let clubs = raw
        .teams
        .into_iter()
        .map(|t| Club { id: t.id, name: t.name, short_name: t.short_name })
        .collect();

    Ok(Bootstrap { gameweek, directory: PlayerDirectory::new(players, clubs) })
}

fn map_fixture(f: &FplFixture) -> Fixture {
    let kickoff = f
        .kickoff_time
        .as_deref()
        .and_then(|d| chrono::DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Fixture {
        id: f.id,
        home: f.team_h,
        away: f.team_a,
        started: f.started.unwrap_or(false),
        finished_provisional: f.finished_provisional,
        finished: f.finished,
        minutes: f.minutes,
        kickoff,
    }
}

fn map_live(raw: LiveResponse) -> LiveStats {
    LiveStats::new(
        raw.elements
            .into_iter()
            .map(|e| LiveStat {
                player_id: e.id,
                minutes: e.stats.minutes,
                total_points: e.stats.total_points,
                red_cards: e.stats.red_cards,
                goals: e.stats.goals_scored,
                assists: e.stats.assists,
                yellow_cards: e.stats.yellow_cards,
                bonus: e.stats.bonus,
                starts: e.stats.starts,
            })
            .collect(),
    )
}

fn map_picks(entry: EntryId, raw: PicksResponse) -> TeamPicks {
    TeamPicks {
        entry,
        picks: raw
            .picks
            .iter()
            .map(|p| SquadPick {
                slot: p.position,
                player_id: p.element,
                is_captain: p.is_captain,
                is_vice_captain: p.is_vice_captain,
                multiplier: p.multiplier,
            })
            .collect(),
        transfer_cost: raw.entry_history.event_transfers_cost.max(0),
        active_chip: raw.active_chip.filter(|c| !c.is_empty()),
        official_points: raw.entry_history.points,
    }
}

fn map_standing_row(r: &FplStandingRow, kind: LeagueKind) -> LeagueEntry {
    LeagueEntry {
        entry: r.entry,
        team_name: r.entry_name.clone(),
        manager: r.player_name.clone(),
        rank: r.rank,
        total: r.total,
        record: (kind == LeagueKind::HeadToHead).then_some(H2hRecord {
            won: r.matches_won,
            drawn: r.matches_drawn,
            lost: r.matches_lost,
        }),
    }
}

fn map_h2h_match(m: &FplH2hMatch) -> Option<Pairing> {
    match (m.entry_1_entry, m.entry_2_entry) {
        (Some(left), right) => Some(Pairing { left, right }),
        (None, Some(right)) => Some(Pairing { left: right, right: None }),
        (None, None) => None,
    }
}
