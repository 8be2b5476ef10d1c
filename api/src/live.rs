use crate::client::{ApiResult, FplApi};
use crate::league::{
    LeagueEntry, LeagueKind, LeaguePresentation, LiveLeague, TeamStanding, compose_head_to_head,
    compose_ranked,
};
use crate::{EntryId, FixtureBoard, LiveStats, PlayerDirectory, compute_team_result};
use chrono::Utc;
use futures_util::{StreamExt, stream};
use log::{debug, warn};

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Everything shared by every team in one poll. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct GameweekSnapshot {
    pub gameweek: u32,
    pub directory: PlayerDirectory,
    pub fixtures: FixtureBoard,
    pub live: LiveStats,
}

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    pub league_id: u64,
    pub kind: LeagueKind,
    pub favourite: Option<EntryId>,
    /// Picks requests in flight at once.
    pub concurrency: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            league_id: 0,
            kind: LeagueKind::default(),
            favourite: None,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Polls one league: a shared gameweek snapshot, then picks and the scoring
/// engine for each entry through a bounded pool.
#[derive(Debug, Clone)]
pub struct LeagueTracker {
    api: FplApi,
    config: TrackerConfig,
}

impl LeagueTracker {
    pub fn new(api: FplApi, config: TrackerConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Fails only when the shared data (snapshot or league entries) cannot be
    /// loaded. Per-team failures become zero-point rows.
    pub async fn refresh(&self) -> ApiResult<LiveLeague> {
        let league_id = self.config.league_id;
        let kind = self.config.kind;
        let favourite = self.config.favourite;

        let snapshot = self.api.fetch_gameweek_snapshot().await?;
        let (name, entries) = self.api.fetch_league_entries(league_id, kind).await?;
        debug!("league {league_id}: {} entries, gameweek {}", entries.len(), snapshot.gameweek);

        let standings = self.compute_standings(&snapshot, entries).await;

        let presentation = match kind {
            LeagueKind::Classic => LeaguePresentation::Ranked(compose_ranked(&standings)),
            LeagueKind::HeadToHead => {
                let pairings = match self.api.fetch_h2h_pairings(league_id, snapshot.gameweek).await {
                    Ok(pairings) => pairings,
                    Err(e) => {
                        warn!("h2h pairings unavailable for league {league_id}: {e}");
                        Vec::new()
                    }
                };
                LeaguePresentation::HeadToHead(compose_head_to_head(pairings, &standings, favourite))
            }
        };

        Ok(LiveLeague {
            id: league_id,
            name,
            gameweek: snapshot.gameweek,
            kind,
            standings,
            presentation,
            favourite,
            updated_at: Some(Utc::now()),
        })
    }

    /// Standings in upstream rank order, one per entry.
    pub async fn compute_standings(
        &self,
        snapshot: &GameweekSnapshot,
        entries: Vec<LeagueEntry>,
    ) -> Vec<TeamStanding> {
        let mut indexed: Vec<(usize, TeamStanding)> = stream::iter(entries.into_iter().enumerate())
            .map(|(idx, entry)| {
                let standing = self.compute_standing(snapshot, entry);
                async move { (idx, standing.await) }
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;
        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, standing)| standing).collect()
    }

    async fn compute_standing(&self, snapshot: &GameweekSnapshot, entry: LeagueEntry) -> TeamStanding {
        let picks = match self.api.fetch_picks(entry.entry, snapshot.gameweek).await {
            Ok(picks) => picks,
            Err(e) => {
                warn!("picks fetch failed for {} ({}): {e}", entry.team_name, entry.entry);
                return TeamStanding::failed(entry, e.to_string());
            }
        };

        match compute_team_result(&picks, &snapshot.live, &snapshot.fixtures, &snapshot.directory) {
            Ok(result) => TeamStanding::computed(entry, result),
            Err(e) => {
                warn!("cannot score {} ({}): {e}", entry.team_name, entry.entry);
                TeamStanding::failed(entry, e.to_string())
            }
        }
    }
}
