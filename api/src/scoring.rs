use crate::autosub::auto_substitutions;
use crate::fixtures::FixtureBoard;
use crate::readiness::classify;
use crate::{
    EngineError, EnrichedPlayer, LiveStat, LiveStats, PlayerDirectory, SQUAD_SIZE,
    STARTER_COUNT, SquadPick, Substitution, TeamLiveResult, TeamPicks,
};

const UNKNOWN_PLAYER: &str = "Unknown";

/// Compute one team's live result from immutable gameweek snapshots.
///
/// Pure: no I/O and no hidden state, so the same inputs always give the same
/// result and teams can be computed concurrently.
pub fn compute_team_result(
    picks: &TeamPicks,
    live: &LiveStats,
    fixtures: &FixtureBoard,
    directory: &PlayerDirectory,
) -> Result<TeamLiveResult, EngineError> {
    validate_picks(&picks.picks)?;

    let mut squad: Vec<EnrichedPlayer> = picks
        .picks
        .iter()
        .map(|pick| enrich(pick, live, fixtures, directory))
        .collect();
    squad.sort_by_key(|p| p.slot);
    let bench = squad.split_off(STARTER_COUNT);
    let starting_eleven = squad;

    let substitutions = auto_substitutions(&starting_eleven, &bench);
    let live_points = live_points(&starting_eleven, &bench, &substitutions, picks.transfer_cost);

    Ok(TeamLiveResult {
        entry: picks.entry,
        starting_eleven,
        bench,
        substitutions,
        live_points,
        transfer_cost: picks.transfer_cost,
        active_chip: picks.active_chip.clone(),
        official_points: picks.official_points,
    })
}

/// Starters not replaced (already post-multiplier) plus activated bench players
/// at face value, less the transfer deduction.
pub fn live_points(
    starting_eleven: &[EnrichedPlayer],
    bench: &[EnrichedPlayer],
    substitutions: &[Substitution],
    transfer_cost: i32,
) -> i32 {
    let starters: i32 = starting_eleven
        .iter()
        .filter(|p| !substitutions.iter().any(|s| s.replaces_slot == p.slot))
        .map(|p| p.points)
        .sum();
    let subs: i32 = bench
        .iter()
        .filter(|p| substitutions.iter().any(|s| s.bench_slot == p.slot))
        .map(|p| p.points)
        .sum();
    starters + subs - transfer_cost
}

fn validate_picks(picks: &[SquadPick]) -> Result<(), EngineError> {
    if picks.len() != SQUAD_SIZE {
        return Err(EngineError::MalformedSnapshot(format!(
            "expected {SQUAD_SIZE} picks, got {}",
            picks.len()
        )));
    }

    let mut seen = [false; SQUAD_SIZE];
    for pick in picks {
        let slot = usize::from(pick.slot);
        if !(1..=SQUAD_SIZE).contains(&slot) {
            return Err(EngineError::MalformedSnapshot(format!(
                "pick for player {} has slot {slot} outside 1-{SQUAD_SIZE}",
                pick.player_id
            )));
        }
        if std::mem::replace(&mut seen[slot - 1], true) {
            return Err(EngineError::MalformedSnapshot(format!("duplicate slot {slot}")));
        }
    }
    Ok(())
}

fn enrich(
    pick: &SquadPick,
    live: &LiveStats,
    fixtures: &FixtureBoard,
    directory: &PlayerDirectory,
) -> EnrichedPlayer {
    let stat = live.get(pick.player_id).copied().unwrap_or(LiveStat {
        player_id: pick.player_id,
        ..LiveStat::default()
    });
    let info = directory.player(pick.player_id);
    let fixture = info.and_then(|p| fixtures.get(p.club)).copied();
    let readiness = classify(&stat, fixture.as_ref());

    let is_starter = usize::from(pick.slot) <= STARTER_COUNT;
    let points = if is_starter {
        stat.total_points * i32::from(pick.multiplier)
    } else {
        stat.total_points
    };

    let opponent = fixture
        .and_then(|f| {
            let name = directory.club_short_name(f.opponent)?;
            Some(if f.is_home {
                name.to_uppercase()
            } else {
                name.to_lowercase()
            })
        })
        .unwrap_or_default();

    EnrichedPlayer {
        slot: pick.slot,
        player_id: pick.player_id,
        name: info
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
        club: info
            .and_then(|p| directory.club_short_name(p.club))
            .unwrap_or_default()
            .to_string(),
        position: info.map(|p| p.position).unwrap_or_default(),
        points,
        multiplier: pick.multiplier,
        minutes: stat.minutes,
        is_captain: pick.is_captain,
        is_vice_captain: pick.is_vice_captain,
        done: readiness.done,
        didnt_play: readiness.didnt_play,
        in_progress: readiness.in_progress,
        bonus_pending: readiness.bonus_pending,
        stat,
        fixture,
        opponent,
    }
}
