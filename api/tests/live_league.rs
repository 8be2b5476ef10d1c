use fpl_api::client::{ApiError, FplApi};
use fpl_api::league::{LeagueKind, LeaguePresentation, Pairing, RankedRow};
use fpl_api::live::{LeagueTracker, TrackerConfig};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{Value, json};
use std::io::Write;
use std::time::Duration;

const LEAGUE_ID: u64 = 77;
const GAMEWEEK: u32 = 7;

/// 1-3-5-2 with a GK, DEF, MID, FWD bench; every player belongs to club 1.
fn element_type(slot: u32) -> u32 {
    match slot {
        1 | 12 => 1,
        2..=4 | 13 => 2,
        5..=9 | 14 => 3,
        _ => 4,
    }
}

fn bootstrap() -> Value {
    let elements: Vec<Value> = (1..=15)
        .map(|id| json!({"id": id, "web_name": format!("P{id}"), "team": 1, "element_type": element_type(id)}))
        .collect();
    json!({
        "events": [{"id": GAMEWEEK, "is_current": true, "is_next": false, "finished": false}],
        "teams": [
            {"id": 1, "name": "Arsenal", "short_name": "ARS"},
            {"id": 2, "name": "Chelsea", "short_name": "CHE"}
        ],
        "elements": elements,
        "element_types": []
    })
}

fn fixtures() -> Value {
    json!([{
        "id": 70, "event": GAMEWEEK, "team_h": 1, "team_a": 2, "started": true,
        "finished": true, "finished_provisional": true, "minutes": 90,
        "kickoff_time": "2025-10-04T14:00:00Z"
    }])
}

/// Everyone played 90 minutes for 4 points except the slot-4 defender.
fn live() -> Value {
    let elements: Vec<Value> = (1..=15)
        .map(|id| {
            let (minutes, points) = if id == 4 { (0, 0) } else { (90, 4) };
            json!({"id": id, "stats": {"minutes": minutes, "total_points": points, "starts": 1}})
        })
        .collect();
    json!({"elements": elements})
}

fn picks(transfer_cost: i32) -> Value {
    let picks: Vec<Value> = (1..=15)
        .map(|slot| {
            let multiplier = match slot {
                10 => 2,
                1..=11 => 1,
                _ => 0,
            };
            json!({"element": slot, "position": slot, "multiplier": multiplier,
                   "is_captain": slot == 10, "is_vice_captain": slot == 11})
        })
        .collect();
    json!({
        "active_chip": null,
        "entry_history": {"event": GAMEWEEK, "points": 0, "total_points": 0, "event_transfers_cost": transfer_cost},
        "picks": picks
    })
}

/// H2h and classic standings share a row shape; the record is only read for h2h.
fn standings() -> Value {
    json!({
        "league": {"id": LEAGUE_ID, "name": "Office League"},
        "standings": {"has_next": false, "results": [
            {"entry": 1, "entry_name": "One", "player_name": "A", "rank": 1, "total": 30, "event_total": 0,
             "matches_won": 3, "matches_drawn": 0, "matches_lost": 0},
            {"entry": 2, "entry_name": "Two", "player_name": "B", "rank": 2, "total": 20, "event_total": 0,
             "matches_won": 2, "matches_drawn": 0, "matches_lost": 1},
            {"entry": 3, "entry_name": "Three", "player_name": "C", "rank": 3, "total": 10, "event_total": 0,
             "matches_won": 1, "matches_drawn": 0, "matches_lost": 2}
        ]}
    })
}

async fn mock_json(server: &mut ServerGuard, path: &str, status: usize, body: Value) {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;
}

/// Headers go out at once; the body is held back for `stall`.
async fn mock_stalled(server: &mut ServerGuard, path: &str, stall: Duration, body: Value) {
    let body = body.to_string();
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(move |w| {
            std::thread::sleep(stall);
            w.write_all(body.as_bytes())
        })
        .create_async()
        .await;
}

async fn mock_snapshot(server: &mut ServerGuard) {
    mock_json(server, "/bootstrap-static/", 200, bootstrap()).await;
    mock_json(server, "/fixtures/", 200, fixtures()).await;
    mock_json(server, &format!("/event/{GAMEWEEK}/live/"), 200, live()).await;
}

async fn mock_gameweek(server: &mut ServerGuard) {
    mock_snapshot(server).await;
    mock_json(server, &format!("/entry/1/event/{GAMEWEEK}/picks/"), 200, picks(0)).await;
    mock_json(server, &format!("/entry/2/event/{GAMEWEEK}/picks/"), 500, json!({})).await;
    mock_json(server, &format!("/entry/3/event/{GAMEWEEK}/picks/"), 200, picks(4)).await;
}

fn tracker(server: &ServerGuard, kind: LeagueKind, favourite: Option<u64>) -> LeagueTracker {
    let api = FplApi::new().with_base_url(server.url());
    LeagueTracker::new(
        api,
        TrackerConfig { league_id: LEAGUE_ID, kind, favourite, concurrency: 2 },
    )
}

#[tokio::test]
async fn classic_league_ranks_live_points_and_isolates_failures() {
    let mut server = Server::new_async().await;
    mock_gameweek(&mut server).await;
    mock_json(
        &mut server,
        &format!("/leagues-classic/{LEAGUE_ID}/standings/"),
        200,
        standings(),
    )
    .await;

    let league = tracker(&server, LeagueKind::Classic, None)
        .refresh()
        .await
        .expect("league refresh");

    assert_eq!(league.name, "Office League");
    assert_eq!(league.gameweek, GAMEWEEK);
    assert_eq!(league.standings.len(), 3);
    assert_eq!(league.failures(), 1);

    let one = league.standing(1).expect("entry 1");
    let result = one.live.as_ref().expect("entry 1 computed");
    assert_eq!(result.starting_eleven.len(), 11);
    assert_eq!(result.bench.len(), 4);
    assert_eq!(result.replacement_for(4), Some(13));
    // Nine plain starters, doubled captain, bench defender.
    assert_eq!(one.live_points(), 9 * 4 + 8 + 4);
    assert!(one.entry.record.is_none());

    let two = league.standing(2).expect("entry 2");
    assert_eq!(two.live_points(), 0);
    assert!(two.failure.is_some());

    assert_eq!(league.standing(3).map(|s| s.live_points()), Some(44));

    assert_eq!(
        league.presentation,
        LeaguePresentation::Ranked(vec![
            RankedRow { live_rank: 1, entry: 1 },
            RankedRow { live_rank: 2, entry: 3 },
            RankedRow { live_rank: 3, entry: 2 },
        ])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn stalled_picks_time_out_into_a_failed_row() {
    let mut server = Server::new_async().await;
    mock_snapshot(&mut server).await;
    mock_json(&mut server, &format!("/entry/1/event/{GAMEWEEK}/picks/"), 200, picks(0)).await;
    mock_json(&mut server, &format!("/entry/2/event/{GAMEWEEK}/picks/"), 200, picks(4)).await;
    mock_stalled(
        &mut server,
        &format!("/entry/3/event/{GAMEWEEK}/picks/"),
        Duration::from_secs(2),
        picks(0),
    )
    .await;
    mock_json(
        &mut server,
        &format!("/leagues-classic/{LEAGUE_ID}/standings/"),
        200,
        standings(),
    )
    .await;

    let api = FplApi::new()
        .with_base_url(server.url())
        .with_timeout(Duration::from_millis(500));
    let league = LeagueTracker::new(
        api.clone(),
        TrackerConfig { league_id: LEAGUE_ID, kind: LeagueKind::Classic, favourite: None, concurrency: 2 },
    )
    .refresh()
    .await
    .expect("a slow team does not fail the league");

    assert_eq!(league.failures(), 1);
    assert_eq!(league.standing(1).map(|s| s.live_points()), Some(48));
    assert_eq!(league.standing(2).map(|s| s.live_points()), Some(44));

    let three = league.standing(3).expect("entry 3 keeps its row");
    assert_eq!(three.live_points(), 0);
    assert!(three.live.is_none());
    assert!(three.failure.is_some());
    assert_eq!(
        league.presentation,
        LeaguePresentation::Ranked(vec![
            RankedRow { live_rank: 1, entry: 1 },
            RankedRow { live_rank: 2, entry: 2 },
            RankedRow { live_rank: 3, entry: 3 },
        ])
    );

    let err = api.fetch_picks(3, GAMEWEEK).await.expect_err("deadline passes first");
    assert!(matches!(err, ApiError::Network(..)));
}

#[tokio::test]
async fn head_to_head_league_pairs_favourite_first() {
    let mut server = Server::new_async().await;
    mock_gameweek(&mut server).await;
    mock_json(
        &mut server,
        &format!("/leagues-h2h/{LEAGUE_ID}/standings/"),
        200,
        standings(),
    )
    .await;
    mock_json(
        &mut server,
        &format!("/leagues-h2h-matches/league/{LEAGUE_ID}/"),
        200,
        json!({"has_next": false, "results": [
            {"id": 1, "event": GAMEWEEK, "entry_1_entry": 1, "entry_2_entry": 3},
            {"id": 2, "event": GAMEWEEK, "entry_1_entry": 2, "entry_2_entry": null}
        ]}),
    )
    .await;

    let league = tracker(&server, LeagueKind::HeadToHead, Some(2))
        .refresh()
        .await
        .expect("league refresh");

    assert_eq!(
        league.presentation,
        LeaguePresentation::HeadToHead(vec![
            Pairing { left: 2, right: None },
            Pairing { left: 1, right: Some(3) },
        ])
    );
    assert_eq!(league.display_order(), vec![2, 1, 3]);
    let record = league.standing(1).and_then(|s| s.entry.record).expect("h2h record");
    assert_eq!(record.won, 3);
}

#[tokio::test]
async fn missing_bootstrap_fails_the_whole_refresh() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, "/bootstrap-static/", 503, json!({})).await;

    let err = tracker(&server, LeagueKind::Classic, None)
        .refresh()
        .await
        .expect_err("bootstrap is required");
    assert!(matches!(err, ApiError::Api(..)));
}

#[tokio::test]
async fn unknown_entry_is_not_found() {
    let mut server = Server::new_async().await;
    mock_json(&mut server, &format!("/entry/9/event/{GAMEWEEK}/picks/"), 404, json!({})).await;

    let api = FplApi::new().with_base_url(server.url());
    let err = api.fetch_picks(9, GAMEWEEK).await.expect_err("404");
    assert!(matches!(err, ApiError::NotFound(_)));
}
