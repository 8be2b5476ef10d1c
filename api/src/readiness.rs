use crate::LiveStat;
use crate::fixtures::ClubFixture;

/// Minutes of slack before a starter with fewer minutes than the match clock
/// counts as subbed off. Absorbs stoppage-time drift in the live feed.
pub const SUBBED_OFF_SLACK_MINUTES: i32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Readiness {
    pub done: bool,
    pub didnt_play: bool,
    pub in_progress: bool,
    pub bonus_pending: bool,
}

/// Decide whether a player's gameweek is over and whether they featured at all.
///
/// Rules are evaluated in order and the first match wins:
///   1. fixture finished: done, didn't play iff no minutes
///   2. fixture provisionally finished: as above, bonus pending if they played
///   3. sent off: done (but did play)
///   4. started and subbed off: done
///   5. otherwise: still able to play
///
/// A club with no fixture record leaves every flag false.
pub fn classify(stat: &LiveStat, fixture: Option<&ClubFixture>) -> Readiness {
    let Some(fixture) = fixture else {
        return Readiness::default();
    };

    let status = fixture.status;
    let player_minutes = i32::from(stat.minutes);
    let game_minutes = i32::from(fixture.minutes);

    let mut readiness = Readiness {
        in_progress: status.started() && !status.finished_provisional(),
        ..Readiness::default()
    };

    if status.finished() {
        readiness.done = true;
        readiness.didnt_play = player_minutes == 0;
    } else if status.finished_provisional() {
        readiness.done = true;
        readiness.didnt_play = player_minutes == 0;
        readiness.bonus_pending = player_minutes > 0;
    } else if stat.red_cards > 0 {
        readiness.done = true;
    } else if player_minutes > 0
        && player_minutes < game_minutes - SUBBED_OFF_SLACK_MINUTES
        && stat.starts > 0
    {
        readiness.done = true;
    }

    readiness
}
