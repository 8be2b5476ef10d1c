use crate::{ClubId, Fixture};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum FixtureStatus {
    #[default]
    NotStarted,
    InProgress,
    /// Whistle blown, bonus points not yet final ("FT*").
    ProvisionalFinished,
    Finished,
}

impl FixtureStatus {
    /// Resolve by precedence so a record breaking
    /// finished => finished_provisional => started is still classified sensibly.
    pub fn resolve(fixture: &Fixture) -> Self {
        if fixture.finished {
            FixtureStatus::Finished
        } else if fixture.finished_provisional {
            FixtureStatus::ProvisionalFinished
        } else if fixture.started {
            FixtureStatus::InProgress
        } else {
            FixtureStatus::NotStarted
        }
    }

    pub fn started(&self) -> bool {
        *self != FixtureStatus::NotStarted
    }

    pub fn finished_provisional(&self) -> bool {
        *self >= FixtureStatus::ProvisionalFinished
    }

    pub fn finished(&self) -> bool {
        *self == FixtureStatus::Finished
    }
}

/// A club's view of its fixture this gameweek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClubFixture {
    pub fixture_id: u32,
    pub status: FixtureStatus,
    pub minutes: u16,
    pub opponent: ClubId,
    pub is_home: bool,
}

impl ClubFixture {
    pub fn status_label(&self) -> String {
        match self.status {
            FixtureStatus::Finished => "FT".to_string(),
            FixtureStatus::ProvisionalFinished => "FT*".to_string(),
            FixtureStatus::InProgress => format!("{}'", self.minutes),
            FixtureStatus::NotStarted => String::new(),
        }
    }
}

/// Per-club fixture lookup for one gameweek snapshot.
#[derive(Debug, Clone, Default)]
pub struct FixtureBoard {
    by_club: HashMap<ClubId, ClubFixture>,
}

impl FixtureBoard {
    /// Index every fixture under both of its clubs. A club with two fixtures in
    /// the gameweek keeps the later one in snapshot order.
    pub fn from_fixtures(fixtures: &[Fixture]) -> Self {
        let mut by_club = HashMap::with_capacity(fixtures.len() * 2);
        for fixture in fixtures {
            let status = FixtureStatus::resolve(fixture);
            let side = |opponent, is_home| ClubFixture {
                fixture_id: fixture.id,
                status,
                minutes: fixture.minutes,
                opponent,
                is_home,
            };
            by_club.insert(fixture.home, side(fixture.away, true));
            by_club.insert(fixture.away, side(fixture.home, false));
        }
        Self { by_club }
    }

    pub fn get(&self, club: ClubId) -> Option<&ClubFixture> {
        self.by_club.get(&club)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(id: u32, home: ClubId, away: ClubId) -> Fixture {
        Fixture { id, home, away, ..Default::default() }
    }

    #[test]
    fn status_follows_precedence() {
        let mut f = fixture(1, 1, 2);
        assert_eq!(FixtureStatus::resolve(&f), FixtureStatus::NotStarted);
        f.started = true;
        assert_eq!(FixtureStatus::resolve(&f), FixtureStatus::InProgress);
        f.finished_provisional = true;
        assert_eq!(FixtureStatus::resolve(&f), FixtureStatus::ProvisionalFinished);
        f.finished = true;
        assert_eq!(FixtureStatus::resolve(&f), FixtureStatus::Finished);
    }

    #[test]
    fn finished_flag_alone_implies_the_whole_chain() {
        let f = Fixture { finished: true, ..fixture(1, 1, 2) };
        let status = FixtureStatus::resolve(&f);
        assert!(status.started());
        assert!(status.finished_provisional());
        assert!(status.finished());
    }

    #[test]
    fn board_indexes_both_clubs() {
        let f = Fixture { started: true, minutes: 37, ..fixture(10, 3, 7) };
        let board = FixtureBoard::from_fixtures(&[f]);

        let home = board.get(3).expect("home club indexed");
        assert!(home.is_home);
        assert_eq!(home.opponent, 7);
        assert_eq!(home.minutes, 37);

        let away = board.get(7).expect("away club indexed");
        assert!(!away.is_home);
        assert_eq!(away.opponent, 3);
        assert!(board.get(99).is_none());
        assert_eq!(away.status, FixtureStatus::InProgress);
    }

    #[test]
    fn later_fixture_wins_for_a_double_gameweek() {
        let first = Fixture { finished: true, ..fixture(1, 3, 7) };
        let second = fixture(2, 9, 3);
        let board = FixtureBoard::from_fixtures(&[first, second]);
        assert_eq!(board.get(3).map(|f| f.fixture_id), Some(2));
    }

    #[test]
    fn status_labels() {
        let mut cf = ClubFixture { minutes: 63, ..Default::default() };
        assert_eq!(cf.status_label(), "");
        cf.status = FixtureStatus::InProgress;
        assert_eq!(cf.status_label(), "63'");
        cf.status = FixtureStatus::ProvisionalFinished;
        assert_eq!(cf.status_label(), "FT*");
        cf.status = FixtureStatus::Finished;
        assert_eq!(cf.status_label(), "FT");
    }
}
