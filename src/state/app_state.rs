use crate::app::MenuItem;
use fpl_api::EntryId;
use fpl_api::league::{LiveLeague, TeamStanding};

// ---------------------------------------------------------------------------
// League state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LeagueState {
    pub league: Option<LiveLeague>,
    /// Index into the league's display order.
    pub selected: usize,
}

impl LeagueState {
    /// First load of a league: selection goes to the favourite, or the top.
    pub fn load(&mut self, league: LiveLeague) {
        let order = league.display_order();
        self.selected = league
            .favourite
            .and_then(|fav| order.iter().position(|e| *e == fav))
            .unwrap_or(0);
        self.league = Some(league);
    }

    /// A later poll of the same league. Keeps the same team selected even
    /// when the live table has reordered.
    pub fn refresh(&mut self, league: LiveLeague) {
        let selected_entry = self.selected_entry();
        let order = league.display_order();
        self.selected = selected_entry
            .and_then(|entry| order.iter().position(|e| *e == entry))
            .unwrap_or(0)
            .min(order.len().saturating_sub(1));
        self.league = Some(league);
    }

    pub fn select_next(&mut self) {
        let max = self.row_count().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_entry(&self) -> Option<EntryId> {
        self.league.as_ref()?.display_order().get(self.selected).copied()
    }

    pub fn selected_standing(&self) -> Option<&TeamStanding> {
        let entry = self.selected_entry()?;
        self.league.as_ref()?.standing(entry)
    }

    fn row_count(&self) -> usize {
        self.league.as_ref().map(|l| l.display_order().len()).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Team detail state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamDetailState {
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Top-level app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub league: LeagueState,
    pub team_detail: TeamDetailState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
