use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use fpl_api::league::LiveLeague;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    League,
    Team,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_league_loaded(&mut self, league: LiveLeague) {
        self.state.last_error = None;
        self.state.league.load(league);
        self.state.team_detail.scroll_offset = 0;
    }

    pub fn on_league_refreshed(&mut self, league: LiveLeague) {
        self.state.last_error = None;
        self.state.league.refresh(league);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if self.state.active_tab == MenuItem::Team {
            self.state.team_detail.scroll_offset = 0;
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // League navigation, delegated to LeagueState
    // -----------------------------------------------------------------------

    pub fn league_next_team(&mut self) {
        self.state.league.select_next();
    }

    pub fn league_prev_team(&mut self) {
        self.state.league.select_prev();
    }

    /// Opens the Team tab on the selected entry, if there is one.
    pub fn league_select_team(&mut self) {
        if self.state.league.selected_entry().is_some() {
            self.update_tab(MenuItem::Team);
        }
    }

    pub fn team_scroll_down(&mut self) {
        self.state.team_detail.scroll_offset = self.state.team_detail.scroll_offset.saturating_add(1);
    }

    pub fn team_scroll_up(&mut self) {
        self.state.team_detail.scroll_offset = self.state.team_detail.scroll_offset.saturating_sub(1);
    }
}
