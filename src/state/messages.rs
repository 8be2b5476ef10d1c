use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use fpl_api::league::LiveLeague;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRequest {
    LoadLeague,
    RefreshLeague,
}

impl NetworkRequest {
    /// Two queued requests collapse into one. A full load absorbs a refresh.
    pub fn merge(self, other: NetworkRequest) -> NetworkRequest {
        match (self, other) {
            (NetworkRequest::RefreshLeague, NetworkRequest::RefreshLeague) => {
                NetworkRequest::RefreshLeague
            }
            _ => NetworkRequest::LoadLeague,
        }
    }
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    LeagueLoaded { league: LiveLeague },
    /// Same league polled again; the view keeps its selection.
    LeagueRefreshed { league: LiveLeague },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
