use crate::state::messages::{NetworkRequest, NetworkResponse};
use fpl_api::client::ApiError;
use fpl_api::live::LeagueTracker;
use log::{debug, error, info};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAME: Duration = Duration::from_millis(33);

/// Poll indicator shown in the corner of the screen.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoadingState {
    #[default]
    Idle,
    Polling { frame: usize },
    /// The last poll failed; stays up until the next one starts.
    Failed,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Polling { .. })
    }

    pub fn glyph(&self) -> Option<char> {
        match self {
            LoadingState::Idle => None,
            LoadingState::Polling { frame } => Some(SPINNER_CHARS[frame % SPINNER_CHARS.len()]),
            LoadingState::Failed => Some('!'),
        }
    }
}

/// Runs league polls one at a time on behalf of the UI.
pub struct NetworkWorker {
    tracker: LeagueTracker,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        tracker: LeagueTracker,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self { tracker, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(first) = self.requests.recv().await {
            // A slow poll can let the refresher and the `r` key pile up requests.
            let mut request = first;
            while let Ok(next) = self.requests.try_recv() {
                request = request.merge(next);
            }

            let spinner = self.spawn_spinner();
            let result = self.poll(request).await;
            spinner.abort();
            // Wait for the abort so no stale frame lands after the final state.
            let _ = spinner.await;

            let loading_state = if result.is_ok() { LoadingState::Idle } else { LoadingState::Failed };
            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            let sent = match self.responses.send(NetworkResponse::LoadingStateChanged { loading_state }).await {
                Ok(()) => self.responses.send(response).await,
                Err(e) => Err(e),
            };
            if let Err(e) = sent {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn poll(&self, request: NetworkRequest) -> Result<NetworkResponse, ApiError> {
        debug!("{request:?} for league {}", self.tracker.config().league_id);
        let league = self.tracker.refresh().await?;
        Ok(match request {
            NetworkRequest::LoadLeague => {
                info!("{}: gameweek {}, {} teams", league.name, league.gameweek, league.standings.len());
                NetworkResponse::LeagueLoaded { league }
            }
            NetworkRequest::RefreshLeague => NetworkResponse::LeagueRefreshed { league },
        })
    }

    fn spawn_spinner(&self) -> JoinHandle<()> {
        let responses = self.responses.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SPINNER_FRAME);
            for frame in (0..SPINNER_CHARS.len()).cycle() {
                interval.tick().await;
                let loading_state = LoadingState::Polling { frame };
                if responses.send(NetworkResponse::LoadingStateChanged { loading_state }).await.is_err() {
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_glyph_wraps_and_failure_stays_visible() {
        assert_eq!(LoadingState::Idle.glyph(), None);
        assert_eq!(LoadingState::Polling { frame: 0 }.glyph(), Some('⠋'));
        assert_eq!(LoadingState::Polling { frame: 11 }.glyph(), Some('⠙'));
        assert_eq!(LoadingState::Failed.glyph(), Some('!'));
        assert!(LoadingState::Polling { frame: 3 }.is_loading());
        assert!(!LoadingState::Failed.is_loading());
    }
}
