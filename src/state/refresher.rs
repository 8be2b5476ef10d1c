use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Re-polls the league's live points while the app is open.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests }
    }

    pub async fn run(self) {
        let mut live_interval = interval(REFRESH_INTERVAL);
        // The first tick fires immediately; startup already sends LoadLeague.
        live_interval.tick().await;

        loop {
            live_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::RefreshLeague)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
