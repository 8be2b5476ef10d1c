use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::League),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Team),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // League table / matches
        (MenuItem::League, Char('j') | KeyCode::Down, _) => guard.league_next_team(),
        (MenuItem::League, Char('k') | KeyCode::Up, _) => guard.league_prev_team(),
        (MenuItem::League, KeyCode::Enter, _) => guard.league_select_team(),

        // Team detail
        (MenuItem::Team, Char('j') | KeyCode::Down, _) => guard.team_scroll_down(),
        (MenuItem::Team, Char('k') | KeyCode::Up, _) => guard.team_scroll_up(),
        (MenuItem::Team, KeyCode::Esc, _) => guard.update_tab(MenuItem::League),

        // Global
        (_, Char('r'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::RefreshLeague).await;
        }
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
