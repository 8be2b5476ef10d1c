mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::{AppSettings, CliCommand, ENV_API_BASE, ENV_CONCURRENCY};
use crate::state::app_settings::{ENV_FAVOURITE_ENTRY, ENV_LEAGUE_ID, ENV_LEAGUE_KIND, ENV_LOG};
use crate::state::app_settings::ENV_TIMEOUT;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::refresher::PeriodicRefresher;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use fpl_api::client::FplApi;
use fpl_api::live::{LeagueTracker, TrackerConfig};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = match AppSettings::load() {
        Ok(CliCommand::Run(settings)) => settings,
        Ok(CliCommand::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(CliCommand::Version) => {
            println!("fpltui {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let tracker = LeagueTracker::new(
        FplApi::new()
            .with_base_url(settings.api_base.clone())
            .with_timeout(settings.request_timeout),
        TrackerConfig {
            league_id: settings.league_id,
            kind: settings.league_kind,
            favourite: settings.favourite,
            concurrency: settings.concurrency,
        },
    );
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(tracker, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Live points refresh thread (every 30s)
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone());
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Trigger league load on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();

    Ok(())
}

fn usage_text() -> String {
    format!(
        "fpltui - live Fantasy Premier League standings in the terminal

Usage:
  fpltui --league <id> [--h2h | --classic] [--favourite <entry id>]
  fpltui --help
  fpltui --version

Environment:
  {ENV_LEAGUE_ID}        League id (used when --league is not given)
  {ENV_LEAGUE_KIND}      h2h or classic (default classic)
  {ENV_FAVOURITE_ENTRY}  Entry id shown first and selected on load
  {ENV_API_BASE}         API base URL (default https://fantasy.premierleague.com/api)
  {ENV_CONCURRENCY}      Team requests in flight at once (default 4)
  {ENV_TIMEOUT}     Seconds before an upstream request is abandoned (default 10)
  {ENV_LOG}              Log level: error, warn, info, debug or trace"
    )
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading() {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let _ = network_requests.send(NetworkRequest::LoadLeague).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        NetworkResponse::LeagueLoaded { league } => {
            info!("loaded {} (gameweek {})", league.name, league.gameweek);
            app.lock().await.on_league_loaded(league);
        }
        NetworkResponse::LeagueRefreshed { league } => {
            app.lock().await.on_league_refreshed(league);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            app.lock().await.on_error(message);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        let Ok(event) = tokio::task::spawn_blocking(crossterm_event::read).await else {
            break;
        };
        let ui_event = match event {
            Ok(Event::Key(key_event)) => Some(UiEvent::KeyPressed(key_event)),
            Ok(Event::Resize(_, _)) => Some(UiEvent::Resize),
            _ => None,
        };

        if let Some(ui_event) = ui_event
            && ui_events.send(ui_event).await.is_err()
        {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    execute!(
        io::stdout(),
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All),
        cursor::Hide
    )?;
    terminal::enable_raw_mode()
}

/// Best effort: runs from the quit key and the panic hook, where there is
/// nobody left to report a failure to.
pub fn cleanup_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
