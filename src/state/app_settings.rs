use fpl_api::client::{DEFAULT_TIMEOUT, FPL_API_BASE};
use fpl_api::league::LeagueKind;
use fpl_api::live::DEFAULT_CONCURRENCY;
use fpl_api::EntryId;
use log::LevelFilter;
use std::time::Duration;

pub const ENV_LEAGUE_ID: &str = "FPLTUI_LEAGUE_ID";
pub const ENV_LEAGUE_KIND: &str = "FPLTUI_LEAGUE_KIND";
pub const ENV_FAVOURITE_ENTRY: &str = "FPLTUI_FAVOURITE_ENTRY";
pub const ENV_API_BASE: &str = "FPLTUI_API_BASE";
pub const ENV_CONCURRENCY: &str = "FPLTUI_CONCURRENCY";
pub const ENV_TIMEOUT: &str = "FPLTUI_TIMEOUT_SECS";
pub const ENV_LOG: &str = "FPLTUI_LOG";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub league_id: u64,
    pub league_kind: LeagueKind,
    pub favourite: Option<EntryId>,
    pub api_base: String,
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            league_id: 0,
            league_kind: LeagueKind::default(),
            favourite: None,
            api_base: FPL_API_BASE.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone)]
pub enum CliCommand {
    Run(AppSettings),
    Help,
    Version,
}

impl AppSettings {
    /// Command line over environment over defaults.
    pub fn load() -> Result<CliCommand, String> {
        Self::resolve(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    fn resolve<I, F>(args: I, env: F) -> Result<CliCommand, String>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = AppSettings::default();
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = env(ENV_LEAGUE_ID) {
            settings.league_id = parse_id(&id, ENV_LEAGUE_ID)?;
        }
        if let Some(kind) = env(ENV_LEAGUE_KIND) {
            settings.league_kind = LeagueKind::parse(&kind)
                .ok_or_else(|| format!("{ENV_LEAGUE_KIND}: expected h2h or classic, got {kind}"))?;
        }
        if let Some(entry) = env(ENV_FAVOURITE_ENTRY) {
            settings.favourite = Some(parse_id(&entry, ENV_FAVOURITE_ENTRY)?);
        }
        if let Some(base) = env(ENV_API_BASE) {
            settings.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(n) = env(ENV_CONCURRENCY) {
            settings.concurrency = n
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("{ENV_CONCURRENCY}: expected a positive number, got {n}"))?;
        }
        if let Some(secs) = env(ENV_TIMEOUT) {
            settings.request_timeout = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| format!("{ENV_TIMEOUT}: expected a positive number of seconds, got {secs}"))?;
        }
        if let Some(level) = env(ENV_LOG) {
            settings.log_level = Some(
                level
                    .trim()
                    .parse::<LevelFilter>()
                    .map_err(|_| format!("{ENV_LOG}: unknown log level {level}"))?,
            );
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(CliCommand::Help),
                "-V" | "--version" => return Ok(CliCommand::Version),
                "-l" | "--league" => {
                    let value = args.next().ok_or("--league needs a league id")?;
                    settings.league_id = parse_id(&value, "--league")?;
                }
                "--favourite" | "--favorite" => {
                    let value = args.next().ok_or("--favourite needs an entry id")?;
                    settings.favourite = Some(parse_id(&value, "--favourite")?);
                }
                "--h2h" => settings.league_kind = LeagueKind::HeadToHead,
                "--classic" => settings.league_kind = LeagueKind::Classic,
                _ => return Err(format!("Unknown argument: {arg}")),
            }
        }

        if settings.league_id == 0 {
            return Err(format!("No league given: pass --league <id> or set {ENV_LEAGUE_ID}"));
        }
        Ok(CliCommand::Run(settings))
    }
}

fn parse_id(value: &str, source: &str) -> Result<u64, String> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("{source}: expected a numeric id, got {value}"))
}
