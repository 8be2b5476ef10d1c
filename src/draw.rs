use chrono::Local;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::league::LeagueView;
use crate::components::squad::SquadView;
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;
use fpl_api::league::LeagueKind;

static TABS: &[&str; 2] = &["League", "Team"];

const HELP_TEXT: &str = "\
Keys
  1 / 2      League / Team tab
  j / k      move selection (League) or scroll (Team)
  Enter      open the selected team
  Esc        back to the league
  r          refresh live points now
  f          toggle full screen
  \"          toggle the log pane
  ?          this help
  q          quit

Team view
  ✓ done     ▶ playing     yellow: bonus not yet confirmed
  FT finished   FT* whistle blown, bonus pending   NN' minutes played
  ARS home opponent   ars away opponent
  G goal  A assist  Y yellow  R red  B bonus
  (C) captain  (V) vice   x2 / x3 captain multiplier
  Crossed out starters are replaced by the bench player marked (on)

League view
  (-4) transfer hit already taken off live points
  ▲ / ▼ live rank against the last settled rank
  Live points refresh every 30 seconds.";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::League => draw_league(f, layout.main, app),
            MenuItem::Team => draw_team(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::League => 0,
        MenuItem::Team => 1,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Team => 1,
            _ => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_league(f: &mut Frame, area: Rect, app: &App) {
    let Some(league) = app.state.league.league.as_ref() else {
        let block = default_border(Color::White).title(" League ");
        let inner = block.inner(area);
        f.render_widget(block, area);
        let msg = match app.state.last_error.as_deref() {
            Some(err) => format!("League load failed:\n{err}\n\nPress r to retry"),
            None => format!("Loading league {}...", app.settings.league_id),
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let title = match league.kind {
        LeagueKind::Classic => format!(" {} ", league.name),
        LeagueKind::HeadToHead => format!(" {} · Matches ", league.name),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(inner);

    let updated = league
        .updated_at
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut header_spans = vec![Span::raw(format!(
        "Gameweek {} | {} | {} teams | updated {updated}",
        league.gameweek,
        league.kind.label(),
        league.standings.len()
    ))];
    let failures = league.failures();
    if failures > 0 {
        header_spans.push(Span::styled(
            format!(" | {failures} unavailable"),
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(err) = app.state.last_error.as_deref() {
        header_spans.push(Span::styled(
            format!(" | refresh failed: {err}"),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(header_spans)), header);
    f.render_widget(
        Paragraph::new("Keys: j/k=move  Enter=team  r=refresh  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    f.render_widget(
        LeagueView { league, selected: app.state.league.selected_entry() },
        content,
    );
}

fn draw_team(f: &mut Frame, area: Rect, app: &App) {
    let Some(standing) = app.state.league.selected_standing() else {
        draw_placeholder(f, area, "Select a team in the League tab and press Enter");
        return;
    };

    let entry = &standing.entry;
    let title = if entry.manager.is_empty() {
        format!(" {} ", entry.team_name)
    } else {
        format!(" {} ({}) ", entry.team_name, entry.manager)
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match (&standing.live, &standing.failure) {
        (Some(result), _) => f.render_widget(
            SquadView { result, scroll_offset: app.state.team_detail.scroll_offset },
            inner,
        ),
        (None, Some(failure)) => f.render_widget(
            Paragraph::new(format!("Live points unavailable:\n{failure}"))
                .style(Style::default().fg(Color::Red)),
            inner,
        ),
        (None, None) => f.render_widget(Paragraph::new("No picks yet"), inner),
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(HELP_TEXT), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let Some(glyph) = loading.glyph() else {
        return;
    };
    let style = match loading {
        LoadingState::Failed => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(glyph.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
