use crate::components::squad::transfer_hit;
use fpl_api::EntryId;
use fpl_api::league::{LeaguePresentation, LiveLeague, Pairing, RankedRow, TeamStanding};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

const TEAM_WIDTH: usize = 22;
const MANAGER_WIDTH: usize = 16;

/// Live league table, or the gameweek's head-to-head matches.
pub struct LeagueView<'a> {
    pub league: &'a LiveLeague,
    pub selected: Option<EntryId>,
}

impl<'a> Widget for LeagueView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (lines, selected_line) = match &self.league.presentation {
            LeaguePresentation::Ranked(rows) => ranked_lines(self.league, rows, self.selected),
            LeaguePresentation::HeadToHead(pairings) => {
                match_lines(self.league, pairings, self.selected)
            }
        };

        // Keep the selected row on screen.
        let visible = area.height as usize;
        let offset = selected_line.map(|l| (l + 1).saturating_sub(visible)).unwrap_or(0);
        Paragraph::new(lines).scroll((offset as u16, 0)).render(area, buf);
    }
}

fn ranked_lines(
    league: &LiveLeague,
    rows: &[RankedRow],
    selected: Option<EntryId>,
) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines = vec![Line::styled(
        format!(
            "  {:>3}  {:<TEAM_WIDTH$} {:<MANAGER_WIDTH$} {:>10} {:>6}",
            "#", "Team", "Manager", "Live", "Total"
        ),
        Style::default().fg(Color::DarkGray),
    )];
    let mut selected_line = None;

    for row in rows {
        let Some(standing) = league.standing(row.entry) else {
            continue;
        };
        let is_selected = selected == Some(row.entry);
        if is_selected {
            selected_line = Some(lines.len());
        }
        let marker = if is_selected { '>' } else { ' ' };
        let entry = &standing.entry;

        let mut spans = vec![
            Span::raw(format!("{marker} {:>3}", row.live_rank)),
            Span::styled(
                movement(entry.rank, row.live_rank).to_string(),
                movement_style(entry.rank, row.live_rank),
            ),
            Span::raw(format!(
                " {:<TEAM_WIDTH$} {:<MANAGER_WIDTH$} ",
                clip(&entry.team_name, TEAM_WIDTH),
                clip(&entry.manager, MANAGER_WIDTH),
            )),
            points_span(standing, 10),
            Span::raw(format!(" {:>6}", entry.total)),
        ];
        if standing.failure.is_some() {
            spans.push(Span::styled("  ! unavailable", Style::default().fg(Color::Red)));
        }
        lines.push(row_line(spans, is_selected, league.favourite == Some(row.entry)));
    }
    (lines, selected_line)
}

fn match_lines(
    league: &LiveLeague,
    pairings: &[Pairing],
    selected: Option<EntryId>,
) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines = Vec::with_capacity(pairings.len() * 2);
    let mut selected_line = None;

    if pairings.is_empty() {
        lines.push(Line::styled(
            "No head-to-head matches for this gameweek",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for pairing in pairings {
        let Some(left) = league.standing(pairing.left) else {
            continue;
        };
        let right = pairing.right.and_then(|r| league.standing(r));
        let is_selected = selected.is_some_and(|s| s == pairing.left || Some(s) == pairing.right);
        if is_selected {
            selected_line = Some(lines.len());
        }

        let marker_for = |entry: EntryId| if selected == Some(entry) { '>' } else { ' ' };
        let mut spans = vec![
            Span::raw(format!(
                "{} {:>TEAM_WIDTH$} {}",
                marker_for(left.entry.entry),
                clip(&left.entry.team_name, TEAM_WIDTH),
                record(left)
            )),
            Span::raw(" "),
            points_span(left, 9),
            Span::styled("  v  ", Style::default().fg(Color::DarkGray)),
        ];
        match right {
            Some(right) => {
                spans.push(points_span_left(right, 9));
                spans.push(Span::raw(format!(
                    " {} {:<TEAM_WIDTH$} {}",
                    record(right),
                    clip(&right.entry.team_name, TEAM_WIDTH),
                    marker_for(right.entry.entry)
                )));
            }
            None => spans.push(Span::styled("BYE", Style::default().fg(Color::DarkGray))),
        }

        let favourite = league
            .favourite
            .is_some_and(|fav| fav == pairing.left || Some(fav) == pairing.right);
        lines.push(row_line(spans, is_selected, favourite));
    }
    (lines, selected_line)
}

fn row_line(spans: Vec<Span<'static>>, selected: bool, favourite: bool) -> Line<'static> {
    let line = Line::from(spans);
    match (selected, favourite) {
        (true, _) => line.patch_style(Style::default().add_modifier(Modifier::REVERSED)),
        (false, true) => line.patch_style(Style::default().add_modifier(Modifier::BOLD)),
        (false, false) => line,
    }
}

/// Live points right-aligned, with the transfer hit in front.
fn points_span(standing: &TeamStanding, width: usize) -> Span<'static> {
    let text = format!("{}{}", hit_prefix(standing), standing.live_points());
    Span::styled(format!("{text:>width$}"), points_style(standing))
}

/// Live points left-aligned, for the right-hand side of a match.
fn points_span_left(standing: &TeamStanding, width: usize) -> Span<'static> {
    let text = format!("{}{}", hit_prefix(standing), standing.live_points());
    Span::styled(format!("{text:<width$}"), points_style(standing))
}

fn hit_prefix(standing: &TeamStanding) -> String {
    let hit = transfer_hit(standing.transfer_cost());
    if hit.is_empty() { hit } else { format!("{hit} ") }
}

fn points_style(standing: &TeamStanding) -> Style {
    if standing.failure.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }
}

fn record(standing: &TeamStanding) -> String {
    standing
        .entry
        .record
        .map(|r| format!("{}-{}-{}", r.won, r.drawn, r.lost))
        .unwrap_or_default()
}

/// Arrow for a live rank that differs from the last settled rank.
pub fn movement(official_rank: u32, live_rank: u32) -> char {
    if official_rank == 0 || official_rank == live_rank {
        ' '
    } else if live_rank < official_rank {
        '▲'
    } else {
        '▼'
    }
}

fn movement_style(official_rank: u32, live_rank: u32) -> Style {
    match movement(official_rank, live_rank) {
        '▲' => Style::default().fg(Color::Green),
        '▼' => Style::default().fg(Color::Red),
        _ => Style::default(),
    }
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
