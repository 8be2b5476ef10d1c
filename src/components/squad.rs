use fpl_api::{EnrichedPlayer, LiveStat, TeamLiveResult};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

/// Name column width, badge included.
const NAME_WIDTH: usize = 18;

/// One team's squad: starting XI, bench and the substitutions between them.
pub struct SquadView<'a> {
    pub result: &'a TeamLiveResult,
    pub scroll_offset: u16,
}

impl<'a> Widget for SquadView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let lines = squad_lines(self.result);
        let max_scroll = (lines.len() as u16).saturating_sub(area.height);
        Paragraph::new(lines)
            .scroll((self.scroll_offset.min(max_scroll), 0))
            .render(area, buf);
    }
}

fn squad_lines(result: &TeamLiveResult) -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let mut lines = Vec::with_capacity(result.starting_eleven.len() + result.bench.len() + 8);

    lines.push(Line::styled("Starting XI", heading));
    for player in &result.starting_eleven {
        let mut line = player_line(player);
        if let Some(bench_slot) = result.replacement_for(player.slot) {
            let incoming = result
                .bench
                .iter()
                .find(|b| b.slot == bench_slot)
                .map(|b| b.name.as_str())
                .unwrap_or("?");
            line = line.patch_style(Style::default().add_modifier(Modifier::CROSSED_OUT));
            line.push_span(Span::styled(
                format!("  -> {incoming}"),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(line);
    }

    lines.push(Line::default());
    lines.push(Line::styled("Bench", heading));
    for player in &result.bench {
        let mut line = player_line(player);
        if result.is_activated(player.slot) {
            line = line.patch_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
            line.push_span(Span::styled("  (on)", Style::default().fg(Color::Green)));
        } else {
            line = line.patch_style(Style::default().add_modifier(Modifier::DIM));
        }
        lines.push(line);
    }

    lines.push(Line::default());
    let mut summary = vec![Span::raw(format!(
        "Live {}  Official {}  Done {}/{}",
        result.live_points,
        result.official_points,
        result.players_done(),
        result.starting_eleven.len()
    ))];
    if result.transfer_cost > 0 {
        summary.push(Span::styled(
            format!("  Hit {}", transfer_hit(result.transfer_cost)),
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(chip) = result.active_chip.as_deref() {
        summary.push(Span::styled(format!("  Chip {chip}"), Style::default().fg(Color::Magenta)));
    }
    lines.push(Line::from(summary));

    if !result.substitutions.is_empty() {
        let subs: Vec<String> = result
            .substitutions
            .iter()
            .map(|s| format!("{}->{}", s.bench_slot, s.replaces_slot))
            .collect();
        lines.push(Line::styled(
            format!("Auto-subs {}", subs.join("  ")),
            Style::default().fg(Color::Green),
        ));
    }
    lines
}

fn player_line(player: &EnrichedPlayer) -> Line<'static> {
    let name: String = format!("{}{}", player.name, player.captaincy_badge())
        .chars()
        .take(NAME_WIDTH)
        .collect();
    let base = player_style(player);

    Line::from(vec![
        Span::styled(format!("{:>2} ", player.slot), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{} ", player.position.short_name()), base),
        Span::styled(format!("{name:<NAME_WIDTH$} "), base),
        Span::styled(format!("{:<4}{:<4}", player.opponent, player.fixture_label()), base),
        Span::styled(format!("{:<8}", event_badges(&player.stat)), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{:>4}{:<3}", player.points, multiplier_hint(player)), base),
        Span::styled(status_icon(player).to_string(), base),
    ])
}

fn player_style(player: &EnrichedPlayer) -> Style {
    if player.bonus_pending {
        Style::default().fg(Color::Yellow)
    } else if player.in_progress {
        Style::default().fg(Color::Cyan)
    } else if player.done {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Goals, assists, yellows, reds, then bonus, one letter per occurrence.
pub fn event_badges(stat: &LiveStat) -> String {
    let mut out = String::new();
    out.push_str(&"G".repeat(stat.goals.into()));
    out.push_str(&"A".repeat(stat.assists.into()));
    out.push_str(&"Y".repeat(stat.yellow_cards.into()));
    out.push_str(&"R".repeat(stat.red_cards.into()));
    if stat.bonus > 0 {
        out.push_str(&format!("B{}", stat.bonus));
    }
    out
}

pub fn status_icon(player: &EnrichedPlayer) -> &'static str {
    if player.done {
        "✓"
    } else if player.in_progress {
        "▶"
    } else {
        ""
    }
}

/// Starters' points already include the multiplier; this only marks it.
pub fn multiplier_hint(player: &EnrichedPlayer) -> String {
    if player.is_starter() && player.multiplier > 1 {
        format!(" x{}", player.multiplier)
    } else {
        String::new()
    }
}

pub fn transfer_hit(cost: i32) -> String {
    if cost > 0 { format!("(-{cost})") } else { String::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_api::{FixtureStatus, Position, Substitution};

    #[test]
    fn badges_repeat_per_event() {
        let stat = LiveStat { goals: 2, assists: 1, yellow_cards: 1, bonus: 3, ..Default::default() };
        assert_eq!(event_badges(&stat), "GGAYB3");
        assert_eq!(event_badges(&LiveStat::default()), "");
        let sent_off = LiveStat { red_cards: 1, ..Default::default() };
        assert_eq!(event_badges(&sent_off), "R");
    }

    #[test]
    fn captain_multiplier_hint_is_starters_only() {
        let captain = EnrichedPlayer { slot: 9, multiplier: 3, is_captain: true, ..Default::default() };
        assert_eq!(multiplier_hint(&captain), " x3");
        assert_eq!(captain.captaincy_badge(), " (C)");
        let bench = EnrichedPlayer { slot: 13, multiplier: 2, ..Default::default() };
        assert_eq!(multiplier_hint(&bench), "");
    }

    #[test]
    fn transfer_hit_only_when_charged() {
        assert_eq!(transfer_hit(8), "(-8)");
        assert_eq!(transfer_hit(0), "");
    }

    #[test]
    fn status_icon_prefers_done() {
        let done = EnrichedPlayer { done: true, in_progress: true, ..Default::default() };
        assert_eq!(status_icon(&done), "✓");
        let live = EnrichedPlayer { in_progress: true, ..Default::default() };
        assert_eq!(status_icon(&live), "▶");
        assert_eq!(status_icon(&EnrichedPlayer::default()), "");
    }

    #[test]
    fn squad_lists_substitution_and_hit() {
        let starter = EnrichedPlayer {
            slot: 4,
            name: "Absent".into(),
            position: Position::Defender,
            done: true,
            didnt_play: true,
            ..Default::default()
        };
        let bench = EnrichedPlayer {
            slot: 13,
            name: "Understudy".into(),
            position: Position::Defender,
            points: 2,
            fixture: Some(fpl_api::ClubFixture { status: FixtureStatus::Finished, ..Default::default() }),
            ..Default::default()
        };
        let result = TeamLiveResult {
            starting_eleven: vec![starter],
            bench: vec![bench],
            substitutions: vec![Substitution { bench_slot: 13, replaces_slot: 4 }],
            live_points: -2,
            transfer_cost: 4,
            ..Default::default()
        };
        let text: Vec<String> = squad_lines(&result)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|l| l.contains("Absent") && l.contains("-> Understudy")));
        assert!(text.iter().any(|l| l.contains("Understudy") && l.contains("FT") && l.contains("(on)")));
        assert!(text.iter().any(|l| l.contains("Hit (-4)")));
        assert!(text.iter().any(|l| l == "Auto-subs 13->4"));
    }
}
