use nflpredict_api::TeamDetail;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

const NAME_W: usize = 26;
const RANK_W: usize = 9;

pub fn header_line() -> Line<'static> {
    let text = format!(
        "  {}{}{}{}{}{}",
        cell("Team", NAME_W),
        cell("Offence", RANK_W),
        cell("Defence", RANK_W),
        cell("Spec Tm", RANK_W),
        cell("Grade", RANK_W),
        "Bye",
    );
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn team_line(team: &TeamDetail, selected: bool) -> Line<'static> {
    let cursor = if selected { '>' } else { ' ' };
    let text = format!(
        "{cursor} {}{}{}{}{}{}",
        cell(&team.name, NAME_W),
        cell(&team.offence_ranking.to_string(), RANK_W),
        cell(&team.defence_ranking.to_string(), RANK_W),
        cell(&team.special_teams_ranking.to_string(), RANK_W),
        cell(&format!("{:.1}", team.grade), RANK_W),
        team.bye_week,
    );

    let style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(Span::styled(text, style))
}

fn cell(text: &str, width: usize) -> String {
    let mut s: String = text.chars().take(width.saturating_sub(1)).collect();
    while s.chars().count() < width {
        s.push(' ');
    }
    s
}
