use nflpredict_api::{Outcome, ScheduledGame};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

// Column widths for the schedule table. Team-name columns fit the longest
// franchise name ("Washington Football Team" clips, everything else fits).
const TEAM_W: usize = 16;
const WINNER_W: usize = 18; // name + verdict marker
const DATE_W: usize = 8;

/// Visual marker for a prediction verdict. Presentation only — derived
/// from the classification, never fed back into it.
pub fn outcome_marker(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Right => "✓",
        Outcome::Wrong => "✗",
        Outcome::Undetermined => " ",
    }
}

/// Row styling for a prediction verdict: green for a correct call, red for
/// a miss, unstyled while the game is still undetermined.
pub fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Right => Style::default().fg(Color::Black).bg(Color::Green),
        Outcome::Wrong => Style::default().fg(Color::White).bg(Color::Red),
        Outcome::Undetermined => Style::default().fg(Color::White),
    }
}

pub fn header_line() -> Line<'static> {
    let text = format!(
        "  {}{}{}{}{}{}",
        cell("Away Team", TEAM_W),
        cell("Home Team", TEAM_W),
        cell("Predicted", TEAM_W),
        cell("Winner", WINNER_W),
        cell("Date", DATE_W),
        "Time (CST)",
    );
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED),
    ))
}

/// One schedule row: teams, prediction, verdict-marked winner, kickoff.
pub fn game_line(game: &ScheduledGame, selected: bool) -> Line<'static> {
    let kickoff = game.kickoff();
    let outcome = game.outcome();

    let predicted = game.predicted_winner.as_deref().unwrap_or("--");
    let winner = match game.winning_team.as_deref() {
        Some(name) => format!("{name} {}", outcome_marker(outcome)),
        None => "--".to_string(),
    };

    let cursor = if selected { '>' } else { ' ' };
    let text = format!(
        "{cursor} {}{}{}{}{}{}",
        cell(&game.away_team, TEAM_W),
        cell(&game.home_team, TEAM_W),
        cell(predicted, TEAM_W),
        cell(&winner, WINNER_W),
        cell(&kickoff.short_date(), DATE_W),
        kickoff.clock_time(),
    );

    let mut style = outcome_style(outcome);
    if selected {
        style = style.add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(text, style))
}

/// Clip to the column width minus one separator space, then pad back out.
fn cell(text: &str, width: usize) -> String {
    let mut s: String = text.chars().take(width.saturating_sub(1)).collect();
    while s.chars().count() < width {
        s.push(' ');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(predicted: Option<&str>, winner: Option<&str>) -> ScheduledGame {
        ScheduledGame {
            game_id: 1,
            away_team: "Packers".into(),
            home_team: "Bears".into(),
            predicted_winner: predicted.map(str::to_owned),
            winning_team: winner.map(str::to_owned),
            date: "2020-09-13".into(),
            time: "13:00:00".into(),
        }
    }

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn markers_map_one_to_one() {
        assert_eq!(outcome_marker(Outcome::Right), "✓");
        assert_eq!(outcome_marker(Outcome::Wrong), "✗");
        assert_eq!(outcome_marker(Outcome::Undetermined), " ");
    }

    #[test]
    fn correct_call_gets_check_and_green_background() {
        let line = game_line(&game(Some("Packers"), Some("Packers")), false);
        let text = text_of(&line);
        assert!(text.contains("✓"));
        assert_eq!(line.spans[0].style.bg, Some(Color::Green));
    }

    #[test]
    fn missed_call_gets_cross_and_red_background() {
        let line = game_line(&game(Some("Packers"), Some("Bears")), false);
        let text = text_of(&line);
        assert!(text.contains("✗"));
        assert_eq!(line.spans[0].style.bg, Some(Color::Red));
    }

    #[test]
    fn undecided_game_stays_neutral() {
        let line = game_line(&game(Some("Packers"), None), false);
        let text = text_of(&line);
        assert!(!text.contains('✓') && !text.contains('✗'));
        assert!(text.contains("--"), "absent winner shows a placeholder");
        assert_eq!(line.spans[0].style.bg, None);
    }

    #[test]
    fn kickoff_columns_use_display_formats() {
        let text = text_of(&game_line(&game(None, None), false));
        assert!(text.contains("Sep 13"));
        assert!(text.contains("1:00 PM"));
    }

    #[test]
    fn selected_row_is_marked_and_bold() {
        let line = game_line(&game(None, None), true);
        assert!(text_of(&line).starts_with('>'));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn long_team_names_clip_to_column() {
        let mut g = game(None, None);
        g.away_team = "Washington Football Team".into();
        let text = text_of(&game_line(&g, false));
        assert!(text.contains("Washington Foot"));
        assert!(!text.contains("Washington Football"));
    }
}
