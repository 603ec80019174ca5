use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components;
use crate::state::app_state::DetailContent;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use nflpredict_api::{Outcome, TeamDetail};

static TABS: &[&str; 4] = &["Teams", "Schedule", "Past Seasons", "Detail"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Teams => draw_teams(f, layout.main, app),
                MenuItem::Schedule => draw_schedule(f, layout.main, app, false),
                MenuItem::PastSeasons => draw_schedule(f, layout.main, app, true),
                MenuItem::Detail => draw_detail(f, layout.main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    layout.main,
                    "Help: q=quit  1=Teams  2=Schedule  3=Past Seasons  h/l=week  [/]=year  j/k=row  Enter=detail  r=refresh  Esc=back",
                ),
            }

            if !app.settings.full_screen {
                draw_status(f, layout.status, app);
            }

            if app.state.show_logs {
                draw_logs(f, layout.main);
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
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
        MenuItem::Teams => 0,
        MenuItem::Schedule => 1,
        MenuItem::PastSeasons => 2,
        MenuItem::Detail => 3,
        MenuItem::Help => 0,
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

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Team Rankings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.teams.teams.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Team load failed:\n{err}")
        } else {
            "Loading team rankings...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [header, key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(inner);

    f.render_widget(Paragraph::new(components::teams::header_line()), header);
    f.render_widget(
        Paragraph::new("Keys: j/k=move  Enter=team card  r=reload  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let rows = content.height as usize;
    let selected = app.state.teams.selected_row;
    let start = visible_window_start(selected, app.state.teams.teams.len(), rows);

    let lines: Vec<Line> = app
        .state
        .teams
        .teams
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(idx, team)| components::teams::team_line(team, idx == selected))
        .collect();
    f.render_widget(Paragraph::new(lines), content);
}

fn draw_schedule(f: &mut Frame, area: Rect, app: &App, past: bool) {
    let title = if past { " Past Seasons " } else { " Schedule " };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let schedule = &app.state.schedule;
    let [selector, key_legend, header, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let selector_line = if past {
        Line::from(vec![
            Span::styled("League Year ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("‹{}›", schedule.league_year),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Week ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("‹{}›", schedule.league_week),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled(
                format!("{} Season", schedule.league_year),
                Style::default().fg(Color::Gray),
            ),
            Span::styled("   Week ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("‹{}›", schedule.league_week),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    };
    f.render_widget(Paragraph::new(selector_line), selector);

    let legend = if past {
        "Keys: h/l=week  [/]=year  j/k=move  Enter=game detail  r=refresh"
    } else {
        "Keys: h/l=week  j/k=move  Enter=game detail  r=refresh"
    };
    f.render_widget(
        Paragraph::new(legend).style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    if schedule.games.is_empty() {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Schedule load failed:\n{err}")
        } else {
            "Loading schedule...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    f.render_widget(Paragraph::new(components::schedule::header_line()), header);

    let rows = content.height as usize;
    let selected = schedule.selected_row;
    let start = visible_window_start(selected, schedule.games.len(), rows);

    let lines: Vec<Line> = schedule
        .games
        .iter()
        .enumerate()
        .skip(start)
        .take(rows)
        .map(|(idx, game)| components::schedule::game_line(game, idx == selected))
        .collect();
    f.render_widget(Paragraph::new(lines), content);
}

/// First visible row index, keeping the selected row inside the window.
fn visible_window_start(selected: usize, total: usize, rows: usize) -> usize {
    if rows == 0 || total <= rows {
        return 0;
    }
    let max_start = total - rows;
    selected.saturating_sub(rows / 2).min(max_start)
}

fn draw_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(content) = app.state.detail.content.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Load failed:\n{err}")
        } else {
            "Select a game or team and press Enter".to_string()
        };
        f.render_widget(Paragraph::new(msg), inner);
        return;
    };

    match content {
        DetailContent::Game(detail) => {
            let kickoff = detail.game.kickoff();
            let mut lines: Vec<Line> = Vec::new();
            lines.push(Line::from(Span::styled(
                format!("{} at {}", detail.game.away_team, detail.game.home_team),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "Kickoff: {} at {}",
                kickoff.short_date(),
                kickoff.clock_time()
            )));
            lines.push(Line::from(""));

            let predicted = detail.game.predicted_winner.as_deref().unwrap_or("--");
            lines.push(Line::from(format!("Predicted winner: {predicted}")));

            let outcome = detail.game.outcome();
            let verdict_style = match outcome {
                Outcome::Right => Style::default().fg(Color::Green),
                Outcome::Wrong => Style::default().fg(Color::Red),
                Outcome::Undetermined => Style::default().fg(Color::DarkGray),
            };
            let winner = detail.game.winning_team.as_deref().unwrap_or("--");
            lines.push(Line::from(vec![
                Span::raw(format!("Winner: {winner}  ")),
                Span::styled(format!("[prediction {}]", outcome.label()), verdict_style),
            ]));
            lines.push(Line::from(""));

            if let Some(away) = detail.away.as_ref() {
                lines.extend(team_card_lines(away));
                lines.push(Line::from(""));
            }
            if let Some(home) = detail.home.as_ref() {
                lines.extend(team_card_lines(home));
                lines.push(Line::from(""));
            }

            lines.push(Line::from(Span::styled(
                "Esc to go back",
                Style::default().fg(Color::DarkGray),
            )));
            f.render_widget(Paragraph::new(lines), inner);
        }
        DetailContent::Team(team) => {
            let mut lines = team_card_lines(team);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Esc to go back",
                Style::default().fg(Color::DarkGray),
            )));
            f.render_widget(Paragraph::new(lines), inner);
        }
    }
}

fn team_card_lines(team: &TeamDetail) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            team.name.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "  Offence #{}  Defence #{}  Special Teams #{}",
            team.offence_ranking, team.defence_ranking, team.special_teams_ranking
        )),
        Line::from(format!(
            "  Grade {:.1}  Bye week {}",
            team.grade, team.bye_week
        )),
    ]
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let line = if let Some(err) = app.state.last_error.as_deref() {
        Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        let refreshed = app
            .state
            .last_refreshed
            .as_deref()
            .map(|t| format!(" updated {t}"))
            .unwrap_or_default();
        Line::from(vec![
            Span::styled(refreshed, Style::default().fg(Color::DarkGray)),
            Span::styled(
                "   q=quit  ?=help  \"=logs",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Green))
        .style_debug(Style::default().fg(Color::Gray))
        .block(default_border(Color::DarkGray).title(" Logs "));
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
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_start_stays_at_zero_for_short_lists() {
        assert_eq!(visible_window_start(0, 5, 10), 0);
        assert_eq!(visible_window_start(4, 5, 10), 0);
    }

    #[test]
    fn window_start_tracks_selection_in_long_lists() {
        // 32 teams, 10 visible rows: selection near the end pins the window.
        assert_eq!(visible_window_start(31, 32, 10), 22);
        assert_eq!(visible_window_start(0, 32, 10), 0);
        assert_eq!(visible_window_start(16, 32, 10), 11);
    }
}
