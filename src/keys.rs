use crate::app::{App, MenuItem};
use crate::state::app_state::FetchSlice;
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
    let mut fetch: Option<FetchSlice> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => fetch = guard.update_tab(MenuItem::Teams),
        (_, Char('2'), _) => fetch = guard.update_tab(MenuItem::Schedule),
        (_, Char('3'), _) => fetch = guard.update_tab(MenuItem::PastSeasons),
        (_, Char('?'), _) => {
            guard.update_tab(MenuItem::Help);
        }
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),
        (MenuItem::Detail, KeyCode::Esc, _) => guard.close_detail(),

        // Week selector — current and past season schedule views
        (MenuItem::Schedule | MenuItem::PastSeasons, Char('l') | KeyCode::Right, _) => {
            fetch = guard.schedule_next_week();
        }
        (MenuItem::Schedule | MenuItem::PastSeasons, Char('h') | KeyCode::Left, _) => {
            fetch = guard.schedule_prev_week();
        }

        // Year selector — past seasons only; the Schedule tab stays pinned
        // to the current league year.
        (MenuItem::PastSeasons, Char(']'), _) => fetch = guard.schedule_next_year(),
        (MenuItem::PastSeasons, Char('['), _) => fetch = guard.schedule_prev_year(),

        // Schedule rows
        (MenuItem::Schedule | MenuItem::PastSeasons, Char('j') | KeyCode::Down, _) => {
            guard.schedule_row_down();
        }
        (MenuItem::Schedule | MenuItem::PastSeasons, Char('k') | KeyCode::Up, _) => {
            guard.schedule_row_up();
        }
        (MenuItem::Schedule | MenuItem::PastSeasons, Char('r'), _) => {
            fetch = Some(guard.schedule_refresh());
        }
        (MenuItem::Schedule | MenuItem::PastSeasons, KeyCode::Enter, _) => {
            if let Some(game_id) = guard.open_selected_game() {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadGameDetail { game_id })
                    .await;
                return;
            }
        }

        // Team ranking rows
        (MenuItem::Teams, Char('j') | KeyCode::Down, _) => guard.teams_row_down(),
        (MenuItem::Teams, Char('k') | KeyCode::Up, _) => guard.teams_row_up(),
        (MenuItem::Teams, KeyCode::Enter, _) => guard.open_selected_team(),
        (MenuItem::Teams, Char('r'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadTeams).await;
            return;
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(slice) = fetch {
        drop(guard);
        let _ = network_requests
            .send(NetworkRequest::LoadSchedule {
                year: slice.year,
                week: slice.week,
                token: slice.token,
            })
            .await;
    }
}
