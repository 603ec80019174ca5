use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, DetailContent, FetchSlice};
use chrono::Local;
use nflpredict_api::{GameDetail, LeagueClock, ScheduledGame, TeamDetail};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Teams,
    Schedule,
    PastSeasons,
    Detail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self::with_clock(LeagueClock::from_env())
    }

    /// Clock is injected so tests can pin the season instead of depending
    /// on the wall calendar.
    pub fn with_clock(clock: LeagueClock) -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(clock),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_teams_loaded(&mut self, teams: Vec<TeamDetail>) {
        self.state.last_error = None;
        self.state.teams.load(teams);
    }

    /// Returns true when the slice carried the latest token and was applied.
    pub fn on_schedule_loaded(&mut self, games: Vec<ScheduledGame>, token: u64) -> bool {
        let applied = self.state.schedule.apply_loaded(games, token);
        if applied {
            self.state.last_error = None;
            self.state.last_refreshed = Some(Local::now().format("%H:%M:%S").to_string());
        }
        applied
    }

    pub fn on_game_detail_loaded(&mut self, detail: GameDetail) {
        self.state.last_error = None;
        self.state.detail.content = Some(DetailContent::Game(detail));
    }

    pub fn on_error(&mut self, message: String, schedule_token: Option<u64>) {
        match schedule_token {
            Some(token) => {
                // A superseded request's failure is as irrelevant as its
                // success would have been.
                if self.state.schedule.apply_failed(token) {
                    self.state.last_error = Some(message);
                }
            }
            None => self.state.last_error = Some(message),
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    /// Switch tabs. Opening the current-season Schedule tab realigns the
    /// selection with the league clock, which may require a refetch — the
    /// returned slice, if any, must be sent to the network worker.
    pub fn update_tab(&mut self, next: MenuItem) -> Option<FetchSlice> {
        if self.state.active_tab == next {
            return None;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if next == MenuItem::Schedule {
            return self.state.schedule.reset_to(self.state.clock);
        }
        None
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn close_detail(&mut self) {
        if self.state.active_tab == MenuItem::Detail {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Schedule selectors and cursor — delegated to ScheduleState
    // -----------------------------------------------------------------------

    pub fn schedule_next_week(&mut self) -> Option<FetchSlice> {
        self.state.schedule.next_week()
    }

    pub fn schedule_prev_week(&mut self) -> Option<FetchSlice> {
        self.state.schedule.prev_week()
    }

    pub fn schedule_next_year(&mut self) -> Option<FetchSlice> {
        self.state.schedule.next_year()
    }

    pub fn schedule_prev_year(&mut self) -> Option<FetchSlice> {
        self.state.schedule.prev_year()
    }

    pub fn schedule_refresh(&mut self) -> FetchSlice {
        self.state.schedule.refresh()
    }

    pub fn schedule_row_down(&mut self) {
        self.state.schedule.row_down();
    }

    pub fn schedule_row_up(&mut self) {
        self.state.schedule.row_up();
    }

    /// Returns the selected game's id if the user pressed Enter on a row.
    /// Switches to the Detail tab as a side-effect.
    pub fn open_selected_game(&mut self) -> Option<u32> {
        let game_id = self.state.schedule.selected_game().map(|g| g.game_id)?;
        self.update_tab(MenuItem::Detail);
        Some(game_id)
    }

    // -----------------------------------------------------------------------
    // Teams cursor
    // -----------------------------------------------------------------------

    pub fn teams_row_down(&mut self) {
        self.state.teams.row_down();
    }

    pub fn teams_row_up(&mut self) {
        self.state.teams.row_up();
    }

    /// The team card is already in the ranking table; no fetch needed.
    pub fn open_selected_team(&mut self) {
        let Some(team) = self.state.teams.selected_team().cloned() else {
            return;
        };
        self.state.detail.content = Some(DetailContent::Team(team));
        self.update_tab(MenuItem::Detail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nflpredict_api::TeamDetail;

    fn app() -> App {
        App::with_clock(LeagueClock { year: 2021, week: 8 })
    }

    fn game(id: u32) -> ScheduledGame {
        ScheduledGame { game_id: id, ..Default::default() }
    }

    #[test]
    fn schedule_tab_realigns_with_clock_after_browsing_past_seasons() {
        let mut app = app();
        app.update_tab(MenuItem::PastSeasons);
        app.state.schedule.select_year(2019);

        let slice = app
            .update_tab(MenuItem::Schedule)
            .expect("drifted selection must refetch");
        assert_eq!((slice.year, slice.week), (2021, 8));
    }

    #[test]
    fn schedule_tab_without_drift_does_not_refetch() {
        let mut app = app();
        assert!(app.update_tab(MenuItem::Schedule).is_none());
    }

    #[test]
    fn stale_schedule_response_does_not_touch_refreshed_stamp() {
        let mut app = app();
        let stale = app.schedule_refresh();
        let _latest = app.schedule_refresh();
        assert!(!app.on_schedule_loaded(vec![game(1)], stale.token));
        assert!(app.state.last_refreshed.is_none());
    }

    #[test]
    fn failed_fetch_empties_table_under_new_selection() {
        let mut app = app();
        app.update_tab(MenuItem::PastSeasons);
        let slice = app.schedule_refresh();
        app.on_schedule_loaded(vec![game(1)], slice.token);

        // Move to the next week; that fetch fails. The old week's rows
        // must not render under the new selector values.
        let slice = app.schedule_next_week().expect("week 9 is selectable");
        app.on_error("connection refused".into(), Some(slice.token));

        assert!(app.state.schedule.games.is_empty());
        assert_eq!(app.state.last_error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn team_fetch_error_leaves_schedule_rows_alone() {
        let mut app = app();
        let slice = app.schedule_refresh();
        app.on_schedule_loaded(vec![game(1)], slice.token);

        app.on_error("teams table down".into(), None);
        assert_eq!(app.state.schedule.games.len(), 1);
        assert_eq!(app.state.last_error.as_deref(), Some("teams table down"));
    }

    #[test]
    fn opening_a_game_row_switches_to_detail_tab() {
        let mut app = app();
        app.update_tab(MenuItem::PastSeasons);
        let slice = app.schedule_refresh();
        app.on_schedule_loaded(vec![game(42)], slice.token);

        assert_eq!(app.open_selected_game(), Some(42));
        assert_eq!(app.state.active_tab, MenuItem::Detail);
    }

    #[test]
    fn opening_a_team_row_needs_no_fetch() {
        let mut app = app();
        app.on_teams_loaded(vec![TeamDetail {
            team_id: 7,
            name: "Packers".into(),
            ..Default::default()
        }]);
        app.open_selected_team();
        assert_eq!(app.state.active_tab, MenuItem::Detail);
        assert!(matches!(
            app.state.detail.content,
            Some(DetailContent::Team(ref t)) if t.name == "Packers"
        ));
    }

    #[test]
    fn close_detail_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::PastSeasons);
        let slice = app.schedule_refresh();
        app.on_schedule_loaded(vec![game(1)], slice.token);
        app.open_selected_game();

        app.close_detail();
        assert_eq!(app.state.active_tab, MenuItem::PastSeasons);
    }
}
