use crate::app::MenuItem;
use log::debug;
use nflpredict_api::{GameDetail, LeagueClock, ScheduledGame, TeamDetail, TimeSelections};

// ---------------------------------------------------------------------------
// Schedule state — selection filter + fetched slice
// ---------------------------------------------------------------------------

/// The full query parameters for one schedule fetch. Every selection change
/// produces exactly one of these, carrying a consistent (year, week) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSlice {
    pub year: i32,
    pub week: u32,
    pub token: u64,
}

/// Current (league year, week) selection and the games fetched for it.
///
/// Each issued fetch carries a monotonically increasing token; a response
/// is applied only when its token matches the latest issued one, so a slow
/// response for a superseded selection can never overwrite a newer slice.
#[derive(Debug)]
pub struct ScheduleState {
    pub league_year: i32,
    pub league_week: u32,
    pub games: Vec<ScheduledGame>,
    pub selected_row: usize,
    pub selections: TimeSelections,
    latest_token: u64,
}

impl ScheduleState {
    pub fn new(clock: LeagueClock) -> Self {
        Self {
            league_year: clock.year,
            league_week: clock.week,
            games: Vec::new(),
            selected_row: 0,
            selections: TimeSelections::through(clock.year),
            latest_token: 0,
        }
    }

    /// Pick a season. Changing season always restarts at week 1.
    pub fn select_year(&mut self, year: i32) -> FetchSlice {
        self.league_year = year;
        self.league_week = 1;
        self.begin_fetch()
    }

    /// Pick a week within the current season.
    pub fn select_week(&mut self, week: u32) -> FetchSlice {
        self.league_week = week;
        self.begin_fetch()
    }

    /// Re-request the current slice without changing the selection.
    pub fn refresh(&mut self) -> FetchSlice {
        self.begin_fetch()
    }

    /// Realign the selection with the injected league clock (used when the
    /// current-season tab is opened after browsing past seasons).
    pub fn reset_to(&mut self, clock: LeagueClock) -> Option<FetchSlice> {
        if self.league_year == clock.year && self.league_week == clock.week {
            return None;
        }
        self.league_year = clock.year;
        self.league_week = clock.week;
        Some(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> FetchSlice {
        self.latest_token += 1;
        FetchSlice {
            year: self.league_year,
            week: self.league_week,
            token: self.latest_token,
        }
    }

    /// Store a fetched slice. Returns false (and leaves state untouched)
    /// when the token is not the latest issued one.
    pub fn apply_loaded(&mut self, games: Vec<ScheduledGame>, token: u64) -> bool {
        if token != self.latest_token {
            debug!(
                "dropping stale schedule slice (token {token}, latest {})",
                self.latest_token
            );
            return false;
        }
        self.selected_row = self.selected_row.min(games.len().saturating_sub(1));
        self.games = games;
        true
    }

    /// Record a failed fetch. The failed slice degrades to an empty table;
    /// rows from the previous selection must not linger under the new
    /// selector values. Stale failures are ignored like stale successes.
    pub fn apply_failed(&mut self, token: u64) -> bool {
        if token != self.latest_token {
            debug!(
                "ignoring stale schedule failure (token {token}, latest {})",
                self.latest_token
            );
            return false;
        }
        self.games.clear();
        self.selected_row = 0;
        true
    }

    // Selector cycling — steps through the enumerated lists only, clamped
    // at the ends. Returns None when the selection did not change.

    pub fn next_week(&mut self) -> Option<FetchSlice> {
        let weeks = self.selections.league_weeks.clone();
        let idx = weeks.iter().position(|&w| w == self.league_week)?;
        let next = *weeks.get(idx + 1)?;
        Some(self.select_week(next))
    }

    pub fn prev_week(&mut self) -> Option<FetchSlice> {
        let weeks = self.selections.league_weeks.clone();
        let idx = weeks.iter().position(|&w| w == self.league_week)?;
        let prev = *weeks.get(idx.checked_sub(1)?)?;
        Some(self.select_week(prev))
    }

    pub fn next_year(&mut self) -> Option<FetchSlice> {
        let years = self.selections.league_years.clone();
        let idx = years.iter().position(|&y| y == self.league_year)?;
        let next = *years.get(idx + 1)?;
        Some(self.select_year(next))
    }

    pub fn prev_year(&mut self) -> Option<FetchSlice> {
        let years = self.selections.league_years.clone();
        let idx = years.iter().position(|&y| y == self.league_year)?;
        let prev = *years.get(idx.checked_sub(1)?)?;
        Some(self.select_year(prev))
    }

    // Row cursor.

    pub fn row_down(&mut self) {
        let max = self.games.len().saturating_sub(1);
        if self.selected_row < max {
            self.selected_row += 1;
        }
    }

    pub fn row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn selected_game(&self) -> Option<&ScheduledGame> {
        self.games.get(self.selected_row)
    }
}

// ---------------------------------------------------------------------------
// Team ranking state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamsState {
    pub teams: Vec<TeamDetail>,
    pub selected_row: usize,
}

impl TeamsState {
    pub fn load(&mut self, teams: Vec<TeamDetail>) {
        self.selected_row = self.selected_row.min(teams.len().saturating_sub(1));
        self.teams = teams;
    }

    pub fn row_down(&mut self) {
        let max = self.teams.len().saturating_sub(1);
        if self.selected_row < max {
            self.selected_row += 1;
        }
    }

    pub fn row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn selected_team(&self) -> Option<&TeamDetail> {
        self.teams.get(self.selected_row)
    }
}

// ---------------------------------------------------------------------------
// Detail state — matchup detail or a single team card
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum DetailContent {
    Game(GameDetail),
    Team(TeamDetail),
}

#[derive(Debug, Default)]
pub struct DetailState {
    pub content: Option<DetailContent>,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// "HH:MM:SS" of the last applied schedule slice, for the status line.
    pub last_refreshed: Option<String>,
    pub clock: LeagueClock,
    pub teams: TeamsState,
    pub schedule: ScheduleState,
    pub detail: DetailState,
}

impl AppState {
    pub fn new(clock: LeagueClock) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            last_refreshed: None,
            clock,
            teams: TeamsState::default(),
            schedule: ScheduleState::new(clock),
            detail: DetailState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ScheduleState {
        ScheduleState::new(LeagueClock { year: 2021, week: 8 })
    }

    fn game(id: u32) -> ScheduledGame {
        ScheduledGame { game_id: id, ..Default::default() }
    }

    #[test]
    fn select_year_resets_week_to_one() {
        let mut s = state();
        let slice = s.select_year(2020);
        assert_eq!((s.league_year, s.league_week), (2020, 1));
        assert_eq!((slice.year, slice.week), (2020, 1));
    }

    #[test]
    fn select_week_leaves_year_unchanged() {
        let mut s = state();
        let slice = s.select_week(5);
        assert_eq!((s.league_year, s.league_week), (2021, 5));
        assert_eq!((slice.year, slice.week), (2021, 5));
    }

    #[test]
    fn week_after_year_fetches_exactly_that_pair() {
        let mut s = state();
        s.select_year(2021);
        let slice = s.select_week(5);
        assert_eq!((slice.year, slice.week), (2021, 5));
    }

    #[test]
    fn each_selection_mints_a_fresh_token() {
        let mut s = state();
        let a = s.select_week(2);
        let b = s.select_week(3);
        assert!(b.token > a.token);
    }

    #[test]
    fn stale_token_is_not_applied() {
        let mut s = state();
        let stale = s.select_week(2);
        let latest = s.select_week(3);

        assert!(!s.apply_loaded(vec![game(1)], stale.token));
        assert!(s.games.is_empty(), "stale slice must not land");

        assert!(s.apply_loaded(vec![game(2)], latest.token));
        assert_eq!(s.games.len(), 1);
        assert_eq!(s.games[0].game_id, 2);
    }

    #[test]
    fn late_stale_response_cannot_overwrite_newer_slice() {
        let mut s = state();
        let first = s.select_week(2);
        let second = s.select_week(3);

        // Responses arrive out of order: newest first, then the stale one.
        assert!(s.apply_loaded(vec![game(3)], second.token));
        assert!(!s.apply_loaded(vec![game(2)], first.token));
        assert_eq!(s.games[0].game_id, 3);
    }

    #[test]
    fn failed_fetch_degrades_to_empty_table() {
        let mut s = state();
        let slice = s.refresh();
        assert!(s.apply_loaded(vec![game(1), game(2)], slice.token));
        s.row_down();

        let slice = s.select_week(9);
        assert!(s.apply_failed(slice.token));
        assert!(s.games.is_empty());
        assert_eq!(s.selected_row, 0);
    }

    #[test]
    fn stale_failure_does_not_clear_newer_slice() {
        let mut s = state();
        let stale = s.select_week(2);
        let latest = s.select_week(3);

        assert!(s.apply_loaded(vec![game(3)], latest.token));
        assert!(!s.apply_failed(stale.token));
        assert_eq!(s.games.len(), 1, "current slice survives a stale failure");
    }

    #[test]
    fn applying_shorter_slice_clamps_cursor() {
        let mut s = state();
        let slice = s.refresh();
        assert!(s.apply_loaded(vec![game(1), game(2), game(3)], slice.token));
        s.row_down();
        s.row_down();
        assert_eq!(s.selected_row, 2);

        let slice = s.refresh();
        assert!(s.apply_loaded(vec![game(9)], slice.token));
        assert_eq!(s.selected_row, 0);
    }

    #[test]
    fn week_cycling_clamps_at_list_ends() {
        let mut s = ScheduleState::new(LeagueClock { year: 2021, week: 1 });
        assert!(s.prev_week().is_none());
        assert_eq!(s.league_week, 1);

        let mut s = ScheduleState::new(LeagueClock {
            year: 2021,
            week: nflpredict_api::WEEKS_PER_SEASON,
        });
        assert!(s.next_week().is_none());
    }

    #[test]
    fn year_cycling_resets_week() {
        let mut s = state();
        let slice = s.prev_year().expect("2020 is selectable");
        assert_eq!((slice.year, slice.week), (2020, 1));
    }

    #[test]
    fn reset_to_clock_is_a_noop_when_already_current() {
        let clock = LeagueClock { year: 2021, week: 8 };
        let mut s = ScheduleState::new(clock);
        assert!(s.reset_to(clock).is_none());

        s.select_year(2019);
        let slice = s.reset_to(clock).expect("selection drifted, must refetch");
        assert_eq!((slice.year, slice.week), (2021, 8));
    }
}
