use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nflpredict_api::{GameDetail, ScheduledGame, TeamDetail};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadTeams,
    /// Full (year, week) pair plus the request token minted by ScheduleState.
    LoadSchedule { year: i32, week: u32, token: u64 },
    LoadGameDetail { game_id: u32 },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    TeamsLoaded { teams: Vec<TeamDetail> },
    /// Echoes the request token so stale slices can be dropped.
    ScheduleLoaded { games: Vec<ScheduledGame>, token: u64 },
    GameDetailLoaded { detail: GameDetail },
    /// `schedule_token` is set when the failure came from a schedule
    /// fetch, so the failed slice can degrade to an empty table.
    Error { message: String, schedule_token: Option<u64> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Periodic nudge to re-request the currently selected schedule slice.
    RefreshTick,
}
