use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use nflpredict_api::client::{ApiError, PredictApi};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: PredictApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: PredictApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let schedule_token = match &request {
                NetworkRequest::LoadSchedule { token, .. } => Some(*token),
                _ => None,
            };

            let result = match request {
                NetworkRequest::LoadTeams => self.handle_load_teams().await,
                NetworkRequest::LoadSchedule { year, week, token } => {
                    self.handle_load_schedule(year, week, token).await
                }
                NetworkRequest::LoadGameDetail { game_id } => {
                    self.handle_load_game_detail(game_id).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
                schedule_token,
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_teams(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading team ranking table");
        let teams = self.client.fetch_team_details().await?;
        Ok(NetworkResponse::TeamsLoaded { teams })
    }

    async fn handle_load_schedule(
        &self,
        year: i32,
        week: u32,
        token: u64,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("loading schedule for year {year} week {week} (token {token})");
        let games = self.client.fetch_games_by_year_and_week(year, week).await?;
        Ok(NetworkResponse::ScheduleLoaded { games, token })
    }

    async fn handle_load_game_detail(&self, game_id: u32) -> Result<NetworkResponse, ApiError> {
        debug!("loading matchup detail for game {game_id}");
        let detail = self.client.fetch_game_detail(game_id).await?;
        Ok(NetworkResponse::GameDetailLoaded { detail })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
