use crate::graphql::{
    GAME_BY_ID_QUERY, GAME_SCHEDULE_BY_YEAR_QUERY, GameRow, GameScheduleData, GraphqlRequest,
    GraphqlResponse, TEAM_DETAILS_QUERY, TEAMS_BY_NAME_QUERY, TeamDetailsData, TeamRow,
};
use crate::{GameDetail, ScheduledGame, TeamDetail};
use reqwest::Client;
use serde_json::json;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_GRAPHQL_URL: &str = "https://nfl-game-prediction.herokuapp.com/v1/graphql";

/// Client for the NFL game prediction service's GraphQL endpoint.
///
/// The endpoint is a Hasura instance; every operation is a POST of
/// `{query, variables}` to the same URL. Override the URL with the
/// NFLBOARD_GRAPHQL_URL env var.
#[derive(Debug, Clone)]
pub struct PredictApi {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl Default for PredictApi {
    fn default() -> Self {
        let endpoint = std::env::var("NFLBOARD_GRAPHQL_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_owned());
        Self::with_endpoint(endpoint)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    /// GraphQL-level errors reported inside a 200 response.
    Query(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Query(msg) => write!(f, "Query error: {msg}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl PredictApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("nflboard/0.1 (terminal schedule viewer)")
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch the schedule slice for one (league year, week) pair.
    pub async fn fetch_games_by_year_and_week(
        &self,
        league_year: i32,
        league_week: u32,
    ) -> ApiResult<Vec<ScheduledGame>> {
        let variables = json!({ "leagueYear": league_year, "leagueWeek": league_week });
        let data: GameScheduleData = self.post(GAME_SCHEDULE_BY_YEAR_QUERY, variables).await?;
        Ok(data
            .game_schedule
            .unwrap_or_default()
            .into_iter()
            .map(map_game_row)
            .collect())
    }

    /// Fetch the season-long team ranking table.
    pub async fn fetch_team_details(&self) -> ApiResult<Vec<TeamDetail>> {
        let data: TeamDetailsData = self.post(TEAM_DETAILS_QUERY, json!({})).await?;
        Ok(data
            .team_details
            .unwrap_or_default()
            .into_iter()
            .map(map_team_row)
            .collect())
    }

    /// Fetch one game plus both participants' team cards.
    pub async fn fetch_game_detail(&self, game_id: u32) -> ApiResult<GameDetail> {
        let variables = json!({ "gameId": game_id });
        let data: GameScheduleData = self.post(GAME_BY_ID_QUERY, variables).await?;
        let game = data
            .game_schedule
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(map_game_row)
            .ok_or_else(|| ApiError::NotFound(format!("no game with id {game_id}")))?;

        let variables = json!({ "names": [&game.away_team, &game.home_team] });
        let data: TeamDetailsData = self.post(TEAMS_BY_NAME_QUERY, variables).await?;
        let teams: Vec<TeamDetail> = data
            .team_details
            .unwrap_or_default()
            .into_iter()
            .map(map_team_row)
            .collect();

        let away = teams.iter().find(|t| t.name == game.away_team).cloned();
        let home = teams.iter().find(|t| t.name == game.home_team).cloned();
        Ok(GameDetail { game, away, home })
    }

    async fn post<T: Default + serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> ApiResult<T> {
        let body = GraphqlRequest { query, variables };
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, self.endpoint.clone()))?;

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, self.endpoint.clone()))?;

        let envelope: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, self.endpoint.clone()))?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            let joined = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::Query(joined));
        }

        Ok(envelope.data.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Mapping: GraphQL rows → clean domain types
// ---------------------------------------------------------------------------

fn map_game_row(row: GameRow) -> ScheduledGame {
    ScheduledGame {
        game_id: row.game_id,
        away_team: row.team_1_name,
        home_team: row.team_2_name,
        predicted_winner: row.predicted_winner,
        winning_team: row.winning_team,
        date: row.date,
        time: row.time,
    }
}

fn map_team_row(row: TeamRow) -> TeamDetail {
    TeamDetail {
        team_id: row.team_id,
        name: row.name,
        offence_ranking: row.offence_ranking.unwrap_or_default(),
        defence_ranking: row.defence_ranking.unwrap_or_default(),
        special_teams_ranking: row.special_teams_ranking.unwrap_or_default(),
        grade: row.grade.unwrap_or_default(),
        bye_week: row.bye_week.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    fn schedule_body() -> &'static str {
        r#"{
            "data": {
                "game_schedule": [
                    {
                        "game_id": 101,
                        "team_1_name": "Packers",
                        "team_2_name": "Bears",
                        "predicted_winner": "Packers",
                        "winning_team": "Packers",
                        "date": "2020-09-13",
                        "time": "13:00:00"
                    },
                    {
                        "game_id": 102,
                        "team_1_name": "Vikings",
                        "team_2_name": "Lions",
                        "predicted_winner": null,
                        "winning_team": "Lions",
                        "date": "2020-09-13",
                        "time": "15:25:00"
                    }
                ]
            }
        }"#
    }

    #[tokio::test]
    async fn schedule_rows_map_to_domain_games() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(schedule_body())
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let games = api.fetch_games_by_year_and_week(2020, 1).await.unwrap();
        mock.assert_async().await;

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].away_team, "Packers");
        assert_eq!(games[0].home_team, "Bears");
        assert_eq!(games[0].outcome(), Outcome::Right);
        // Null prediction with a recorded winner is undetermined, not wrong.
        assert!(games[1].predicted_winner.is_none());
        assert_eq!(games[1].outcome(), Outcome::Undetermined);
    }

    #[tokio::test]
    async fn schedule_request_carries_year_and_week_variables() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "variables": { "leagueYear": 2021, "leagueWeek": 5 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"game_schedule": []}}"#)
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let games = api.fetch_games_by_year_and_week(2021, 5).await.unwrap();
        mock.assert_async().await;
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn missing_data_key_degrades_to_empty_schedule() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": null}"#)
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let games = api.fetch_games_by_year_and_week(2020, 1).await.unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn graphql_errors_surface_as_query_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors": [{"message": "field 'game_schedule' not found"}]}"#)
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let err = api.fetch_games_by_year_and_week(2020, 1).await.unwrap_err();
        match err {
            ApiError::Query(msg) => assert!(msg.contains("game_schedule")),
            other => panic!("expected Query error, got {other}"),
        }
    }

    #[tokio::test]
    async fn http_error_status_surfaces_as_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let err = api.fetch_team_details().await.unwrap_err();
        assert!(matches!(err, ApiError::Api(_, _)));
    }

    #[tokio::test]
    async fn team_rows_map_with_nullable_fields_defaulted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "data": {
                        "team_details": [
                            {
                                "team_id": 7,
                                "name": "Packers",
                                "offence_ranking": 3,
                                "defence_ranking": 12,
                                "special_teams_ranking": 8,
                                "grade": 88.5,
                                "bye_week": 5
                            },
                            {
                                "team_id": 8,
                                "name": "Bears",
                                "offence_ranking": null,
                                "defence_ranking": null,
                                "special_teams_ranking": null,
                                "grade": null,
                                "bye_week": null
                            }
                        ]
                    }
                }"#,
            )
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let teams = api.fetch_team_details().await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Packers");
        assert_eq!(teams[0].offence_ranking, 3);
        assert_eq!(teams[1].grade, 0.0);
    }

    #[tokio::test]
    async fn game_detail_pairs_game_with_team_cards() {
        let mut server = mockito::Server::new_async().await;
        // First POST resolves the game, second resolves the two team cards.
        let _game = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "variables": { "gameId": 101 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": {"game_schedule": [{
                    "game_id": 101,
                    "team_1_name": "Packers",
                    "team_2_name": "Bears",
                    "predicted_winner": "Packers",
                    "winning_team": null,
                    "date": "2020-09-13",
                    "time": "13:00:00"
                }]}}"#,
            )
            .create_async()
            .await;
        let _teams = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "variables": { "names": ["Packers", "Bears"] }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": {"team_details": [
                    {"team_id": 7, "name": "Packers", "offence_ranking": 3,
                     "defence_ranking": 12, "special_teams_ranking": 8,
                     "grade": 88.5, "bye_week": 5}
                ]}}"#,
            )
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let detail = api.fetch_game_detail(101).await.unwrap();
        assert_eq!(detail.game.game_id, 101);
        assert_eq!(detail.away.as_ref().map(|t| t.name.as_str()), Some("Packers"));
        assert!(detail.home.is_none(), "no Bears card in the roster table");
        assert_eq!(detail.game.outcome(), Outcome::Undetermined);
    }

    #[tokio::test]
    async fn game_detail_for_unknown_id_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"game_schedule": []}}"#)
            .create_async()
            .await;

        let api = PredictApi::with_endpoint(server.url());
        let err = api.fetch_game_detail(9999).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
