//! GraphQL wire types: serde shapes for talking to the Hasura endpoint.
//! These map to our clean domain types via the functions in client.rs.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request / response envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

/// Standard GraphQL envelope: `data` on success, `errors` on failure.
/// Hasura can return both at once; errors take precedence.
#[derive(Debug, Deserialize, Default)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphqlError {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Query documents
// ---------------------------------------------------------------------------

pub const GAME_SCHEDULE_BY_YEAR_QUERY: &str = r#"
query GameScheduleByYear($leagueYear: Int!, $leagueWeek: Int!) {
  game_schedule(
    where: { league_year: { _eq: $leagueYear }, week: { _eq: $leagueWeek } }
    order_by: { date: asc, time: asc, game_id: asc }
  ) {
    game_id
    team_1_name
    team_2_name
    predicted_winner
    winning_team
    date
    time
  }
}"#;

pub const GAME_BY_ID_QUERY: &str = r#"
query GameById($gameId: Int!) {
  game_schedule(where: { game_id: { _eq: $gameId } }) {
    game_id
    team_1_name
    team_2_name
    predicted_winner
    winning_team
    date
    time
  }
}"#;

pub const TEAM_DETAILS_QUERY: &str = r#"
query TeamDetails {
  team_details(order_by: { grade: desc }) {
    team_id
    name
    offence_ranking
    defence_ranking
    special_teams_ranking
    grade
    bye_week
  }
}"#;

pub const TEAMS_BY_NAME_QUERY: &str = r#"
query TeamsByName($names: [String!]) {
  team_details(where: { name: { _in: $names } }) {
    team_id
    name
    offence_ranking
    defence_ranking
    special_teams_ranking
    grade
    bye_week
  }
}"#;

// ---------------------------------------------------------------------------
// Row shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameScheduleData {
    pub game_schedule: Option<Vec<GameRow>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GameRow {
    pub game_id: u32,
    pub team_1_name: String, // away by convention
    pub team_2_name: String, // home by convention
    /// Nullable: prediction job may not have run for this slice yet.
    pub predicted_winner: Option<String>,
    /// Nullable until the game concludes.
    pub winning_team: Option<String>,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamDetailsData {
    pub team_details: Option<Vec<TeamRow>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TeamRow {
    pub team_id: u32,
    pub name: String,
    pub offence_ranking: Option<u16>,
    pub defence_ranking: Option<u16>,
    pub special_teams_ranking: Option<u16>,
    pub grade: Option<f32>,
    pub bye_week: Option<u8>,
}
