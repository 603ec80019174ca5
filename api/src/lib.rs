pub mod client;
pub mod graphql;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the GraphQL wire format
// ---------------------------------------------------------------------------

/// One row of the weekly schedule as served by the prediction service.
#[derive(Debug, Clone, Default)]
pub struct ScheduledGame {
    pub game_id: u32,
    pub away_team: String, // team_1_name on the wire
    pub home_team: String, // team_2_name on the wire
    /// None = no prediction computed for this game yet.
    pub predicted_winner: Option<String>,
    /// None = game has not concluded.
    pub winning_team: Option<String>,
    pub date: String, // "2020-09-13"
    pub time: String, // "13:00:00", stored local time (CST)
}

impl ScheduledGame {
    pub fn outcome(&self) -> Outcome {
        classify(self.predicted_winner.as_deref(), self.winning_team.as_deref())
    }

    pub fn kickoff(&self) -> Kickoff {
        Kickoff::compose(&self.date, &self.time)
    }
}

/// Season-long team card: rankings, overall grade, bye week.
#[derive(Debug, Clone, Default)]
pub struct TeamDetail {
    pub team_id: u32,
    pub name: String,
    pub offence_ranking: u16,
    pub defence_ranking: u16,
    pub special_teams_ranking: u16,
    pub grade: f32,
    pub bye_week: u8,
}

/// Matchup detail fetched on demand: the game row plus both teams' cards.
/// A card is None when the roster table has no row for that team name.
#[derive(Debug, Clone, Default)]
pub struct GameDetail {
    pub game: ScheduledGame,
    pub away: Option<TeamDetail>,
    pub home: Option<TeamDetail>,
}

// ---------------------------------------------------------------------------
// Prediction outcome classification
// ---------------------------------------------------------------------------

/// Derived accuracy of a prediction against the recorded result.
/// Recomputed per row per render, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    Right,
    Wrong,
    #[default]
    Undetermined,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Right => "correct",
            Outcome::Wrong => "incorrect",
            Outcome::Undetermined => "undetermined",
        }
    }
}

/// Classify a prediction against the actual winner.
///
/// Exact string equality, case-sensitive, no normalization. Absence of
/// either side always yields Undetermined — a recorded winner with no
/// prediction is not a wrong prediction. An empty string is a present
/// value, not absence.
pub fn classify(predicted: Option<&str>, winner: Option<&str>) -> Outcome {
    match (predicted, winner) {
        (Some(p), Some(w)) if p == w => Outcome::Right,
        (Some(_), Some(_)) => Outcome::Wrong,
        _ => Outcome::Undetermined,
    }
}

// ---------------------------------------------------------------------------
// Kickoff timestamp composition
// ---------------------------------------------------------------------------

/// Combined kickoff timestamp for one game row.
///
/// The service stores date and time as separate columns; the display
/// timestamp is their concatenation with a 'T' separator. No timezone
/// conversion happens anywhere — what is stored is what is shown.
#[derive(Debug, Clone)]
pub struct Kickoff {
    date: String,
    time: String,
    parsed: Option<NaiveDateTime>,
}

impl Kickoff {
    pub fn compose(date: &str, time: &str) -> Self {
        let parsed =
            NaiveDateTime::parse_from_str(&format!("{date}T{time}"), "%Y-%m-%dT%H:%M:%S").ok();
        Self { date: date.to_owned(), time: time.to_owned(), parsed }
    }

    /// The composed `date + 'T' + time` string.
    pub fn timestamp(&self) -> String {
        format!("{}T{}", self.date, self.time)
    }

    /// Short month/day form, e.g. "Sep 13". Falls back to the stored date
    /// string when the timestamp does not parse.
    pub fn short_date(&self) -> String {
        self.parsed
            .map(|dt| dt.format("%b %-d").to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    /// 12-hour clock with meridiem, e.g. "1:00 PM". Falls back to the
    /// stored time string when the timestamp does not parse.
    pub fn clock_time(&self) -> String {
        self.parsed
            .map(|dt| dt.format("%-I:%M %p").to_string())
            .unwrap_or_else(|| self.time.clone())
    }
}

// ---------------------------------------------------------------------------
// League calendar
// ---------------------------------------------------------------------------

pub const FIRST_SELECTABLE_YEAR: i32 = 2019;
pub const WEEKS_PER_SEASON: u32 = 18;

/// The current league year and in-progress week. Computed once at startup
/// and injected into the app state; never consulted as a hidden global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueClock {
    pub year: i32,
    pub week: u32,
}

impl LeagueClock {
    /// Derive the clock from a calendar date. The league year is the year
    /// the season kicked off in: from February through July the previous
    /// calendar year's season is still the "current" one.
    pub fn from_date(today: NaiveDate) -> Self {
        let year = if today.month() >= 8 { today.year() } else { today.year() - 1 };
        let opener = season_opener(year);
        let week = if today < opener {
            1
        } else {
            ((today - opener).num_days() / 7 + 1).clamp(1, WEEKS_PER_SEASON as i64) as u32
        };
        Self { year, week }
    }

    /// Clock for right now, with env overrides for browsing past seasons:
    /// NFLBOARD_LEAGUE_YEAR and NFLBOARD_LEAGUE_WEEK.
    pub fn from_env() -> Self {
        let mut clock = Self::from_date(chrono::Local::now().date_naive());
        if let Ok(year) = std::env::var("NFLBOARD_LEAGUE_YEAR")
            && let Ok(year) = year.trim().parse::<i32>()
        {
            clock.override_year(year);
        }
        if let Ok(week) = std::env::var("NFLBOARD_LEAGUE_WEEK")
            && let Ok(week) = week.trim().parse::<u32>()
        {
            clock.week = week.clamp(1, WEEKS_PER_SEASON);
        }
        clock
    }

    /// Clamp an override into the selectable range. A year below the first
    /// recorded season would leave the year selector stuck on a value the
    /// enumerated list cannot reach.
    fn override_year(&mut self, year: i32) {
        self.year = year.max(FIRST_SELECTABLE_YEAR);
    }
}

/// Opening Thursday of a season: three days after Labor Day (the first
/// Monday of September).
fn season_opener(league_year: i32) -> NaiveDate {
    // Sep 1 always exists; unwrap is fine for any representable year.
    let sep_first = NaiveDate::from_ymd_opt(league_year, 9, 1).unwrap();
    let days_to_monday = (7 - sep_first.weekday().num_days_from_monday()) % 7;
    sep_first + chrono::Days::new(u64::from(days_to_monday) + 3)
}

/// The enumerated set of selectable years and weeks. Selector controls
/// cycle through these lists only, so an out-of-range (year, week) pair is
/// unrepresentable through the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSelections {
    pub league_years: Vec<i32>,
    pub league_weeks: Vec<u32>,
}

impl TimeSelections {
    pub fn through(current_year: i32) -> Self {
        Self {
            league_years: (FIRST_SELECTABLE_YEAR..=current_year.max(FIRST_SELECTABLE_YEAR))
                .collect(),
            league_weeks: (1..=WEEKS_PER_SEASON).collect(),
        }
    }
}
