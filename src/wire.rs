// Copyright 2026 The Courtside Authors
// SPDX-License-Identifier: Apache-2.0

//! Provider-shaped response structures.
//!
//! These structs bind the upstream JSON field-for-field. Every field is
//! defaulted so that partial payloads from either provider generation decode
//! without failing; the superset statistics fields simply stay at zero when
//! the older shape omits them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer};

const GAME_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoreboardData {
    pub scoreboard: Scoreboard,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scoreboard {
    #[serde(deserialize_with = "lenient_date")]
    pub game_date: Option<NaiveDate>,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Game {
    pub game_id: String,
    #[serde(rename = "gameTimeUTC", deserialize_with = "lenient_datetime")]
    pub game_time_utc: Option<DateTime<Utc>>,
    pub home_team: Team,
    pub away_team: Team,
}

/// The boxscore envelope key differs between provider generations: the stats
/// API nests the payload under `boxScoreTraditional`, the CDN under `game`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BoxscoreData {
    #[serde(rename = "boxScoreTraditional", alias = "game")]
    pub game: Boxscore,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Boxscore {
    pub game_id: String,
    pub home_team: Team,
    pub away_team: Team,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    pub team_id: i64,
    pub team_name: String,
    pub team_tricode: String,
    pub statistics: Statistics,
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    pub first_name: String,
    pub family_name: String,
    pub player_slug: String,
    pub position: String,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Statistics {
    pub minutes: String,
    pub field_goals_made: i64,
    pub field_goals_attempted: i64,
    pub field_goals_percentage: f64,
    pub three_pointers_made: i64,
    pub three_pointers_attempted: i64,
    pub three_pointers_percentage: f64,
    pub free_throws_made: i64,
    pub free_throws_attempted: i64,
    pub free_throws_percentage: f64,
    pub rebounds_offensive: i64,
    pub rebounds_defensive: i64,
    pub rebounds_total: i64,
    pub rebounds_team: i64,
    pub assists: i64,
    pub steals: i64,
    pub blocks: i64,
    pub turnovers: i64,
    pub turnovers_total: i64,
    pub fouls_personal: i64,
    pub fouls_drawn: i64,
    pub points: i64,
    pub plus_minus_points: f64,
}

/// The provider sends `""` or the literal string `"null"` for dates on days
/// without games; both decode to `None` rather than failing the payload.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() && raw != "null" => {
            NaiveDate::parse_from_str(&raw, GAME_DATE_FORMAT)
                .map(Some)
                .map_err(de::Error::custom)
        }
        _ => Ok(None),
    }
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() && raw != "null" => raw
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}
