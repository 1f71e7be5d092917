// Copyright 2026 The Courtside Authors
// SPDX-License-Identifier: Apache-2.0

//! Public response schema and the upstream-to-public transformation.
//!
//! The transforms are total: malformed minutes strings degrade to the `0:00`
//! sentinel and absent lists become empty ones, so building a response can
//! never fail once the upstream payload has decoded.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;

use crate::wire;

/// Upstream encodes minutes played as an ISO-8601-like duration, sometimes
/// without the leading zero on the minutes part (`PT5M09.00S`).
static MINUTES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PT(\d)?(\d)M(\d{2})\.\d{2}S").expect("minutes pattern compiles"));

#[derive(Debug, Clone, Serialize)]
pub struct Scoreboard {
    pub date: NaiveDate,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub id: String,
    pub starts_at: DateTime<Utc>,
    pub home_team: Team,
    pub away_team: Team,
}

#[derive(Debug, Clone, Serialize)]
pub struct Boxscore {
    pub game_id: String,
    pub home_team: Team,
    pub away_team: Team,
}

#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub tricode: String,
    pub stats: Stats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub first_name: String,
    pub last_name: String,
    pub slug: String,
    pub position: String,
    pub stats: Stats,
}

/// Short public aliases for the upstream statistics fields. The renames are
/// the wire contract with consumers and must stay stable.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    #[serde(rename = "min")]
    pub minutes: String,
    pub fgm: i64,
    pub fga: i64,
    pub fgp: f64,
    #[serde(rename = "3fgm")]
    pub three_fgm: i64,
    #[serde(rename = "3fga")]
    pub three_fga: i64,
    #[serde(rename = "3fgp")]
    pub three_fgp: f64,
    pub ftm: i64,
    pub fta: i64,
    pub ftp: f64,
    pub oreb: i64,
    pub dreb: i64,
    pub reb: i64,
    pub team_reb: i64,
    pub ast: i64,
    pub stl: i64,
    pub blk: i64,
    pub to: i64,
    pub tot: i64,
    pub pf: i64,
    pub fd: i64,
    pub pts: i64,
    pub plus_minus: f64,
}

impl From<wire::ScoreboardData> for Scoreboard {
    fn from(upstream: wire::ScoreboardData) -> Self {
        let wire::Scoreboard { game_date, games } = upstream.scoreboard;

        Self {
            date: game_date.unwrap_or_default(),
            games: games.into_iter().map(Game::from).collect(),
        }
    }
}

impl From<wire::Game> for Game {
    fn from(game: wire::Game) -> Self {
        Self {
            id: game.game_id,
            starts_at: game.game_time_utc.unwrap_or_default(),
            home_team: Team::identity(game.home_team),
            away_team: Team::identity(game.away_team),
        }
    }
}

impl From<wire::BoxscoreData> for Boxscore {
    fn from(upstream: wire::BoxscoreData) -> Self {
        let wire::Boxscore {
            game_id,
            home_team,
            away_team,
        } = upstream.game;

        Self {
            game_id,
            home_team: Team::from(home_team),
            away_team: Team::from(away_team),
        }
    }
}

impl Team {
    /// Scoreboard entries carry team identity only; stats stay at the zero
    /// value and no player list is emitted.
    fn identity(team: wire::Team) -> Self {
        Self {
            id: team.team_id,
            name: team.team_name,
            tricode: team.team_tricode,
            stats: Stats::default(),
            players: Vec::new(),
        }
    }
}

impl From<wire::Team> for Team {
    fn from(team: wire::Team) -> Self {
        Self {
            id: team.team_id,
            name: team.team_name,
            tricode: team.team_tricode,
            stats: Stats::from(team.statistics),
            players: team.players.into_iter().map(Player::from).collect(),
        }
    }
}

impl From<wire::Player> for Player {
    fn from(player: wire::Player) -> Self {
        Self {
            first_name: player.first_name,
            last_name: player.family_name,
            slug: player.player_slug,
            position: player.position,
            stats: Stats::from(player.statistics),
        }
    }
}

impl From<wire::Statistics> for Stats {
    fn from(stats: wire::Statistics) -> Self {
        Self {
            minutes: parse_minutes(&stats.minutes),
            fgm: stats.field_goals_made,
            fga: stats.field_goals_attempted,
            fgp: as_percentage(stats.field_goals_percentage),
            three_fgm: stats.three_pointers_made,
            three_fga: stats.three_pointers_attempted,
            three_fgp: as_percentage(stats.three_pointers_percentage),
            ftm: stats.free_throws_made,
            fta: stats.free_throws_attempted,
            ftp: as_percentage(stats.free_throws_percentage),
            oreb: stats.rebounds_offensive,
            dreb: stats.rebounds_defensive,
            reb: stats.rebounds_total,
            team_reb: stats.rebounds_team,
            ast: stats.assists,
            stl: stats.steals,
            blk: stats.blocks,
            to: stats.turnovers,
            tot: stats.turnovers_total,
            pf: stats.fouls_personal,
            fd: stats.fouls_drawn,
            pts: stats.points,
            plus_minus: stats.plus_minus_points,
        }
    }
}

/// Reformat the upstream duration into a clock string, suppressing a leading
/// zero on the minutes (`PT05M09.00S` renders `5:09`). Anything that does not
/// match the pattern renders the `0:00` sentinel.
fn parse_minutes(raw: &str) -> String {
    let Some(captures) = MINUTES_PATTERN.captures(raw) else {
        return "0:00".to_string();
    };

    let units = &captures[2];
    let seconds = &captures[3];

    match captures.get(1).map(|tens| tens.as_str()) {
        Some(tens) if tens != "0" => format!("{tens}{units}:{seconds}"),
        _ => format!("{units}:{seconds}"),
    }
}

/// Upstream percentages are 0.0-1.0 fractions; the public schema exposes
/// them on a 0-100 scale.
fn as_percentage(fraction: f64) -> f64 {
    fraction * 100.0
}
