// Copyright 2026 The Courtside Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HTTP facade for the stats service.
//!
//! - `GET /` - Root greeting
//! - `GET /metrics` - Prometheus metrics export
//! - `GET /stats/scoreboard?date=<YYYY-MM-DD>&league=<nba|wnba>` - Games on a date
//! - `GET /stats/boxscore?gameId=<id>&league=<nba|wnba>` - Full game statistics
//!
//! Query parsing is permissive: missing parameters flow upstream as empty
//! values and unrecognized leagues fall back to NBA. Any service failure maps
//! to a 500 with a fixed plain-text body; causes are only ever logged.

use std::time::Duration;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::metrics::Metrics;
use crate::model::{Boxscore, Scoreboard};
use crate::service::StatsService;
use crate::upstream::{BoxscoreRequest, LeagueId, ScoreboardRequest};

const CORS_MAX_AGE: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct AppState {
    pub service: StatsService,
    pub metrics: Metrics,
}

#[derive(Debug, Deserialize)]
pub struct ScoreboardQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BoxscoreQuery {
    #[serde(default, rename = "gameId")]
    pub game_id: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
}

/// Build the application router with CORS, tracing, and timeout layers.
pub fn router(state: AppState, config: &AppConfig) -> anyhow::Result<Router> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid allowed origin {origin:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE);

    Ok(Router::new()
        .route("/", get(root))
        .route("/metrics", get(metrics))
        .route("/stats/scoreboard", get(scoreboard))
        .route("/stats/boxscore", get(boxscore))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .with_state(state))
}

async fn root() -> &'static str {
    "Hello World!"
}

async fn metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state.metrics.export()
}

async fn scoreboard(
    State(state): State<AppState>,
    Query(query): Query<ScoreboardQuery>,
) -> Result<Json<Scoreboard>, AppError> {
    state.metrics.record_scoreboard_request();

    let request = ScoreboardRequest {
        date: query.date.unwrap_or_default(),
        league: LeagueId::parse(query.league.as_deref().unwrap_or_default()),
    };

    let start = Instant::now();
    let result = state.service.scoreboard(request).await;
    state
        .metrics
        .record_upstream_latency(start.elapsed().as_secs_f64());

    match result {
        Ok(scoreboard) => Ok(Json(scoreboard)),
        Err(cause) => {
            state.metrics.record_upstream_failure();
            Err(AppError::upstream("failed to get scoreboard", cause))
        }
    }
}

async fn boxscore(
    State(state): State<AppState>,
    Query(query): Query<BoxscoreQuery>,
) -> Result<Json<Boxscore>, AppError> {
    state.metrics.record_boxscore_request();

    let request = BoxscoreRequest {
        game_id: query.game_id.unwrap_or_default(),
        league: LeagueId::parse(query.league.as_deref().unwrap_or_default()),
    };

    let start = Instant::now();
    let result = state.service.boxscore(request).await;
    state
        .metrics
        .record_upstream_latency(start.elapsed().as_secs_f64());

    match result {
        Ok(boxscore) => Ok(Json(boxscore)),
        Err(cause) => {
            state.metrics.record_upstream_failure();
            Err(AppError::upstream("failed to get boxscore", cause))
        }
    }
}
