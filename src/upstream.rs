// Copyright 2026 The Courtside Authors
// SPDX-License-Identifier: Apache-2.0

//! Upstream provider clients.
//!
//! Two historical provider layouts exist behind the same [`NbaApi`] trait:
//! [`LiveClient`] fetches scoreboards from the stats host and boxscores from
//! per-league CDN static files, while [`StatsClient`] fetches both from the
//! unified stats API.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{ProviderKind, UpstreamConfig};
use crate::wire;

/// The provider drops requests that do not look like they come from its own
/// web properties, hence the fixed browser-ish headers.
const UPSTREAM_USER_AGENT: &str = "PostmanRuntime/7.29.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueId {
    Nba,
    Wnba,
}

impl LeagueId {
    /// Map the public query value onto a league. Everything except the
    /// literal `wnba` selects NBA; the leniency is part of the public
    /// contract.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "wnba" => LeagueId::Wnba,
            _ => LeagueId::Nba,
        }
    }

    /// Upstream league discriminator.
    pub fn as_param(self) -> &'static str {
        match self {
            LeagueId::Nba => "00",
            LeagueId::Wnba => "10",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreboardRequest {
    pub date: String,
    pub league: LeagueId,
}

#[derive(Debug, Clone)]
pub struct BoxscoreRequest {
    pub game_id: String,
    pub league: LeagueId,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NbaApi: Send + Sync {
    async fn scoreboard(&self, request: ScoreboardRequest) -> Result<wire::ScoreboardData>;
    async fn boxscore(&self, request: BoxscoreRequest) -> Result<wire::BoxscoreData>;
}

/// Build the provider client selected by configuration.
pub fn build_api(config: &UpstreamConfig) -> Result<Arc<dyn NbaApi>> {
    let api: Arc<dyn NbaApi> = match config.provider {
        ProviderKind::Live => Arc::new(LiveClient::try_new(config)?),
        ProviderKind::Stats => Arc::new(StatsClient::try_new(config)?),
    };

    Ok(api)
}

/// Client for the split stats + CDN provider layout.
pub struct LiveClient {
    stats_base_url: String,
    cdn_base_url: String,
    wnba_cdn_base_url: String,
    client: Client,
}

impl LiveClient {
    pub fn try_new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            stats_base_url: config.stats_base_url.clone(),
            cdn_base_url: config.cdn_base_url.clone(),
            wnba_cdn_base_url: config.wnba_cdn_base_url.clone(),
            client: build_client(config)?,
        })
    }
}

#[async_trait]
impl NbaApi for LiveClient {
    async fn scoreboard(&self, request: ScoreboardRequest) -> Result<wire::ScoreboardData> {
        fetch_json(scoreboard_request(&self.client, &self.stats_base_url, &request)).await
    }

    async fn boxscore(&self, request: BoxscoreRequest) -> Result<wire::BoxscoreData> {
        let cdn_base_url = match request.league {
            LeagueId::Wnba => &self.wnba_cdn_base_url,
            LeagueId::Nba => &self.cdn_base_url,
        };
        let url = format!(
            "{}/static/json/liveData/boxscore/boxscore_{}.json",
            cdn_base_url.trim_end_matches('/'),
            request.game_id
        );

        fetch_json(self.client.get(url)).await
    }
}

/// Client for the unified stats API layout.
pub struct StatsClient {
    base_url: String,
    client: Client,
}

impl StatsClient {
    pub fn try_new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.stats_base_url.clone(),
            client: build_client(config)?,
        })
    }
}

#[async_trait]
impl NbaApi for StatsClient {
    async fn scoreboard(&self, request: ScoreboardRequest) -> Result<wire::ScoreboardData> {
        fetch_json(scoreboard_request(&self.client, &self.base_url, &request)).await
    }

    async fn boxscore(&self, request: BoxscoreRequest) -> Result<wire::BoxscoreData> {
        let url = format!(
            "{}/stats/boxscoretraditionalv3",
            self.base_url.trim_end_matches('/')
        );

        // period/range parameters are required by upstream but the facade
        // only ever asks for whole-game numbers
        fetch_json(self.client.get(url).query(&[
            ("GameID", request.game_id.as_str()),
            ("LeagueID", request.league.as_param()),
            ("startPeriod", "0"),
            ("endPeriod", "0"),
            ("startRange", "0"),
            ("endRange", "0"),
            ("rangeType", "0"),
        ]))
        .await
    }
}

fn scoreboard_request(
    client: &Client,
    base_url: &str,
    request: &ScoreboardRequest,
) -> RequestBuilder {
    let url = format!("{}/stats/scoreboardv3", base_url.trim_end_matches('/'));

    client.get(url).query(&[
        ("LeagueID", request.league.as_param()),
        ("GameDate", request.date.as_str()),
    ])
}

fn build_client(config: &UpstreamConfig) -> Result<Client> {
    let referer = HeaderValue::from_str(config.stats_base_url.trim_end_matches('/'))
        .context("upstream stats URL is not a valid header value")?;

    let mut headers = HeaderMap::new();
    headers.insert(REFERER, referer.clone());
    headers.insert(ORIGIN, referer);

    Client::builder()
        .user_agent(UPSTREAM_USER_AGENT)
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .context("failed to build upstream client")
}

async fn fetch_json<T>(request: RequestBuilder) -> Result<T>
where
    T: DeserializeOwned,
{
    let response = request.send().await.context("upstream request failed")?;

    let status = response.status();
    if status >= StatusCode::BAD_REQUEST {
        bail!("upstream responded with status {status}");
    }

    response
        .json::<T>()
        .await
        .context("failed to decode upstream response")
}
