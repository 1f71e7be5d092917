use std::sync::Arc;

use anyhow::{Context, Result};

use crate::model::{Boxscore, Scoreboard};
use crate::upstream::{BoxscoreRequest, NbaApi, ScoreboardRequest};

/// Fetches from the configured provider and yields public schema entities.
/// The context strings double as the fixed messages the HTTP facade returns.
#[derive(Clone)]
pub struct StatsService {
    api: Arc<dyn NbaApi>,
}

impl StatsService {
    pub fn new(api: Arc<dyn NbaApi>) -> Self {
        Self { api }
    }

    pub async fn scoreboard(&self, request: ScoreboardRequest) -> Result<Scoreboard> {
        let data = self
            .api
            .scoreboard(request)
            .await
            .context("failed to get scoreboard")?;

        Ok(Scoreboard::from(data))
    }

    pub async fn boxscore(&self, request: BoxscoreRequest) -> Result<Boxscore> {
        let data = self
            .api
            .boxscore(request)
            .await
            .context("failed to get boxscore")?;

        Ok(Boxscore::from(data))
    }
}
