use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub request_timeout: Duration,
    pub shutdown_timeout: Duration,
    pub allowed_origins: Vec<String>,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub provider: ProviderKind,
    pub stats_base_url: String,
    pub cdn_base_url: String,
    pub wnba_cdn_base_url: String,
    pub timeout: Duration,
}

/// Which upstream layout to talk to. Unlike the league query parameter this
/// is strict; a typo here should fail startup, not silently pick a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Live,
    Stats,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let listen_addr: SocketAddr = env::var("COURTSIDE_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("invalid COURTSIDE_ADDR")?;

        let request_timeout = parse_duration("COURTSIDE_REQUEST_TIMEOUT", 120)?;
        let shutdown_timeout = parse_duration("COURTSIDE_SHUTDOWN_TIMEOUT", 30)?;

        let allowed_origins: Vec<String> = env::var("COURTSIDE_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            listen_addr,
            request_timeout,
            shutdown_timeout,
            allowed_origins,
            upstream: UpstreamConfig::from_env()?,
        })
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self> {
        let provider = match env::var("COURTSIDE_PROVIDER")
            .unwrap_or_else(|_| "live".to_string())
            .as_str()
        {
            "live" => ProviderKind::Live,
            "stats" => ProviderKind::Stats,
            other => bail!("COURTSIDE_PROVIDER must be \"live\" or \"stats\", got {other:?}"),
        };

        Ok(Self {
            provider,
            stats_base_url: env::var("COURTSIDE_STATS_URL")
                .unwrap_or_else(|_| "https://stats.nba.com".to_string()),
            cdn_base_url: env::var("COURTSIDE_CDN_URL")
                .unwrap_or_else(|_| "https://cdn.nba.com".to_string()),
            wnba_cdn_base_url: env::var("COURTSIDE_WNBA_CDN_URL")
                .unwrap_or_else(|_| "https://cdn.wnba.com".to_string()),
            timeout: parse_duration("COURTSIDE_UPSTREAM_TIMEOUT", 120)?,
        })
    }
}

fn parse_duration(env_key: &str, default_secs: u64) -> Result<Duration> {
    let raw = env::var(env_key).unwrap_or_else(|_| default_secs.to_string());
    let secs: u64 = raw
        .parse()
        .with_context(|| format!("{env_key} must be an integer number of seconds"))?;

    Ok(Duration::from_secs(secs))
}
