//! The set of external API clients, built once from configuration.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::publisher::Publisher;
use crate::trends::{KeywordTrends, SerpApiTrends, TrendSource};
use crate::x::XClient;
use crate::youtube::YouTubeClient;

/// Shared handles to every external API. Cheap to clone.
#[derive(Clone)]
pub struct Services {
    pub x: XClient,
    pub youtube: YouTubeClient,
    pub trends: Arc<dyn TrendSource>,
    pub publisher: Publisher,
}

impl Services {
    /// Build all clients over one HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let x = XClient::new(http.clone(), config);
        let youtube = YouTubeClient::new(http.clone(), config);
        let trends: Arc<dyn TrendSource> = match &config.trend_api_key {
            Some(key) => Arc::new(SerpApiTrends::new(http, config, key.clone())),
            None => Arc::new(KeywordTrends::new(x.clone())),
        };
        info!(trend_source = trends.name(), "API clients ready");

        Ok(Self {
            publisher: Publisher::new(x.clone()),
            x,
            youtube,
            trends,
        })
    }
}
