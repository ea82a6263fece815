use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::TrendSource;
use crate::config::Config;
use crate::constants::MAX_TOPICS;
use crate::error::{check_status, ApiError};

const SERVICE: &str = "serpapi";

#[derive(Debug, Deserialize)]
struct TrendsResponse {
    related_queries: Option<RelatedQueries>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RelatedQueries {
    #[serde(default)]
    rising: Vec<RelatedQuery>,
    #[serde(default)]
    top: Vec<RelatedQuery>,
}

#[derive(Debug, Deserialize)]
struct RelatedQuery {
    query: String,
}

/// Google Trends "related queries" through SerpApi.
pub struct SerpApiTrends {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl SerpApiTrends {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &Config, api_key: String) -> Self {
        Self {
            http,
            api_base: config.trend_api_base.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl TrendSource for SerpApiTrends {
    fn name(&self) -> &'static str {
        SERVICE
    }

    async fn topics(&self, niche: &str) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/search.json", self.api_base);
        debug!(niche = %niche, "Querying Google Trends related queries");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("engine", "google_trends"),
                ("data_type", "RELATED_QUERIES"),
                ("q", niche),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::network(SERVICE, &e))?;
        let body: TrendsResponse = check_status(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::parse(SERVICE, e))?;

        if let Some(message) = body.error {
            return Err(ApiError::Network {
                service: SERVICE,
                message,
            });
        }

        let related = body.related_queries.unwrap_or_default();
        let mut topics: Vec<String> = Vec::new();
        for query in related.rising.into_iter().chain(related.top) {
            if !topics.iter().any(|t| t.eq_ignore_ascii_case(&query.query)) {
                topics.push(query.query);
            }
            if topics.len() == MAX_TOPICS {
                break;
            }
        }

        if topics.is_empty() {
            return Err(ApiError::EmptyResult { service: SERVICE });
        }
        Ok(topics)
    }
}
