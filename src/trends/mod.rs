//! Trending topic sources for a niche.

mod keywords;
mod serpapi;

use async_trait::async_trait;
use tracing::{error, info};

pub use keywords::{extract_keywords, KeywordTrends};
pub use serpapi::SerpApiTrends;

use crate::error::ApiError;

/// Placeholder shown when a niche produced no topics.
pub const NO_TRENDS: &str = "No trends found";
/// Placeholder shown when the topic source failed.
pub const TRENDS_ERROR: &str = "Error fetching trends";

/// Something that can suggest topics for a niche.
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Up to five topic strings for the niche, most relevant first.
    async fn topics(&self, niche: &str) -> Result<Vec<String>, ApiError>;
}

/// Fetch topics, degrading to a single placeholder on failure.
pub async fn trending_topics(source: &dyn TrendSource, niche: &str) -> Vec<String> {
    match source.topics(niche).await {
        Ok(topics) if !topics.is_empty() => {
            info!(source = source.name(), niche = %niche, count = topics.len(), "Fetched trends");
            topics
        }
        Ok(_) | Err(ApiError::EmptyResult { .. }) => vec![NO_TRENDS.to_string()],
        Err(e) => {
            error!(source = source.name(), niche = %niche, "Error fetching trends: {e}");
            vec![TRENDS_ERROR.to_string()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Vec<String>, ApiError>);

    #[async_trait]
    impl TrendSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn topics(&self, _niche: &str) -> Result<Vec<String>, ApiError> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) if e.is_empty() => Err(ApiError::EmptyResult { service: "fixed" }),
                Err(_) => Err(ApiError::Network {
                    service: "fixed",
                    message: "down".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_topics_pass_through() {
        let source = Fixed(Ok(vec!["rust".to_string(), "tokio".to_string()]));
        assert_eq!(trending_topics(&source, "dev").await, vec!["rust", "tokio"]);
    }

    #[tokio::test]
    async fn test_empty_becomes_placeholder() {
        let source = Fixed(Ok(Vec::new()));
        assert_eq!(trending_topics(&source, "dev").await, vec![NO_TRENDS]);
        let source = Fixed(Err(ApiError::EmptyResult { service: "fixed" }));
        assert_eq!(trending_topics(&source, "dev").await, vec![NO_TRENDS]);
    }

    #[tokio::test]
    async fn test_failure_becomes_placeholder() {
        let source = Fixed(Err(ApiError::Network {
            service: "fixed",
            message: "down".to_string(),
        }));
        assert_eq!(trending_topics(&source, "dev").await, vec![TRENDS_ERROR]);
    }
}
