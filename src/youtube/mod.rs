//! YouTube Data API v3 client.
//!
//! Two calls are used: `search.list` to find candidate videos and a single
//! batched `videos.list` to pull view counts and durations for them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{check_status, ApiError};

const SERVICE: &str = "youtube";

/// Parameters for a `search.list` call.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub max_results: u32,
    /// Only return videos published after this instant.
    pub published_after: Option<DateTime<Utc>>,
    /// `short`, `medium` or `long`; `None` leaves duration unconstrained.
    pub duration: Option<&'static str>,
}

/// One row of a search response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub video_id: String,
    pub title: String,
    pub thumbnail: String,
    pub published_at: Option<DateTime<Utc>>,
}

/// Statistics and content details for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoStats {
    pub video_id: String,
    pub views: u64,
    /// ISO-8601 duration as returned by the API, e.g. `PT4M13S`.
    pub duration: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    statistics: Statistics,
    #[serde(rename = "contentDetails", default)]
    content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
struct Statistics {
    #[serde(rename = "viewCount")]
    view_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

/// Client for the YouTube Data API.
#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl YouTubeClient {
    /// Create a client using the key and base URL from configuration.
    #[must_use]
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_base: config.youtube_api_base.trim_end_matches('/').to_string(),
            api_key: config.youtube_api_key.clone(),
        }
    }

    /// Run a `search.list` query restricted to videos.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<SearchHit>, ApiError> {
        let mut params = vec![
            ("part", "snippet".to_string()),
            ("type", "video".to_string()),
            ("q", request.query.to_string()),
            ("maxResults", request.max_results.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(after) = request.published_after {
            params.push((
                "publishedAfter",
                after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(duration) = request.duration {
            params.push(("videoDuration", duration.to_string()));
        }

        let url = format!("{}/youtube/v3/search", self.api_base);
        debug!(query = %request.query, max_results = request.max_results, "Searching YouTube");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::network(SERVICE, &e))?;
        let body: SearchResponse = check_status(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::parse(SERVICE, e))?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                Some(SearchHit {
                    video_id,
                    title: item.snippet.title,
                    thumbnail: item
                        .snippet
                        .thumbnails
                        .default
                        .map(|t| t.url)
                        .unwrap_or_default(),
                    published_at: item
                        .snippet
                        .published_at
                        .as_deref()
                        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                        .map(|d| d.with_timezone(&Utc)),
                })
            })
            .collect())
    }

    /// Fetch statistics and durations for a batch of video ids in one call.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::EmptyResult` if the API knows none of the ids, or
    /// another error if the request fails.
    pub async fn video_stats(&self, ids: &[String]) -> Result<Vec<VideoStats>, ApiError> {
        if ids.is_empty() {
            return Err(ApiError::EmptyResult { service: SERVICE });
        }

        let url = format!("{}/youtube/v3/videos", self.api_base);
        let joined = ids.join(",");
        debug!(count = ids.len(), "Fetching YouTube video statistics");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "statistics,contentDetails"),
                ("id", joined.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::network(SERVICE, &e))?;
        let body: VideoListResponse = check_status(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::parse(SERVICE, e))?;

        if body.items.is_empty() {
            return Err(ApiError::EmptyResult { service: SERVICE });
        }

        Ok(body
            .items
            .into_iter()
            .map(|item| VideoStats {
                video_id: item.id,
                views: item
                    .statistics
                    .view_count
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0),
                duration: item.content_details.duration,
            })
            .collect())
    }
}

/// Short link for a video id.
#[must_use]
pub fn video_url(video_id: &str) -> String {
    format!("https://youtu.be/{video_id}")
}
