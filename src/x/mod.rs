//! X (Twitter) API v2 client: recent search and post creation.

pub mod oauth;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, XCredentials};
use crate::error::{check_status, ApiError};

use self::oauth::{authorization_header, Nonce};

const SERVICE: &str = "x";

/// A post returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Post>,
}

#[derive(Debug, Serialize)]
struct CreatePostBody<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    execute_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: Post,
}

/// Client for the X API.
#[derive(Clone)]
pub struct XClient {
    http: reqwest::Client,
    api_base: String,
    creds: XCredentials,
}

impl XClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_base: config.x_api_base.trim_end_matches('/').to_string(),
            creds: config.x.clone(),
        }
    }

    /// Search posts from the last seven days.
    ///
    /// `max_results` is clamped to the 10..=100 range the API accepts. Uses
    /// the app bearer token when configured, otherwise user-context OAuth.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    pub async fn search_recent(&self, query: &str, max_results: u32) -> Result<Vec<Post>, ApiError> {
        let url = format!("{}/2/tweets/search/recent", self.api_base);
        let max_results = max_results.clamp(10, 100).to_string();
        let params = [
            ("query", query),
            ("max_results", max_results.as_str()),
            ("tweet.fields", "text"),
        ];

        debug!(query = %query, "Searching recent posts");

        let request = self.http.get(&url).query(&params);
        let request = match &self.creds.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request.header(
                reqwest::header::AUTHORIZATION,
                authorization_header(&self.creds, "GET", &url, &params, &Nonce::generate()),
            ),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(SERVICE, &e))?;
        let body: SearchResponse = check_status(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::parse(SERVICE, e))?;
        Ok(body.data)
    }

    /// Create a post, optionally asking the platform to deliver it later.
    ///
    /// Returns the id assigned by the platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_post(&self, text: &str, execute_at: Option<i64>) -> Result<String, ApiError> {
        let url = format!("{}/2/tweets", self.api_base);
        let auth = authorization_header(&self.creds, "POST", &url, &[], &Nonce::generate());

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&CreatePostBody { text, execute_at })
            .send()
            .await
            .map_err(|e| ApiError::network(SERVICE, &e))?;
        let body: CreatePostResponse = check_status(SERVICE, response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::parse(SERVICE, e))?;
        Ok(body.data.id)
    }
}
