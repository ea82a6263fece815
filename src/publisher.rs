//! Sending composed posts to the social platform.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::ApiError;
use crate::x::XClient;

/// Publishes posts now or at a future time. One attempt, no retries.
#[derive(Clone)]
pub struct Publisher {
    x: XClient,
}

impl Publisher {
    #[must_use]
    pub fn new(x: XClient) -> Self {
        Self { x }
    }

    /// Publish immediately, returning the platform's post id.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects or never receives the post.
    pub async fn publish_now(&self, text: &str) -> Result<String, ApiError> {
        let id = self.x.create_post(text, None).await?;
        info!(post_id = %id, "Posted: {text}");
        Ok(id)
    }

    /// Ask the platform to deliver the post at `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects or never receives the request.
    pub async fn schedule(&self, text: &str, at: DateTime<Utc>) -> Result<String, ApiError> {
        let id = self.x.create_post(text, Some(at.timestamp())).await?;
        info!(post_id = %id, at = %at, "Scheduled: {text}");
        Ok(id)
    }
}
