//! Unattended posting on a fixed period.
//!
//! Each tick picks a canned message and a matching search query, attaches the
//! most viewed video for that query and publishes straight away. Nothing is
//! persisted between ticks.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::compose::compose_message;
use crate::error::ApiError;
use crate::publisher::Publisher;
use crate::videos::{search_videos, VideoFilter};
use crate::youtube::YouTubeClient;

/// A message body and the video query it pairs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub message: String,
    pub query: String,
}

impl Template {
    #[must_use]
    pub fn new(message: &str, query: &str) -> Self {
        Self {
            message: message.to_string(),
            query: query.to_string(),
        }
    }
}

/// The built-in template pool.
#[must_use]
pub fn default_templates() -> Vec<Template> {
    vec![
        Template::new(
            "Level up your Python skills with this quick tutorial!",
            "python tutorial for beginners",
        ),
        Template::new(
            "New to machine learning? Start here.",
            "machine learning explained",
        ),
        Template::new(
            "Automate the boring stuff. This one saves hours.",
            "automation tips productivity",
        ),
        Template::new(
            "Clean code habits worth picking up this week.",
            "clean code tips",
        ),
        Template::new(
            "AI tools that are actually useful day to day.",
            "best ai tools",
        ),
    ]
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Posted { post_id: String, text: String },
    /// No video matched the template's query.
    Skipped { query: String },
}

pub struct AutoPoster {
    youtube: YouTubeClient,
    publisher: Publisher,
    templates: Vec<Template>,
}

impl AutoPoster {
    #[must_use]
    pub fn new(youtube: YouTubeClient, publisher: Publisher) -> Self {
        Self::with_templates(youtube, publisher, default_templates())
    }

    #[must_use]
    pub fn with_templates(
        youtube: YouTubeClient,
        publisher: Publisher,
        templates: Vec<Template>,
    ) -> Self {
        Self {
            youtube,
            publisher,
            templates,
        }
    }

    /// Run one compose-and-publish cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the video lookup or the publish call fails.
    pub async fn run_once(&self) -> Result<TickOutcome, ApiError> {
        let template = pick_template(&self.templates, &mut rand::thread_rng())
            .ok_or(ApiError::EmptyResult { service: "autopost" })?;

        let shortlist =
            match search_videos(&self.youtube, &template.query, &VideoFilter::default()).await {
                Ok(shortlist) => shortlist,
                Err(e) if e.is_empty() => {
                    return Ok(TickOutcome::Skipped {
                        query: template.query.clone(),
                    });
                }
                Err(e) => return Err(e),
            };
        let Some(video) = shortlist.videos.first() else {
            return Ok(TickOutcome::Skipped {
                query: template.query.clone(),
            });
        };

        let text = compose_message(&template.message, Some(&video.url), None);
        let post_id = self.publisher.publish_now(&text).await?;
        Ok(TickOutcome::Posted { post_id, text })
    }

    /// Tick every `interval` until `shutdown` is cancelled. The first tick
    /// fires immediately.
    pub async fn run_loop(&self, interval: Duration, shutdown: CancellationToken) {
        info!(
            interval_hours = interval.as_secs() / 3600,
            templates = self.templates.len(),
            "Starting autopost loop"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    info!("Autopost loop stopped");
                    break;
                }
                _ = ticker.tick() => {
                    match self.run_once().await {
                        Ok(TickOutcome::Posted { post_id, .. }) => {
                            info!(post_id = %post_id, "Autopost published");
                        }
                        Ok(TickOutcome::Skipped { query }) => {
                            warn!(query = %query, "No video found, skipping autopost");
                        }
                        Err(e) => error!("Autopost failed: {e}"),
                    }
                }
            }
        }
    }
}

fn pick_template<'a>(templates: &'a [Template], rng: &mut impl Rng) -> Option<&'a Template> {
    templates.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_template_from_pool() {
        let pool = default_templates();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let picked = pick_template(&pool, &mut rng).unwrap();
            assert!(pool.contains(picked));
        }
    }

    #[test]
    fn test_pick_template_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_template(&[], &mut rng).is_none());
    }

    #[test]
    fn test_default_templates_fit_with_a_link() {
        for template in default_templates() {
            let text = compose_message(&template.message, Some("https://youtu.be/abcdefghijk"), None);
            assert!(text.chars().count() <= crate::constants::MAX_POST_LENGTH);
            assert!(!text.ends_with("..."));
        }
    }
}
