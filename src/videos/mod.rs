//! Video candidate selection.
//!
//! A niche query is searched once, the hits are enriched with view counts in
//! one batched call, and the result is narrowed to a shortlist of the most
//! viewed videos. When too few videos clear the requested view tier the
//! threshold is relaxed tier by tier until the shortlist fills or every video
//! has been considered.

mod duration;

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info, warn};

pub use duration::format_duration;

use crate::constants::{SHORTLIST_LEN, VIDEO_SEARCH_CAP};
use crate::error::ApiError;
use crate::youtube::{video_url, SearchRequest, YouTubeClient};

/// Minimum view count a video must reach to be shortlisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewTier {
    Over100k,
    Over50k,
    Over10k,
    #[default]
    Any,
}

impl ViewTier {
    /// All tiers, strictest first. Relaxation walks this order.
    pub const ORDER: [ViewTier; 4] = [
        ViewTier::Over100k,
        ViewTier::Over50k,
        ViewTier::Over10k,
        ViewTier::Any,
    ];

    #[must_use]
    pub const fn threshold(self) -> u64 {
        match self {
            Self::Over100k => 100_000,
            Self::Over50k => 50_000,
            Self::Over10k => 10_000,
            Self::Any => 0,
        }
    }

    /// Parse a form value; unknown values mean no threshold.
    #[must_use]
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "100k" => Self::Over100k,
            "50k" => Self::Over50k,
            "10k" => Self::Over10k,
            _ => Self::Any,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Over100k => "100k",
            Self::Over50k => "50k",
            Self::Over10k => "10k",
            Self::Any => "any",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Over100k => "100k+ views",
            Self::Over50k => "50k+ views",
            Self::Over10k => "10k+ views",
            Self::Any => "Any views",
        }
    }

    /// This tier followed by every looser one.
    pub fn relaxations(self) -> impl Iterator<Item = ViewTier> {
        Self::ORDER.into_iter().skip_while(move |t| *t != self)
    }
}

/// How recently a video must have been published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Recency {
    #[default]
    None,
    Days30,
    Days90,
    Days180,
}

impl Recency {
    pub const ALL: [Recency; 4] = [
        Recency::None,
        Recency::Days30,
        Recency::Days90,
        Recency::Days180,
    ];

    #[must_use]
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "30d" => Self::Days30,
            "90d" => Self::Days90,
            "180d" => Self::Days180,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Days30 => "30d",
            Self::Days90 => "90d",
            Self::Days180 => "180d",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Any time",
            Self::Days30 => "Last 30 days",
            Self::Days90 => "Last 90 days",
            Self::Days180 => "Last 180 days",
        }
    }

    #[must_use]
    pub fn window(self) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Days30 => Some(Duration::days(30)),
            Self::Days90 => Some(Duration::days(90)),
            Self::Days180 => Some(Duration::days(180)),
        }
    }
}

/// Video length bucket, using the search API's own categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DurationBucket {
    #[default]
    Any,
    /// Under 4 minutes.
    Short,
    /// 4 to 20 minutes.
    Medium,
    /// Over 20 minutes.
    Long,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 4] = [
        DurationBucket::Any,
        DurationBucket::Short,
        DurationBucket::Medium,
        DurationBucket::Long,
    ];

    #[must_use]
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "short" => Self::Short,
            "medium" => Self::Medium,
            "long" => Self::Long,
            _ => Self::Any,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Any => "Any length",
            Self::Short => "Short (< 4 min)",
            Self::Medium => "Medium (4-20 min)",
            Self::Long => "Long (> 20 min)",
        }
    }

    /// Value for the `videoDuration` search parameter.
    #[must_use]
    pub const fn api_value(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Short => Some("short"),
            Self::Medium => Some("medium"),
            Self::Long => Some("long"),
        }
    }
}

/// Operator-selected filter for a video search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub min_views: ViewTier,
    pub recency: Recency,
    pub duration: DurationBucket,
}

/// A video that may be attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCandidate {
    pub url: String,
    pub title: String,
    pub thumbnail: String,
    pub views: u64,
    pub published_at: Option<DateTime<Utc>>,
    /// Human-readable `m:ss`.
    pub duration: String,
}

/// The outcome of a filtered search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shortlist {
    /// At most [`SHORTLIST_LEN`] videos, most viewed first.
    pub videos: Vec<VideoCandidate>,
    /// The tier the selection settled on after any relaxation.
    pub tier: ViewTier,
}

/// Narrow candidates to the shortlist, relaxing the view tier as needed.
///
/// Every returned video has at least `shortlist.tier.threshold()` views.
#[must_use]
pub fn select_shortlist(candidates: &[VideoCandidate], requested: ViewTier) -> Shortlist {
    let mut accepted: Vec<VideoCandidate> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut settled = requested;

    for tier in requested.relaxations() {
        settled = tier;
        for candidate in candidates {
            if candidate.views >= tier.threshold() && seen.insert(candidate.url.as_str()) {
                accepted.push(candidate.clone());
            }
        }
        if accepted.len() >= SHORTLIST_LEN {
            break;
        }
        debug!(
            tier = tier.as_str(),
            accepted = accepted.len(),
            "Too few videos at tier, relaxing"
        );
    }

    accepted.sort_by(|a, b| b.views.cmp(&a.views));
    accepted.truncate(SHORTLIST_LEN);

    Shortlist {
        videos: accepted,
        tier: settled,
    }
}

/// Search for videos and build the shortlist.
///
/// # Errors
///
/// Returns an error if either API call fails. No search hits is not an
/// error: the shortlist is simply empty.
pub async fn search_videos(
    youtube: &YouTubeClient,
    query: &str,
    filter: &VideoFilter,
) -> Result<Shortlist, ApiError> {
    let request = SearchRequest {
        query,
        max_results: VIDEO_SEARCH_CAP,
        published_after: filter.recency.window().map(|w| Utc::now() - w),
        duration: filter.duration.api_value(),
    };
    let hits = youtube.search(&request).await?;
    if hits.is_empty() {
        debug!(query = %query, "Video search returned nothing");
        return Ok(Shortlist {
            videos: Vec::new(),
            tier: filter.min_views,
        });
    }

    let ids: Vec<String> = hits.iter().map(|h| h.video_id.clone()).collect();
    let stats = youtube.video_stats(&ids).await?;

    let candidates: Vec<VideoCandidate> = hits
        .into_iter()
        .map(|hit| {
            let stat = stats.iter().find(|s| s.video_id == hit.video_id);
            VideoCandidate {
                url: video_url(&hit.video_id),
                title: hit.title,
                thumbnail: hit.thumbnail,
                views: stat.map_or(0, |s| s.views),
                published_at: hit.published_at,
                duration: format_duration(stat.map_or("", |s| s.duration.as_str())),
            }
        })
        .collect();

    let shortlist = select_shortlist(&candidates, filter.min_views);
    info!(
        query = %query,
        raw = candidates.len(),
        shortlisted = shortlist.videos.len(),
        tier = shortlist.tier.as_str(),
        "Built video shortlist"
    );
    Ok(shortlist)
}

/// Like [`search_videos`], but failures are logged and yield an empty shortlist.
pub async fn find_videos(youtube: &YouTubeClient, query: &str, filter: &VideoFilter) -> Shortlist {
    match search_videos(youtube, query, filter).await {
        Ok(shortlist) => shortlist,
        Err(e) if e.is_empty() => {
            warn!(query = %query, "Search hits had no video details, dropping them");
            Shortlist {
                videos: Vec::new(),
                tier: filter.min_views,
            }
        }
        Err(e) => {
            error!(query = %query, "Error fetching videos: {e}");
            Shortlist {
                videos: Vec::new(),
                tier: filter.min_views,
            }
        }
    }
}

/// Quick lookup of a few short tutorial videos for a draft, without statistics.
///
/// Failures are logged and yield an empty list.
pub async fn video_options(youtube: &YouTubeClient, query: &str) -> Vec<VideoCandidate> {
    let query = format!("{query} tutorial");
    let request = SearchRequest {
        query: &query,
        max_results: u32::try_from(SHORTLIST_LEN).unwrap_or(3),
        published_after: None,
        duration: DurationBucket::Short.api_value(),
    };
    match youtube.search(&request).await {
        Ok(hits) => hits
            .into_iter()
            .map(|hit| VideoCandidate {
                url: video_url(&hit.video_id),
                title: hit.title,
                thumbnail: hit.thumbnail,
                views: 0,
                published_at: hit.published_at,
                duration: "0:00".to_string(),
            })
            .collect(),
        Err(e) => {
            error!(query = %query, "Error fetching videos: {e}");
            Vec::new()
        }
    }
}

/// Compact view count for display, e.g. `1.2M` or `55K`.
#[must_use]
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{}K", views / 1_000)
    } else {
        views.to_string()
    }
}
