//! Turning an operator's niche into draft and video candidates.

use tracing::info;

use crate::drafts::{drafts_for_trends, template_drafts};
use crate::services::Services;
use crate::trends::trending_topics;
use crate::videos::{find_videos, video_options, VideoCandidate, VideoFilter, ViewTier};

/// Where drafts come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Drafts lifted from live posts about trending terms, each paired with
    /// a few short tutorial videos.
    #[default]
    Tweets,
    /// Canned drafts plus one filtered, view-ranked video shortlist.
    Videos,
}

impl SearchMode {
    #[must_use]
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "videos" => Self::Videos,
            _ => Self::Tweets,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tweets => "tweets",
            Self::Videos => "videos",
        }
    }
}

/// Drafts and videos the operator picks one of each from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGroup {
    pub drafts: Vec<String>,
    pub videos: Vec<VideoCandidate>,
    /// Whether the videos carry view counts and durations.
    pub has_stats: bool,
}

/// Everything rendered for one niche search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    pub trends: Vec<String>,
    pub groups: Vec<CandidateGroup>,
    /// Tier the video shortlist settled on, in video mode.
    pub settled_tier: Option<ViewTier>,
}

/// Run the trend → draft → video pipeline for a niche.
///
/// Never fails: each stage degrades to placeholders or empty lists.
pub async fn build_candidates(
    services: &Services,
    niche: &str,
    mode: SearchMode,
    filter: &VideoFilter,
) -> CandidateSet {
    let set = match mode {
        SearchMode::Tweets => {
            let trends = trending_topics(services.trends.as_ref(), niche).await;
            let drafts = drafts_for_trends(&services.x, niche, &trends).await;
            let mut groups = Vec::with_capacity(drafts.len());
            for draft in drafts {
                let videos = video_options(&services.youtube, &format!("{niche} {draft}")).await;
                groups.push(CandidateGroup {
                    drafts: vec![draft],
                    videos,
                    has_stats: false,
                });
            }
            CandidateSet {
                trends,
                groups,
                settled_tier: None,
            }
        }
        SearchMode::Videos => {
            let shortlist = find_videos(&services.youtube, niche, filter).await;
            CandidateSet {
                trends: Vec::new(),
                groups: vec![CandidateGroup {
                    drafts: template_drafts(niche),
                    videos: shortlist.videos,
                    has_stats: true,
                }],
                settled_tier: Some(shortlist.tier),
            }
        }
    };
    info!(
        niche = %niche,
        mode = mode.as_str(),
        groups = set.groups.len(),
        "Built candidates"
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_form() {
        assert_eq!(SearchMode::from_form("videos"), SearchMode::Videos);
        assert_eq!(SearchMode::from_form("tweets"), SearchMode::Tweets);
        assert_eq!(SearchMode::from_form(""), SearchMode::Tweets);
    }
}
