//! Draft generation: message bodies before a link or hashtags are added.

use tracing::{debug, error};

use crate::compose::truncate_with_ellipsis;
use crate::constants::{MAX_DRAFT_LENGTH, MAX_TOPICS};
use crate::x::XClient;

/// Draft recorded when the search API fails part way through.
pub const DRAFT_ERROR: &str = "Error fetching tweet";

/// One draft per trend, lifted from the newest matching post.
///
/// Stops at the first API failure, recording [`DRAFT_ERROR`] in its place.
pub async fn drafts_for_trends(x: &XClient, niche: &str, trends: &[String]) -> Vec<String> {
    let mut drafts = Vec::new();
    for trend in trends.iter().take(MAX_TOPICS) {
        let query = format!("{niche} {trend} -is:retweet lang:en");
        match x.search_recent(&query, 10).await {
            Ok(posts) => match posts.first() {
                Some(post) => drafts.push(truncate_with_ellipsis(&post.text, MAX_DRAFT_LENGTH)),
                None => {
                    debug!(trend = %trend, "No post found for trend");
                    drafts.push(format!("No tweet found for {trend}"));
                }
            },
            Err(e) => {
                error!(niche = %niche, trend = %trend, "Error fetching tweets: {e}");
                drafts.push(DRAFT_ERROR.to_string());
                break;
            }
        }
    }
    drafts.truncate(MAX_TOPICS);
    drafts
}

/// Canned drafts that mention the topic; used when live posts aren't wanted.
#[must_use]
pub fn template_drafts(topic: &str) -> Vec<String> {
    let topic = topic.trim();
    vec![
        format!("Want to get better at {topic}? This quick video breaks it down."),
        format!("{topic} in under 10 minutes. Worth a watch!"),
        format!("Struggling with {topic}? Here's a tip that actually helps."),
        format!("The {topic} trick nobody told me about until today."),
        format!("Bookmark this one if you're serious about {topic}."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_drafts_mention_topic() {
        let drafts = template_drafts("  AI tools ");
        assert_eq!(drafts.len(), MAX_TOPICS);
        assert!(drafts.iter().all(|d| d.contains("AI tools")));
    }
}
