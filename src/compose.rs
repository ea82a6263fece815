//! Merging a draft, a video link and hashtags into one post.

use crate::constants::{ELLIPSIS, MAX_POST_LENGTH};

/// Where hashtags go relative to the length cut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashtagPlacement {
    /// Hashtags are part of the text that gets truncated; output never exceeds the limit.
    #[default]
    BeforeTruncation,
    /// Truncate the draft and link first, then append hashtags. Can exceed the limit.
    AfterTruncation,
}

/// Compose a post from a draft, an optional video URL and optional hashtags.
///
/// Produces `"{draft} Learn more: {url} {hashtags}"`, cut to
/// [`MAX_POST_LENGTH`] characters with a trailing ellipsis when it overflows.
#[must_use]
pub fn compose_message(draft: &str, url: Option<&str>, hashtags: Option<&str>) -> String {
    compose_with(draft, url, hashtags, HashtagPlacement::BeforeTruncation)
}

/// Compose a post with an explicit hashtag placement.
#[must_use]
pub fn compose_with(
    draft: &str,
    url: Option<&str>,
    hashtags: Option<&str>,
    placement: HashtagPlacement,
) -> String {
    let mut message = match url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => format!("{draft} Learn more: {url}"),
        None => draft.to_string(),
    };
    let hashtags = hashtags.map(str::trim).filter(|h| !h.is_empty());

    match placement {
        HashtagPlacement::BeforeTruncation => {
            if let Some(tags) = hashtags {
                message.push(' ');
                message.push_str(tags);
            }
            truncate_with_ellipsis(&message, MAX_POST_LENGTH)
        }
        HashtagPlacement::AfterTruncation => {
            let mut message = truncate_with_ellipsis(&message, MAX_POST_LENGTH);
            if let Some(tags) = hashtags {
                message.push(' ');
                message.push_str(tags);
            }
            message
        }
    }
}

/// Cut `text` so the result, ellipsis included, is at most `max` characters.
///
/// Text that already fits is returned unchanged.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_short_message() {
        let msg = compose_message("Great tip", Some("https://youtu.be/abc"), Some("#ai"));
        assert_eq!(msg, "Great tip Learn more: https://youtu.be/abc #ai");
    }

    #[test]
    fn test_compose_without_url_or_hashtags() {
        assert_eq!(compose_message("Just text", None, None), "Just text");
        assert_eq!(compose_message("Just text", Some(""), Some("  ")), "Just text");
    }

    #[test]
    fn test_compose_truncates_to_limit() {
        let draft = "a".repeat(300);
        let msg = compose_message(&draft, Some("https://youtu.be/abc"), Some("#ai"));
        assert_eq!(msg.chars().count(), MAX_POST_LENGTH);
        assert!(msg.ends_with("..."));
    }

    #[test]
    fn test_compose_exactly_at_limit_is_untouched() {
        let url = "https://youtu.be/abc";
        let overhead = " Learn more: ".len() + url.len();
        let draft = "b".repeat(MAX_POST_LENGTH - overhead);
        let msg = compose_message(&draft, Some(url), None);
        assert_eq!(msg.chars().count(), MAX_POST_LENGTH);
        assert!(msg.ends_with(url));
    }

    #[test]
    fn test_truncation_respects_multibyte_chars() {
        let draft = "é".repeat(400);
        let msg = compose_message(&draft, None, None);
        assert_eq!(msg.chars().count(), MAX_POST_LENGTH);
        assert!(msg.starts_with('é'));
        assert!(msg.ends_with("..."));
    }

    #[test]
    fn test_hashtags_after_truncation_can_exceed_limit() {
        let draft = "c".repeat(300);
        let msg = compose_with(
            &draft,
            Some("https://youtu.be/abc"),
            Some("#rust #tips"),
            HashtagPlacement::AfterTruncation,
        );
        assert_eq!(msg.chars().count(), MAX_POST_LENGTH + " #rust #tips".len());
        assert!(msg.ends_with("... #rust #tips"));
    }

    #[test]
    fn test_hashtags_before_truncation_stay_within_limit() {
        let draft = "c".repeat(300);
        let msg = compose_with(
            &draft,
            Some("https://youtu.be/abc"),
            Some("#rust #tips"),
            HashtagPlacement::BeforeTruncation,
        );
        assert_eq!(msg.chars().count(), MAX_POST_LENGTH);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 140), "short");
        let long = "x".repeat(150);
        let cut = truncate_with_ellipsis(&long, 140);
        assert_eq!(cut.chars().count(), 140);
        assert_eq!(&cut[137..], "...");
    }
}
