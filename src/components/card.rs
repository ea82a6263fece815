//! Card components for video candidates and empty states.

use maud::{html, Markup, Render};

use super::form::Radio;
use crate::videos::{format_views, VideoCandidate};

/// A selectable video: radio button, thumbnail, title and stats.
#[derive(Debug, Clone)]
pub struct VideoCard<'a> {
    pub video: &'a VideoCandidate,
    /// Name of the radio group the card belongs to.
    pub field: &'a str,
    pub checked: bool,
    /// Whether view count and duration are known for this video.
    pub show_stats: bool,
}

impl<'a> VideoCard<'a> {
    #[must_use]
    pub const fn new(video: &'a VideoCandidate, field: &'a str) -> Self {
        Self {
            video,
            field,
            checked: false,
            show_stats: true,
        }
    }

    #[must_use]
    pub const fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub const fn without_stats(mut self) -> Self {
        self.show_stats = false;
        self
    }
}

impl Render for VideoCard<'_> {
    fn render(&self) -> Markup {
        let video = self.video;
        let label = html! {
            span class="video-card" {
                @if !video.thumbnail.is_empty() {
                    img src=(video.thumbnail) alt="" loading="lazy" width="120" height="90";
                }
                span class="video-info" {
                    a href=(video.url) target="_blank" rel="noopener noreferrer" { (video.title) }
                    @if self.show_stats {
                        small class="video-meta" {
                            (format_views(video.views)) " views · " (video.duration)
                            @if let Some(published) = video.published_at {
                                " · " (published.format("%Y-%m-%d"))
                            }
                        }
                    }
                }
            }
        };
        Radio::new(self.field, &video.url, label)
            .checked(self.checked)
            .render()
    }
}

/// Placeholder paragraph for an empty list.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
}

impl<'a> EmptyState<'a> {
    #[must_use]
    pub const fn new(message: &'a str) -> Self {
        Self { message }
    }

    #[must_use]
    pub const fn no_videos() -> Self {
        Self {
            message: "No videos matched. Try a looser filter.",
        }
    }

    #[must_use]
    pub const fn no_scheduled() -> Self {
        Self {
            message: "Nothing scheduled yet.",
        }
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            p class="empty" { (self.message) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> VideoCandidate {
        VideoCandidate {
            url: "https://youtu.be/abc".to_string(),
            title: "Rust in 100 seconds".to_string(),
            thumbnail: "https://i.ytimg.com/vi/abc/default.jpg".to_string(),
            views: 120_000,
            published_at: None,
            duration: "1:40".to_string(),
        }
    }

    #[test]
    fn test_video_card() {
        let v = video();
        let html = VideoCard::new(&v, "video").checked(true).render().into_string();
        assert!(html.contains(r#"value="https://youtu.be/abc""#));
        assert!(html.contains("Rust in 100 seconds"));
        assert!(html.contains("120K views"));
        assert!(html.contains("1:40"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_video_card_without_stats() {
        let v = video();
        let html = VideoCard::new(&v, "video").without_stats().render().into_string();
        assert!(!html.contains("views"));
    }

    #[test]
    fn test_empty_state() {
        let html = EmptyState::no_scheduled().render().into_string();
        assert!(html.contains("Nothing scheduled yet."));
    }
}
