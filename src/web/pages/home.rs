//! The single operator page: niche search form, candidates and schedule.

use maud::{html, Markup, Render};

use crate::candidates::{CandidateGroup, CandidateSet, SearchMode};
use crate::components::{
    BaseLayout, Button, EmptyState, Form, FormGroup, Input, Radio, Select, Table, VideoCard,
};
use crate::schedule::ScheduledPost;
use crate::videos::{DurationBucket, Recency, VideoFilter, ViewTier};
use crate::web::flash::Flash;

/// Everything the home page shows.
#[derive(Debug, Default)]
pub struct HomePageParams<'a> {
    /// Last submitted niche, echoed back into the form.
    pub niche: &'a str,
    pub mode: SearchMode,
    pub filter: VideoFilter,
    pub hashtags: &'a str,
    /// Present after a search.
    pub candidates: Option<&'a CandidateSet>,
    pub scheduled: &'a [ScheduledPost],
    pub flash: Option<Flash>,
}

/// Render the home page.
#[must_use]
pub fn render_home_page(params: &HomePageParams<'_>) -> Markup {
    let content = html! {
        @if let Some(flash) = params.flash {
            (flash.alert())
        }

        h1 { "Find something to post" }
        (render_search_form(params))

        @if let Some(set) = params.candidates {
            (render_candidates(set, params))
        }

        h2 { "Scheduled posts" }
        (render_schedule(params.scheduled))
    };

    BaseLayout::new("Home").render(content)
}

fn render_search_form(params: &HomePageParams<'_>) -> Markup {
    let mut min_views = Select::new("min_views").id("min_views");
    for tier in ViewTier::ORDER {
        min_views = min_views.option(tier.as_str(), tier.label());
    }
    let mut recency = Select::new("recency").id("recency");
    for r in Recency::ALL {
        recency = recency.option(r.as_str(), r.label());
    }
    let mut duration = Select::new("duration").id("duration");
    for d in DurationBucket::ALL {
        duration = duration.option(d.as_str(), d.label());
    }

    let mode = Select::new("mode")
        .id("mode")
        .option(SearchMode::Tweets.as_str(), "Trending posts + tutorials")
        .option(SearchMode::Videos.as_str(), "Top videos")
        .selected(params.mode.as_str());

    let fields = html! {
        (FormGroup::new(
            "Topic or niche",
            "niche",
            Input::text("niche")
                .id("niche")
                .value(params.niche)
                .placeholder("e.g. AI tools")
                .required()
                .render(),
        ))
        (FormGroup::new("Mode", "mode", mode.render()))
        div class="grid" {
            (FormGroup::new(
                "Minimum views",
                "min_views",
                min_views.selected(params.filter.min_views.as_str()).render(),
            ).help("Relaxed automatically when nothing qualifies"))
            (FormGroup::new(
                "Uploaded",
                "recency",
                recency.selected(params.filter.recency.as_str()).render(),
            ))
            (FormGroup::new(
                "Length",
                "duration",
                duration.selected(params.filter.duration.as_str()).render(),
            ))
        }
        (FormGroup::new(
            "Hashtags",
            "hashtags",
            Input::text("hashtags")
                .id("hashtags")
                .value(params.hashtags)
                .placeholder("#ai #tools")
                .render(),
        ).help("Appended to every composed post"))
        (Button::primary("Find candidates"))
    };

    Form::post("/", fields).class("search").render()
}

fn render_candidates(set: &CandidateSet, params: &HomePageParams<'_>) -> Markup {
    html! {
        section class="candidates" {
            h2 { "Candidates" }
            @if !set.trends.is_empty() {
                p class="trends" {
                    "Trending: "
                    @for (i, trend) in set.trends.iter().enumerate() {
                        @if i > 0 { ", " }
                        strong { (trend) }
                    }
                }
            }
            @if let Some(tier) = set.settled_tier {
                @if tier != params.filter.min_views {
                    p class="note" {
                        "Nothing reached " (params.filter.min_views.label())
                        ", so the list was relaxed to " (tier.label()) "."
                    }
                }
            }
            @if set.groups.is_empty() {
                (EmptyState::new("No drafts found for this niche."))
            }
            @for group in &set.groups {
                (render_group(group, params.hashtags))
            }
        }
    }
}

fn render_group(group: &CandidateGroup, hashtags: &str) -> Markup {
    let fields = html! {
        @if let [draft] = group.drafts.as_slice() {
            blockquote { (draft) }
            (Input::hidden("draft", draft))
        } @else {
            fieldset {
                legend { "Draft" }
                @for (i, draft) in group.drafts.iter().enumerate() {
                    (Radio::new("draft", draft, html! { (draft) }).checked(i == 0))
                }
            }
        }

        @if group.videos.is_empty() {
            (EmptyState::no_videos())
        } @else {
            fieldset {
                legend { "Video" }
                @for (i, video) in group.videos.iter().enumerate() {
                    @let card = VideoCard::new(video, "video").checked(i == 0);
                    @if group.has_stats {
                        (card)
                    } @else {
                        (card.without_stats())
                    }
                }
            }
        }

        (Input::hidden("hashtags", hashtags))
        (FormGroup::new("Post at (UTC)", "post_time", Input::datetime("post_time").render())
            .help("Leave empty to take the next free slot"))
        div class="actions" {
            (Button::primary("Schedule"))
            " "
            (Button::outline("Post now").formaction("/post-now"))
        }
    };

    Form::post("/schedule", fields).class("candidate").render()
}

fn render_schedule(posts: &[ScheduledPost]) -> Markup {
    if posts.is_empty() {
        return EmptyState::no_scheduled().render();
    }

    let rows = posts
        .iter()
        .enumerate()
        .map(|(index, post)| {
            let index = index.to_string();
            html! {
                tr {
                    td { (index) }
                    td { (post.display_time()) }
                    td { (post.text) }
                    td {
                        @if post.is_confirmed() {
                            span class="badge ok" { "scheduled on X" }
                        } @else {
                            span class="badge warn" { "not confirmed remotely" }
                        }
                    }
                    td {
                        (Form::post("/remove", html! {
                            (Input::hidden("index", &index))
                            (Button::danger("Remove"))
                        }))
                    }
                }
            }
        })
        .collect();

    Table::new(vec!["#", "When", "Post", "Status", ""])
        .rows(rows)
        .class("schedule-table")
        .render()
}
