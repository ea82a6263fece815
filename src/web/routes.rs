use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Form;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};

use super::flash::Flash;
use super::pages::{render_home_page, HomePageParams};
use super::AppState;
use crate::candidates::{build_candidates, SearchMode};
use crate::compose::compose_message;
use crate::schedule::{next_slot, parse_post_time, ScheduledPost};
use crate::videos::{DurationBucket, Recency, VideoFilter, ViewTier};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home).post(find_candidates))
        .route("/schedule", post(schedule_post))
        .route("/post-now", post(post_now))
        .route("/remove", post(remove_post))
        .route("/healthz", get(health))
}

/// Trimmed value of an optional form field, `None` when blank.
fn field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    notice: Option<String>,
    error: Option<String>,
}

async fn home(State(state): State<AppState>, Query(query): Query<FlashQuery>) -> Response {
    let flash = field(query.error.as_deref())
        .or_else(|| field(query.notice.as_deref()))
        .and_then(Flash::from_code);

    let store = state.store.lock().await;
    let html = render_home_page(&HomePageParams {
        scheduled: store.list(),
        flash,
        ..HomePageParams::default()
    });
    Html(html.into_string()).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    niche: Option<String>,
    mode: Option<String>,
    min_views: Option<String>,
    recency: Option<String>,
    duration: Option<String>,
    hashtags: Option<String>,
}

async fn find_candidates(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Response {
    let Some(niche) = field(form.niche.as_deref()) else {
        return Flash::MissingNiche.redirect().into_response();
    };

    let mode = SearchMode::from_form(field(form.mode.as_deref()).unwrap_or_default());
    let filter = VideoFilter {
        min_views: ViewTier::from_form(field(form.min_views.as_deref()).unwrap_or_default()),
        recency: Recency::from_form(field(form.recency.as_deref()).unwrap_or_default()),
        duration: DurationBucket::from_form(field(form.duration.as_deref()).unwrap_or_default()),
    };
    let hashtags = field(form.hashtags.as_deref()).unwrap_or_default();

    let candidates = build_candidates(&state.services, niche, mode, &filter).await;

    let store = state.store.lock().await;
    let html = render_home_page(&HomePageParams {
        niche,
        mode,
        filter,
        hashtags,
        candidates: Some(&candidates),
        scheduled: store.list(),
        flash: None,
    });
    Html(html.into_string()).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct ComposeForm {
    draft: Option<String>,
    video: Option<String>,
    hashtags: Option<String>,
    post_time: Option<String>,
}

async fn schedule_post(State(state): State<AppState>, Form(form): Form<ComposeForm>) -> Response {
    let Some(draft) = field(form.draft.as_deref()) else {
        return Flash::MissingDraft.redirect().into_response();
    };
    let requested = match field(form.post_time.as_deref()) {
        Some(raw) => match parse_post_time(raw) {
            Some(at) => Some(at),
            None => {
                warn!(post_time = %raw, "Rejected unparsable post time");
                return Flash::BadTime.redirect().into_response();
            }
        },
        None => None,
    };

    let text = compose_message(draft, field(form.video.as_deref()), field(form.hashtags.as_deref()));

    // Held across the remote call so concurrent submissions get distinct slots.
    let mut store = state.store.lock().await;
    let at = match requested {
        Some(at) => at,
        None => {
            let slot = next_slot(
                Utc::now(),
                store.len(),
                state.config.schedule_spacing_min_hours,
                state.config.schedule_spacing_max_hours,
                &mut rand::thread_rng(),
            );
            let Some(at) = slot else {
                warn!(pending = store.len(), "Default post time is out of range");
                return Flash::BadTime.redirect().into_response();
            };
            at
        }
    };

    let remote_id = match state.services.publisher.schedule(&text, at).await {
        Ok(id) => Some(id),
        Err(e) => {
            error!(error = %e, "Remote scheduling failed, keeping the local entry");
            None
        }
    };
    let confirmed = remote_id.is_some();

    if let Err(e) = store.append(ScheduledPost::new(text, at, remote_id)) {
        error!(error = %e, "Failed to save schedule");
        return Flash::StoreFailed.redirect().into_response();
    }

    if confirmed {
        Flash::Scheduled.redirect().into_response()
    } else {
        Flash::ScheduledLocally.redirect().into_response()
    }
}

async fn post_now(State(state): State<AppState>, Form(form): Form<ComposeForm>) -> Response {
    let Some(draft) = field(form.draft.as_deref()) else {
        return Flash::MissingDraft.redirect().into_response();
    };

    let text = compose_message(draft, field(form.video.as_deref()), field(form.hashtags.as_deref()));

    match state.services.publisher.publish_now(&text).await {
        Ok(_) => Flash::Posted.redirect().into_response(),
        Err(e) => {
            error!(error = %e, "Failed to publish post");
            Flash::PostFailed.redirect().into_response()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoveForm {
    index: Option<String>,
}

async fn remove_post(State(state): State<AppState>, Form(form): Form<RemoveForm>) -> Response {
    let Some(index) = field(form.index.as_deref()).and_then(|v| v.parse::<usize>().ok()) else {
        return Flash::BadIndex.redirect().into_response();
    };

    let mut store = state.store.lock().await;
    match store.remove(index) {
        Ok(Some(post)) => {
            info!(index, text = %post.text, "Removed scheduled post");
            Flash::Removed.redirect().into_response()
        }
        // Out of range: nothing to do.
        Ok(None) => Redirect::to("/").into_response(),
        Err(e) => {
            error!(error = %e, "Failed to save schedule");
            Flash::StoreFailed.redirect().into_response()
        }
    }
}

async fn health() -> &'static str {
    "OK"
}
