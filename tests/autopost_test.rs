//! Integration tests for the unattended posting loop.

use std::time::Duration;

use niche_poster::autopost::{AutoPoster, Template, TickOutcome};
use niche_poster::config::Config;
use niche_poster::publisher::Publisher;
use niche_poster::x::XClient;
use niche_poster::youtube::YouTubeClient;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_poster(server: &MockServer) -> AutoPoster {
    let config = Config {
        x_api_base: server.uri(),
        youtube_api_base: server.uri(),
        ..Config::for_testing()
    };
    let http = reqwest::Client::new();
    AutoPoster::with_templates(
        YouTubeClient::new(http.clone(), &config),
        Publisher::new(XClient::new(http, &config)),
        vec![Template::new("Learn Rust this week.", "rust basics")],
    )
}

async fn mount_videos(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "rust basics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": { "videoId": "low" }, "snippet": { "title": "Low" } },
                { "id": { "videoId": "top" }, "snippet": { "title": "Top" } }
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": "low", "statistics": { "viewCount": "10" }, "contentDetails": { "duration": "PT1M" } },
                { "id": "top", "statistics": { "viewCount": "5000" }, "contentDetails": { "duration": "PT2M" } }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_once_posts_most_viewed_video() {
    let server = MockServer::start().await;
    mount_videos(&server).await;

    let expected = "Learn Rust this week. Learn more: https://youtu.be/top";
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(body_json(json!({ "text": expected })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": "5", "text": expected } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = create_poster(&server).run_once().await.unwrap();
    assert_eq!(
        outcome,
        TickOutcome::Posted {
            post_id: "5".to_string(),
            text: expected.to_string(),
        }
    );
}

#[tokio::test]
async fn test_run_once_skips_without_video() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = create_poster(&server).run_once().await.unwrap();
    assert_eq!(
        outcome,
        TickOutcome::Skipped {
            query: "rust basics".to_string(),
        }
    );
}

#[tokio::test]
async fn test_run_once_skips_when_details_are_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": { "videoId": "gone" }, "snippet": { "title": "Gone" } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = create_poster(&server).run_once().await.unwrap();
    assert_eq!(
        outcome,
        TickOutcome::Skipped {
            query: "rust basics".to_string(),
        }
    );
}

#[tokio::test]
async fn test_run_once_propagates_publish_failure() {
    let server = MockServer::start().await;
    mount_videos(&server).await;

    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(create_poster(&server).run_once().await.is_err());
}

#[tokio::test]
async fn test_run_loop_stops_on_cancel() {
    let server = MockServer::start().await;
    mount_videos(&server).await;
    mount_create_ok(&server).await;

    let poster = create_poster(&server);
    let token = CancellationToken::new();
    token.cancel();

    tokio::time::timeout(
        Duration::from_secs(5),
        poster.run_loop(Duration::from_secs(3600), token),
    )
    .await
    .expect("loop should exit once cancelled");
}

async fn mount_create_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": "1", "text": "x" } })),
        )
        .mount(server)
        .await;
}
