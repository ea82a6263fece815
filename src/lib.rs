//! Niche Poster library.
//!
//! Finds trending terms and popular videos for a niche, composes short
//! posts around them, and publishes or schedules those posts on X. An
//! operator drives it through a local web form; an optional background
//! task posts canned templates on a timer.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod autopost;
pub mod candidates;
pub mod components;
pub mod compose;
pub mod config;
pub mod constants;
pub mod drafts;
pub mod error;
pub mod publisher;
pub mod schedule;
pub mod services;
pub mod trends;
pub mod videos;
pub mod web;
pub mod x;
pub mod youtube;
