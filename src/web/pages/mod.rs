//! Maud-based page templates for the web UI.

pub mod home;

pub use home::{render_home_page, HomePageParams};
