//! Shared constants used across the application.

/// User agent string sent with every outbound API request.
pub const USER_AGENT: &str = concat!("niche-poster/", env!("CARGO_PKG_VERSION"));

/// Maximum length of a published post, in characters.
pub const MAX_POST_LENGTH: usize = 280;

/// Marker appended to text that had to be cut.
pub const ELLIPSIS: &str = "...";

/// Number of video candidates shown to the operator per query.
pub const SHORTLIST_LEN: usize = 3;

/// Raw search results requested before filtering.
pub const VIDEO_SEARCH_CAP: u32 = 20;

/// Upper bound on trends and drafts generated per niche.
pub const MAX_TOPICS: usize = 5;

/// Maximum length of a draft lifted from a live post.
pub const MAX_DRAFT_LENGTH: usize = 140;
