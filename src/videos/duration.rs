use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").unwrap());

/// Render an ISO-8601 video duration (`PT#H#M#S`) as `m:ss`.
///
/// Hours fold into minutes. Missing components count as zero and anything
/// that does not parse renders as `0:00`.
#[must_use]
pub fn format_duration(iso: &str) -> String {
    let Some(caps) = ISO_DURATION.captures(iso.trim()) else {
        return "0:00".to_string();
    };
    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let Some(minutes) = part(1)
        .checked_mul(60)
        .and_then(|m| m.checked_add(part(2)))
    else {
        return "0:00".to_string();
    };
    let seconds = part(3);
    format!("{minutes}:{seconds:02}")
}
