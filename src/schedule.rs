//! Pending scheduled posts, persisted as a JSON array in a single file.
//!
//! The whole list is rewritten on every mutation. Writes go to a temporary
//! file in the same directory which is then renamed over the target, so a
//! crash mid-write leaves the previous list intact.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read schedule file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write schedule file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schedule file {path} is not a valid post list: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A post waiting for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPost {
    pub text: String,
    pub scheduled_time: DateTime<Utc>,
    /// Unix seconds handed to the remote API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<i64>,
    /// Id the platform returned; `None` if remote scheduling failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl ScheduledPost {
    #[must_use]
    pub fn new(text: String, scheduled_time: DateTime<Utc>, remote_id: Option<String>) -> Self {
        Self {
            text,
            scheduled_time,
            epoch: Some(scheduled_time.timestamp()),
            remote_id,
        }
    }

    #[must_use]
    pub fn display_time(&self) -> String {
        self.scheduled_time.format("%Y-%m-%d %H:%M UTC").to_string()
    }

    /// Whether the platform accepted the scheduling request.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.remote_id.is_some()
    }
}

/// The ordered list of pending posts and the file that backs it.
#[derive(Debug)]
pub struct ScheduleStore {
    path: PathBuf,
    posts: Vec<ScheduledPost>,
}

impl ScheduleStore {
    /// Load the store from `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let posts = load(&path)?;
        info!(path = %path.display(), count = posts.len(), "Loaded schedule");
        Ok(Self { path, posts })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn list(&self) -> &[ScheduledPost] {
        &self.posts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Add a post to the end of the list and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. The in-memory list is
    /// left unchanged in that case.
    pub fn append(&mut self, post: ScheduledPost) -> Result<(), StoreError> {
        self.posts.push(post);
        if let Err(e) = save(&self.path, &self.posts) {
            self.posts.pop();
            return Err(e);
        }
        debug!(count = self.posts.len(), "Appended scheduled post");
        Ok(())
    }

    /// Remove the post at `index` and persist.
    ///
    /// An out-of-range index is ignored: nothing changes and `Ok(None)` is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. The in-memory list is
    /// left unchanged in that case.
    pub fn remove(&mut self, index: usize) -> Result<Option<ScheduledPost>, StoreError> {
        if index >= self.posts.len() {
            return Ok(None);
        }
        let removed = self.posts.remove(index);
        if let Err(e) = save(&self.path, &self.posts) {
            self.posts.insert(index, removed);
            return Err(e);
        }
        debug!(index, count = self.posts.len(), "Removed scheduled post");
        Ok(Some(removed))
    }
}

/// Read a post list from `path`; a missing file yields an empty list.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON post list.
pub fn load(path: &Path) -> Result<Vec<ScheduledPost>, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Atomically replace the file at `path` with `posts`.
///
/// # Errors
///
/// Returns an error if the directory, temporary file or rename fails.
pub fn save(path: &Path, posts: &[ScheduledPost]) -> Result<(), StoreError> {
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(write_err)?;

    let json = serde_json::to_vec_pretty(posts)
        .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
    tmp.write_all(&json).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Default delivery time for a new post given how many are already pending.
///
/// Posts are spaced a random `min_hours..=max_hours` apart per pending post,
/// so the first goes out immediately and later ones roughly that far apart.
/// Returns `None` if the slot falls outside the representable date range.
#[allow(clippy::cast_possible_truncation)]
pub fn next_slot(
    now: DateTime<Utc>,
    pending: usize,
    min_hours: u64,
    max_hours: u64,
    rng: &mut impl Rng,
) -> Option<DateTime<Utc>> {
    let spacing = if min_hours >= max_hours {
        min_hours as f64
    } else {
        rng.gen_range(min_hours as f64..=max_hours as f64)
    };
    let offset_ms = pending as f64 * spacing * 3_600_000.0;
    now.checked_add_signed(Duration::milliseconds(offset_ms as i64))
}

/// Parse an operator-entered time (`YYYY-MM-DDTHH:MM`, interpreted as UTC).
#[must_use]
pub fn parse_post_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn post(text: &str) -> ScheduledPost {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        ScheduledPost::new(text.to_string(), at, None)
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ScheduleStore::open(dir.path().join("posts.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            ScheduleStore::open(&path),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_append_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("posts.json");
        let mut store = ScheduleStore::open(&path).unwrap();
        store.append(post("one")).unwrap();
        store.append(post("two")).unwrap();

        let reopened = ScheduleStore::open(&path).unwrap();
        assert_eq!(reopened.list(), store.list());
        assert_eq!(reopened.list()[1].text, "two");
    }

    #[test]
    fn test_remove_by_index() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        let mut store = ScheduleStore::open(&path).unwrap();
        for text in ["a", "b", "c"] {
            store.append(post(text)).unwrap();
        }
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.map(|p| p.text), Some("b".to_string()));
        let texts: Vec<_> = load(&path).unwrap().into_iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        let mut store = ScheduleStore::open(&path).unwrap();
        store.append(post("only")).unwrap();
        let before = std::fs::read(&path).unwrap();

        assert_eq!(store.remove(1).unwrap(), None);
        assert_eq!(store.remove(usize::MAX).unwrap(), None);
        assert_eq!(store.len(), 1);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_remove_on_empty_store_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("posts.json");
        let mut store = ScheduleStore::open(&path).unwrap();
        assert_eq!(store.remove(0).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_epoch_matches_time() {
        let p = post("x");
        assert_eq!(p.epoch, Some(p.scheduled_time.timestamp()));
        assert_eq!(p.display_time(), "2025-03-01 12:00 UTC");
        assert!(!p.is_confirmed());
    }

    #[test]
    fn test_next_slot_spacing() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(next_slot(now, 0, 7, 9, &mut rng), Some(now));

        for pending in 1..5usize {
            let slot = next_slot(now, pending, 7, 9, &mut rng).unwrap();
            let hours = (slot - now).num_minutes() as f64 / 60.0;
            let n = pending as f64;
            assert!(hours >= 7.0 * n - 0.1 && hours <= 9.0 * n + 0.1, "{hours}");
        }

        let fixed = next_slot(now, 2, 8, 8, &mut rng);
        assert_eq!(fixed, Some(now + Duration::hours(16)));
    }

    #[test]
    fn test_next_slot_out_of_range() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            next_slot(now, 1, 10_000_000_000, 10_000_000_000, &mut rng),
            None
        );
    }

    #[test]
    fn test_parse_post_time() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_post_time("2025-06-01T09:30"), Some(expected));
        assert_eq!(parse_post_time(" 2025-06-01 09:30 "), Some(expected));
        assert_eq!(parse_post_time("tomorrow"), None);
        assert_eq!(parse_post_time(""), None);
    }
}
