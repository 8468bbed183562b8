//! Posting rate limits.
//!
//! Both checks are pure functions of a user's [`PostingHistory`] and the
//! current time. An empty history is never limited.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::PostId;

/// Length of the window used by [`check_hourly_limit`].
pub const HOURLY_WINDOW_SECS: i64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub post_id: PostId,
    pub posted_at: DateTime<Utc>,
}

/// A user's recent posts in insertion order, as kept by the request layer's session.
///
/// Entries appended in order are non-decreasing in time, but nothing here
/// relies on it: [`check_flood_interval`] always looks at the last appended entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostingHistory {
    entries: Vec<HistoryEntry>,
}

impl PostingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, post_id: PostId, posted_at: DateTime<Utc>) {
        self.entries.push(HistoryEntry { post_id, posted_at });
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Drops entries older than `cutoff`, keeping order. Returns how many were dropped.
    pub fn prune_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.posted_at >= cutoff);
        before - self.entries.len()
    }
}

impl FromIterator<HistoryEntry> for PostingHistory {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Seconds the user still has to wait before posting again, or 0 when allowed.
///
/// Looks only at the most recently appended entry and reports
/// `interval_secs - elapsed` while `elapsed <= interval_secs`.
pub fn check_flood_interval(history: &PostingHistory, interval_secs: u64, now: DateTime<Utc>) -> u64 {
    let Some(last) = history.last() else {
        return 0;
    };

    let interval = i64::try_from(interval_secs).unwrap_or(i64::MAX);
    let elapsed = (now - last.posted_at).num_seconds();

    if elapsed <= interval {
        u64::try_from(interval.saturating_sub(elapsed)).unwrap_or(u64::MAX)
    } else {
        0
    }
}

/// Whether the user has used up their posts for the trailing hour.
///
/// Entries exactly one hour old still count against the limit.
pub fn check_hourly_limit(history: &PostingHistory, max_per_hour: u32, now: DateTime<Utc>) -> bool {
    if history.is_empty() {
        return false;
    }

    let window_start = now - Duration::seconds(HOURLY_WINDOW_SECS);
    let recent = history
        .iter()
        .filter(|entry| entry.posted_at >= window_start)
        .count();

    recent >= max_per_hour as usize
}
