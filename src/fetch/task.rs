//! Fetch task identity.
//!
//! Every `fetch()` call allocates a task id from a counter owned by the
//! issuing coordinator. The id is the only ordering signal used to detect
//! superseded completions; execution units may be reused by the runtime, so
//! object identity is not reliable.

use std::time::{Duration, Instant};

/// Identifier of one fetch attempt.
///
/// Ids are monotonically increasing within a coordinator instance. A
/// completion is fresh iff its id is at least the last completed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw task sequence number.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw sequence number.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// One fetch attempt handed to the executor.
///
/// Owned by the coordinator for its lifetime; the executor borrows it for
/// the duration of exactly one request and does not outlive it.
#[derive(Debug)]
pub struct FetchTask {
    /// Identity of this attempt
    pub id: TaskId,
    /// Ad request URL
    pub url: String,
    /// User-Agent header value for the request
    pub user_agent: String,
    /// When the task was issued
    pub issued_at: Instant,
}

impl FetchTask {
    /// Creates a task bound to the given id and url.
    pub fn new(id: TaskId, url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            user_agent: user_agent.into(),
            issued_at: Instant::now(),
        }
    }

    /// Elapsed time since the task was issued.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.issued_at.elapsed()
    }
}
