//! Request counters shared by every handler.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

const NEVER: i64 = i64::MIN;

/// Lock-free request statistics.
#[derive(Debug)]
pub struct RequestStats {
    total: AtomicU64,
    last_millis: AtomicI64,
}

impl RequestStats {
    pub fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            last_millis: AtomicI64::new(NEVER),
        }
    }

    /// Counts one request received at `at`.
    pub fn record(&self, at: DateTime<Utc>) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.last_millis
            .fetch_max(at.timestamp_millis(), Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn last_request_time(&self) -> Option<DateTime<Utc>> {
        match self.last_millis.load(Ordering::Relaxed) {
            NEVER => None,
            millis => DateTime::from_timestamp_millis(millis),
        }
    }

    /// Last request time as RFC 3339 with millisecond precision.
    pub fn last_request_rfc3339(&self) -> Option<String> {
        self.last_request_time()
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}
