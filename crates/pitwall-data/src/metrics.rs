use std::sync::atomic::{AtomicU64, Ordering};

/// API-usage counters, constructed once at startup and shared by `Arc`.
///
/// Relaxed ordering is enough — the counters are informational, nothing
/// branches on their exact values.
#[derive(Debug, Default)]
pub struct FeedMetrics {
    total: AtomicU64,
    success: AtomicU64,
    failed: AtomicU64,
    primary: AtomicU64,
    fallback: AtomicU64,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// A request was served by the primary endpoint.
    pub fn record_primary(&self) {
        self.primary.fetch_add(1, Ordering::Relaxed);
    }

    /// A request was served by the fallback endpoint.
    pub fn record_fallback(&self) {
        self.fallback.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> FeedStats {
        FeedStats {
            total: self.total.load(Ordering::Relaxed),
            success: self.success.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            primary: self.primary.load(Ordering::Relaxed),
            fallback: self.fallback.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    pub primary: u64,
    pub fallback: u64,
}

impl FeedStats {
    /// "92%"-style success rate; "0%" before any request was made.
    pub fn success_rate(&self) -> String {
        if self.total == 0 {
            return "0%".to_string();
        }
        format!("{}%", self.success * 100 / self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = FeedMetrics::new();
        metrics.record_request();
        metrics.record_request();
        metrics.record_success();
        metrics.record_failure();
        metrics.record_primary();
        metrics.record_fallback();

        let stats = metrics.snapshot();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.primary, 1);
        assert_eq!(stats.fallback, 1);
        assert_eq!(stats.success_rate(), "50%");
    }

    #[test]
    fn success_rate_handles_zero_requests() {
        assert_eq!(FeedMetrics::new().snapshot().success_rate(), "0%");
    }
}
