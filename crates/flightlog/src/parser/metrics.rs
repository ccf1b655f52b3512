use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::model::SkipReason;

/// Out-of-band counters for one or more parse invocations.
///
/// Attaching a `ParseStats` never changes the sample sequence; it only lets a
/// caller find out how many lines were skipped or silently dropped.
///
/// # Memory Ordering
///
/// All operations use `Ordering::Relaxed`. `snapshot()` reads each counter
/// independently, so a snapshot taken mid-parse may be slightly torn.
#[derive(Debug, Default)]
pub struct ParseStats {
    lines_read: AtomicU64,
    lines_skipped: AtomicU64,
    header_lines: AtomicU64,
    rows_dropped: AtomicU64,
    samples_emitted: AtomicU64,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_line(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_sample(&self) {
        self.samples_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record why a line produced no sample
    #[inline]
    pub fn record_skip(&self, reason: &SkipReason) {
        let counter = match reason {
            SkipReason::Blank | SkipReason::Comment => &self.lines_skipped,
            SkipReason::Header => &self.header_lines,
            _ => &self.rows_dropped,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// True if at least one data row was rejected.
    pub fn dropped_any(&self) -> bool {
        self.rows_dropped.load(Ordering::Relaxed) > 0
    }

    pub fn snapshot(&self) -> ParseStatsSnapshot {
        ParseStatsSnapshot {
            lines_read: self.lines_read.load(Ordering::Relaxed),
            lines_skipped: self.lines_skipped.load(Ordering::Relaxed),
            header_lines: self.header_lines.load(Ordering::Relaxed),
            rows_dropped: self.rows_dropped.load(Ordering::Relaxed),
            samples_emitted: self.samples_emitted.load(Ordering::Relaxed),
        }
    }
}

/// A read-only copy of [`ParseStats`], suitable for logging or export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStatsSnapshot {
    pub lines_read: u64,
    /// Blank and comment lines
    pub lines_skipped: u64,
    pub header_lines: u64,
    /// Data rows rejected for missing or invalid required values
    pub rows_dropped: u64,
    pub samples_emitted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = ParseStats::new();
        for _ in 0..5 {
            stats.record_line();
        }
        stats.record_skip(&SkipReason::Comment);
        stats.record_skip(&SkipReason::Blank);
        stats.record_skip(&SkipReason::Header);
        stats.record_skip(&SkipReason::InvalidTime);
        stats.record_sample();

        let snap = stats.snapshot();
        assert_eq!(snap.lines_read, 5);
        assert_eq!(snap.lines_skipped, 2);
        assert_eq!(snap.header_lines, 1);
        assert_eq!(snap.rows_dropped, 1);
        assert_eq!(snap.samples_emitted, 1);
        assert!(stats.dropped_any());
    }

    #[test]
    fn test_fresh_stats_report_nothing_dropped() {
        let stats = ParseStats::new();
        assert!(!stats.dropped_any());
        assert_eq!(stats.snapshot(), ParseStatsSnapshot::default());
    }

    #[test]
    fn test_concurrent_updates() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(ParseStats::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.record_line();
                        stats.record_sample();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.lines_read, 4000);
        assert_eq!(snap.samples_emitted, 4000);
    }

    #[test]
    fn test_snapshot_serializes() {
        let stats = ParseStats::new();
        stats.record_line();
        let json = serde_json::to_string(&stats.snapshot()).unwrap();
        assert!(json.contains(r#""lines_read":1"#));
    }
}
