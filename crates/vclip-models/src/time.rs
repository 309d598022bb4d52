//! Time ranges on the source video's timeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeRangeError {
    #[error("time range start {start} must be non-negative")]
    NegativeStart { start: f64 },
    #[error("time range end {end} must be greater than start {start}")]
    EndNotAfterStart { start: f64, end: f64 },
}

/// A half-open `[start, end)` interval in seconds on the source timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Result<Self, TimeRangeError> {
        if start < 0.0 {
            return Err(TimeRangeError::NegativeStart { start });
        }
        if end <= start {
            return Err(TimeRangeError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Overlap duration with `other`, clamped to zero when disjoint.
    pub fn overlap(&self, other: &TimeRange) -> f64 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0.0)
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_start() {
        assert!(TimeRange::new(-1.0, 5.0).is_err());
    }

    #[test]
    fn rejects_non_positive_duration() {
        assert!(TimeRange::new(5.0, 5.0).is_err());
        assert!(TimeRange::new(5.0, 4.0).is_err());
    }

    #[test]
    fn overlap_is_symmetric_and_clamped() {
        let a = TimeRange::new(0.0, 10.0).unwrap();
        let b = TimeRange::new(8.0, 20.0).unwrap();
        assert_eq!(a.overlap(&b), 2.0);
        assert_eq!(b.overlap(&a), 2.0);

        let c = TimeRange::new(10.0, 20.0).unwrap();
        assert_eq!(a.overlap(&c), 0.0);
    }

    #[test]
    fn duration_matches_span() {
        let r = TimeRange::new(3.0, 7.5).unwrap();
        assert!((r.duration() - 4.5).abs() < 1e-9);
    }
}
