// Suite timing and duration statistics

use chrono::{DateTime, Local};

/// Min/max/average of outcome durations. All zero when there are no records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DurationStats {
    pub min_ms: u64,
    pub max_ms: u64,
    pub avg_ms: f64,
}

impl DurationStats {
    pub fn from_durations(durations: impl IntoIterator<Item = u64>) -> Self {
        let mut count = 0u64;
        let mut sum = 0u64;
        let mut min = u64::MAX;
        let mut max = 0u64;

        for d in durations {
            count += 1;
            sum = sum.saturating_add(d);
            min = min.min(d);
            max = max.max(d);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            min_ms: min,
            max_ms: max,
            avg_ms: sum as f64 / count as f64,
        }
    }
}

/// Wall-clock bounds of a suite run
#[derive(Debug, Clone)]
pub struct SuiteTiming {
    pub start_time: DateTime<Local>,
    pub end_time: Option<DateTime<Local>>,
}

impl SuiteTiming {
    /// Total duration in milliseconds; zero until the end time is set
    pub fn total_duration_ms(&self) -> u64 {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds().max(0) as u64)
            .unwrap_or(0)
    }
}
