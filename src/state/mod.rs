// State module - Test outcome storage
// Centralized management of suite runs, outcome records and statistics

pub mod metrics;
pub mod result;

pub use metrics::{DurationStats, SuiteTiming};
pub use result::{NO_SKIP_REASON, TestOutcome, UNNAMED_TEST};

use chrono::{DateTime, Local};
use std::sync::{Mutex, PoisonError};

/// Test status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    /// Upper-case status word used in console and HTML output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Passed => "✓",
            Self::Failed => "✗",
            Self::Skipped => "⊗",
        }
    }

    /// CSS class for HTML badges and cards
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only, thread-safe store of outcome records for one suite run.
///
/// All workers append through a single mutex, so each record becomes visible
/// to [`snapshot`](Self::snapshot) whole or not at all, and the stored order is
/// the order in which appends acquired the lock.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    outcomes: Mutex<Vec<TestOutcome>>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a test outcome
    pub fn append(&self, outcome: TestOutcome) {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outcome);
    }

    /// Consistent copy of the records appended so far
    pub fn snapshot(&self) -> Snapshot {
        let outcomes = self
            .outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Snapshot { outcomes }
    }

    pub fn duration_stats(&self) -> DurationStats {
        let outcomes = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner);
        DurationStats::from_durations(outcomes.iter().map(|o| o.duration_ms))
    }

    pub fn len(&self) -> usize {
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_snapshot(self) -> Snapshot {
        Snapshot {
            outcomes: self
                .outcomes
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}

/// Immutable view of a suite's outcomes.
///
/// Every count is derived from `outcomes` on demand; nothing is tracked
/// separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    outcomes: Vec<TestOutcome>,
}

impl Snapshot {
    /// Records in completion order
    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.count(TestStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(TestStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(TestStatus::Skipped)
    }

    /// Percentage of passed tests, 0.0 for an empty suite
    pub fn pass_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.passed() as f64 * 100.0 / total as f64
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn duration_stats(&self) -> DurationStats {
        DurationStats::from_durations(self.outcomes.iter().map(|o| o.duration_ms))
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == TestStatus::Failed)
    }

    fn count(&self, status: TestStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// One execution of a named suite, from start event to finish event.
///
/// A run is consumed by [`freeze`](Self::freeze); a new execution needs a new
/// run.
#[derive(Debug)]
pub struct SuiteRun {
    name: String,
    start_time: DateTime<Local>,
    aggregator: ResultAggregator,
}

impl SuiteRun {
    pub fn start(name: impl Into<String>, start_time: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            start_time,
            aggregator: ResultAggregator::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn record(&self, outcome: TestOutcome) {
        self.aggregator.append(outcome);
    }

    /// Set the end time and hand back the final, read-only state.
    ///
    /// An end time earlier than the start (clock adjustment) is clamped to the
    /// start time.
    pub fn freeze(self, end_time: DateTime<Local>) -> (SuiteInfo, Snapshot) {
        let end_time = end_time.max(self.start_time);
        let info = SuiteInfo {
            name: self.name,
            timing: SuiteTiming {
                start_time: self.start_time,
                end_time: Some(end_time),
            },
        };
        (info, self.aggregator.into_snapshot())
    }
}

/// Identity and timing of a finished suite run
#[derive(Debug, Clone)]
pub struct SuiteInfo {
    pub name: String,
    pub timing: SuiteTiming,
}

impl SuiteInfo {
    pub fn total_duration_ms(&self) -> u64 {
        self.timing.total_duration_ms()
    }
}
