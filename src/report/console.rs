// Console reporter - fixed-width summary report emitted line by line

use super::Reporter;
use super::format::{center, format_duration, format_percent, pad_right, rule};
use crate::state::{Snapshot, SuiteInfo, TestOutcome, TestStatus};
use crate::time::format_display;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Outer width of the information, statistics and banner blocks
const BLOCK_WIDTH: usize = 79;
const LABEL_WIDTH: usize = 16;
const VALUE_WIDTH: usize = 57;

const NAME_COL: usize = 30;
const STATUS_COL: usize = 9;
const DURATION_COL: usize = 10;

const DETAIL_WIDTH: usize = 70;

/// Placeholder for a failure whose message is empty
pub const NO_ERROR_MESSAGE: &str = "No error message";
/// Placeholder for a missing description
pub const NO_DESCRIPTION: &str = "N/A";

/// Render the final suite report as a sequence of lines.
///
/// Pure: the same suite info and snapshot always produce the same lines.
pub fn render(suite: &SuiteInfo, snapshot: &Snapshot) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(rule('█', BLOCK_WIDTH + 1));
    lines.push(format!("█{}█", " ".repeat(BLOCK_WIDTH - 1)));
    lines.push(format!(
        "█{}█",
        center("TEST EXECUTION SUMMARY REPORT", BLOCK_WIDTH - 1)
    ));
    lines.push(format!("█{}█", " ".repeat(BLOCK_WIDTH - 1)));
    lines.push(rule('█', BLOCK_WIDTH + 1));

    let end = suite
        .timing
        .end_time
        .as_ref()
        .map(format_display)
        .unwrap_or_else(|| "-".to_string());

    lines.push(section_top("SUITE INFORMATION", BLOCK_WIDTH));
    lines.push(field("Suite Name", &suite.name));
    lines.push(field("Start Time", &format_display(&suite.timing.start_time)));
    lines.push(field("End Time", &end));
    lines.push(field(
        "Total Duration",
        &format_duration(suite.total_duration_ms()),
    ));
    lines.push(section_bottom(BLOCK_WIDTH));

    let durations = snapshot.duration_stats();
    lines.push(section_top("TEST STATISTICS", BLOCK_WIDTH));
    lines.push(field("Total Tests", &snapshot.total().to_string()));
    lines.push(field("Passed", &format!("{} ✓", snapshot.passed())));
    lines.push(field("Failed", &format!("{} ✗", snapshot.failed())));
    lines.push(field("Skipped", &format!("{} ⊗", snapshot.skipped())));
    lines.push(field("Pass Rate", &format_percent(snapshot.pass_rate())));
    lines.push(field(
        "Avg Duration",
        &format!(
            "{:.2}ms (min {}ms, max {}ms)",
            durations.avg_ms, durations.min_ms, durations.max_ms
        ),
    ));
    lines.push(section_bottom(BLOCK_WIDTH));

    if !snapshot.outcomes().is_empty() {
        lines.extend(results_table(snapshot.outcomes()));
    }

    if snapshot.failed() > 0 {
        let width = DETAIL_WIDTH + 10;
        lines.push(section_top("FAILED TESTS DETAILS", width));
        for outcome in snapshot.failures() {
            lines.push(format!(
                "│ Test:  {}│",
                pad_right(&single_line(outcome.display_name()), DETAIL_WIDTH)
            ));
            lines.push(format!(
                "│ Error: {}│",
                pad_right(&single_line(failure_message(outcome)), DETAIL_WIDTH)
            ));
        }
        lines.push(section_bottom(width));
    }

    let banner = if snapshot.all_passed() {
        "✓ ALL TESTS PASSED"
    } else {
        "✗ SOME TESTS FAILED"
    };
    lines.push(format!("┌{}┐", rule('─', BLOCK_WIDTH - 2)));
    lines.push(format!("│{}│", center(banner, BLOCK_WIDTH - 2)));
    lines.push(section_bottom(BLOCK_WIDTH));

    lines
}

fn results_table(outcomes: &[TestOutcome]) -> Vec<String> {
    let width = NAME_COL + STATUS_COL + DURATION_COL + 10;
    let mut lines = Vec::with_capacity(outcomes.len() + 4);

    lines.push(section_top("DETAILED TEST RESULTS", width));
    lines.push(format!(
        "│ {} │ {} │ {} │",
        pad_right("Test Name", NAME_COL),
        pad_right("Status", STATUS_COL),
        pad_right("Duration", DURATION_COL)
    ));
    lines.push(format!(
        "├─{}─┼─{}─┼─{}─┤",
        rule('─', NAME_COL),
        rule('─', STATUS_COL),
        rule('─', DURATION_COL)
    ));

    for outcome in outcomes {
        lines.push(format!(
            "│ {} │ {} │ {} │",
            pad_right(&single_line(outcome.display_name()), NAME_COL),
            pad_right(
                &format!("{} {}", outcome.status.symbol(), outcome.status),
                STATUS_COL
            ),
            pad_right(&format!("{}ms", outcome.duration_ms), DURATION_COL)
        ));
    }

    lines.push(format!(
        "└─{}─┴─{}─┴─{}─┘",
        rule('─', NAME_COL),
        rule('─', STATUS_COL),
        rule('─', DURATION_COL)
    ));
    lines
}

fn field(label: &str, value: &str) -> String {
    format!(
        "│ {} : {}│",
        pad_right(label, LABEL_WIDTH),
        pad_right(&single_line(value), VALUE_WIDTH)
    )
}

fn section_top(title: &str, width: usize) -> String {
    let head = format!("┌─ {} ", title);
    let fill = width.saturating_sub(head.chars().count() + 1);
    format!("{}{}┐", head, rule('─', fill))
}

fn section_bottom(width: usize) -> String {
    format!("└{}┘", rule('─', width - 2))
}

fn failure_message(outcome: &TestOutcome) -> &str {
    match outcome.error_message.as_deref() {
        Some(msg) if !msg.trim().is_empty() => msg,
        _ => NO_ERROR_MESSAGE,
    }
}

// Keeps every rendered line a single physical line.
fn single_line(value: &str) -> String {
    value.replace(['\r', '\n', '\t'], " ")
}

/// Console reporter
///
/// Emits one log line per lifecycle event while the suite runs and the
/// rendered summary once it finishes. Each line is a separate tracing event,
/// so concurrent workers never split a line.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn separator(&self) {
        info!("{}", rule('─', 80));
    }
}

impl Reporter for ConsoleReporter {
    fn on_suite_start(&self, suite_name: &str, start_time: &DateTime<Local>) {
        info!("{}", rule('=', 80));
        info!("TEST SUITE STARTED: {}", suite_name);
        info!("Start Time: {}", format_display(start_time));
        info!("{}", rule('=', 80));
    }

    fn on_test_start(&self, test_id: &str, description: Option<&str>) {
        info!("▶ TEST STARTED: {}", test_id);
        let description = description.filter(|d| !d.trim().is_empty());
        info!("  Description: {}", description.unwrap_or(NO_DESCRIPTION));
    }

    fn on_test_end(&self, outcome: &TestOutcome) {
        match outcome.status {
            TestStatus::Passed => {
                info!(
                    "✓ TEST PASSED: {} ({}ms)",
                    outcome.display_name(),
                    outcome.duration_ms
                );
            }
            TestStatus::Failed => {
                error!(
                    "✗ TEST FAILED: {} ({}ms)",
                    outcome.display_name(),
                    outcome.duration_ms
                );
                error!("  Error: {}", failure_message(outcome));
            }
            TestStatus::Skipped => {
                warn!("⊗ TEST SKIPPED: {}", outcome.display_name());
            }
        }
        self.separator();
    }

    fn on_suite_end(&self, suite: &SuiteInfo, snapshot: &Snapshot) -> Result<Option<PathBuf>> {
        let end = suite
            .timing
            .end_time
            .as_ref()
            .map(format_display)
            .unwrap_or_default();

        info!("{}", rule('=', 80));
        info!("TEST SUITE COMPLETED: {}", suite.name);
        info!("End Time: {}", end);
        info!("{}", rule('=', 80));

        for line in render(suite, snapshot) {
            info!("{}", line);
        }

        Ok(None)
    }
}
