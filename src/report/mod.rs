// Report module - Console and HTML reporting

pub mod console;
pub mod format;
pub mod html;
pub mod writer;

use crate::state::{Snapshot, SuiteInfo, TestOutcome};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;

pub use console::ConsoleReporter;
pub use html::{HtmlRenderer, HtmlReporter, escape_html};
pub use writer::{ReportWriter, report_file_name};

/// Reporter trait
///
/// Per-test hooks may be called concurrently from several worker threads.
/// `on_suite_end` is called once, after every worker has finished, with a
/// snapshot that no longer changes.
pub trait Reporter: Send + Sync {
    /// Called when the suite starts
    fn on_suite_start(&self, _suite_name: &str, _start_time: &DateTime<Local>) {}

    /// Called when a test starts
    fn on_test_start(&self, test_id: &str, description: Option<&str>);

    /// Called when a test outcome has been recorded
    fn on_test_end(&self, outcome: &TestOutcome);

    /// Called when the entire suite finishes. Returns the path of the file
    /// written, if the reporter writes one.
    fn on_suite_end(&self, suite: &SuiteInfo, snapshot: &Snapshot) -> Result<Option<PathBuf>>;
}
