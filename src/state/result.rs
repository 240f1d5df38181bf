// Outcome record for one completed test

use crate::state::TestStatus;

/// Error message recorded for a skip that carries no cause
pub const NO_SKIP_REASON: &str = "No reason provided";

/// Shown in place of a blank test name
pub const UNNAMED_TEST: &str = "<unnamed>";

/// Result of one completed (or skipped) test method.
///
/// Records are built once by the listener and never mutated after they are
/// appended to a [`ResultAggregator`](crate::state::ResultAggregator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub name: String,
    pub description: Option<String>,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub error_message: Option<String>,
}

impl TestOutcome {
    /// Create a pass result
    pub fn pass(name: impl Into<String>, description: Option<String>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            description: non_empty(description),
            status: TestStatus::Passed,
            duration_ms,
            error_message: None,
        }
    }

    /// Create a fail result. The message is always present, possibly empty.
    pub fn fail(
        name: impl Into<String>,
        description: Option<String>,
        duration_ms: u64,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: non_empty(description),
            status: TestStatus::Failed,
            duration_ms,
            error_message: Some(error_message.into()),
        }
    }

    /// Create a skip result. Skipped tests never ran, so duration is zero.
    pub fn skip(
        name: impl Into<String>,
        description: Option<String>,
        cause: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: non_empty(description),
            status: TestStatus::Skipped,
            duration_ms: 0,
            error_message: Some(cause.unwrap_or_else(|| NO_SKIP_REASON.to_string())),
        }
    }
}

impl TestOutcome {
    /// Name for rendering, with [`UNNAMED_TEST`] for a blank name
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED_TEST
        } else {
            &self.name
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
