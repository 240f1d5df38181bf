// Lifecycle listener - turns test runner callbacks into recorded outcomes

use crate::config::Config;
use crate::error::LifecycleError;
use crate::report::{ConsoleReporter, HtmlRenderer, HtmlReporter, ReportWriter, Reporter};
use crate::state::{Snapshot, SuiteInfo, SuiteRun, TestOutcome};
use crate::time::{Clock, SystemClock};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, error, warn};

/// Externally visible listener state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Idle,
    Running,
    Finished,
}

enum Phase {
    Idle,
    Running(SuiteRun),
    Finished { suite: String },
}

impl Phase {
    fn state(&self) -> ListenerState {
        match self {
            Self::Idle => ListenerState::Idle,
            Self::Running(_) => ListenerState::Running,
            Self::Finished { .. } => ListenerState::Finished,
        }
    }
}

/// Final state of a suite run, returned once from
/// [`LifecycleListener::on_suite_finish`].
#[derive(Debug)]
pub struct SuiteReport {
    pub suite: SuiteInfo,
    pub snapshot: Snapshot,
    /// Files written by reporters, in reporter order
    pub report_files: Vec<PathBuf>,
    /// Reporter failures. The outcomes above are final regardless.
    pub reporter_errors: Vec<anyhow::Error>,
}

impl SuiteReport {
    pub fn reports_written(&self) -> bool {
        self.reporter_errors.is_empty()
    }
}

/// Adapter between a test runner's lifecycle callbacks and the outcome store.
///
/// State machine: `Idle -> Running -> Finished`. Per-test callbacks are
/// accepted only while running and may arrive concurrently from worker
/// threads; they share a read lock and append through the run's aggregator.
/// Suite start and finish take the write lock.
///
/// A second `on_suite_finish` is rejected with
/// [`LifecycleError::SuiteAlreadyFinished`]; nothing is rendered again. After
/// a finish, `on_suite_start` begins a fresh run.
pub struct LifecycleListener {
    clock: Arc<dyn Clock>,
    reporters: Vec<Box<dyn Reporter>>,
    phase: RwLock<Phase>,
}

impl LifecycleListener {
    /// Listener with no reporters; outcomes are still recorded
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            reporters: Vec::new(),
            phase: RwLock::new(Phase::Idle),
        }
    }

    /// Console and HTML reporters as enabled in `config`, on the system clock
    pub fn from_config(config: &Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let mut listener = Self::new(clock.clone());

        if config.report.console {
            listener = listener.with_reporter(Box::new(ConsoleReporter::new()));
        }
        if config.report.html {
            listener = listener.with_reporter(Box::new(HtmlReporter::new(
                HtmlRenderer::new(config.report.title.clone()),
                ReportWriter::new(clock),
                config.report.reports_dir.clone(),
            )));
        }

        listener
    }

    /// Reporters are notified in registration order
    pub fn with_reporter(mut self, reporter: Box<dyn Reporter>) -> Self {
        self.reporters.push(reporter);
        self
    }

    pub fn state(&self) -> ListenerState {
        self.phase
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state()
    }

    pub fn on_suite_start(&self, suite_name: &str) -> Result<(), LifecycleError> {
        let mut phase = self.phase.write().unwrap_or_else(PoisonError::into_inner);

        if let Phase::Running(run) = &*phase {
            return Err(usage(LifecycleError::SuiteAlreadyStarted {
                running: run.name().to_string(),
                requested: suite_name.to_string(),
            }));
        }

        let run = SuiteRun::start(suite_name, self.clock.now());
        for reporter in &self.reporters {
            reporter.on_suite_start(suite_name, &run.start_time());
        }
        *phase = Phase::Running(run);
        Ok(())
    }

    pub fn on_test_start(
        &self,
        test_id: &str,
        description: Option<&str>,
    ) -> Result<(), LifecycleError> {
        let phase = self.phase.read().unwrap_or_else(PoisonError::into_inner);
        running(&phase, "test start")?;

        for reporter in &self.reporters {
            reporter.on_test_start(test_id, description);
        }
        Ok(())
    }

    pub fn on_test_success(
        &self,
        test_id: &str,
        description: Option<&str>,
        duration_ms: u64,
    ) -> Result<(), LifecycleError> {
        self.record(
            "test success",
            TestOutcome::pass(test_id, description.map(str::to_string), duration_ms),
        )
    }

    /// `error_message` may be empty but is always recorded
    pub fn on_test_failure(
        &self,
        test_id: &str,
        description: Option<&str>,
        duration_ms: u64,
        error_message: &str,
    ) -> Result<(), LifecycleError> {
        self.record(
            "test failure",
            TestOutcome::fail(
                test_id,
                description.map(str::to_string),
                duration_ms,
                error_message,
            ),
        )
    }

    pub fn on_test_skipped(
        &self,
        test_id: &str,
        description: Option<&str>,
        cause: Option<&str>,
    ) -> Result<(), LifecycleError> {
        self.record(
            "test skipped",
            TestOutcome::skip(
                test_id,
                description.map(str::to_string),
                cause.map(str::to_string),
            ),
        )
    }

    /// Freeze the run and hand it to every reporter.
    ///
    /// Must be called after all per-test callbacks for the suite have
    /// returned. Reporter failures are logged and collected in the returned
    /// report; they never stop later reporters.
    pub fn on_suite_finish(&self, suite_name: &str) -> Result<SuiteReport, LifecycleError> {
        let run = {
            let mut phase = self.phase.write().unwrap_or_else(PoisonError::into_inner);
            match std::mem::replace(&mut *phase, Phase::Idle) {
                Phase::Running(run) if run.name() == suite_name => {
                    *phase = Phase::Finished {
                        suite: suite_name.to_string(),
                    };
                    run
                }
                other => {
                    let err = match &other {
                        Phase::Running(run) => LifecycleError::SuiteNameMismatch {
                            running: run.name().to_string(),
                            requested: suite_name.to_string(),
                        },
                        Phase::Idle => LifecycleError::SuiteNotStarted {
                            event: "suite finish",
                        },
                        Phase::Finished { suite } => LifecycleError::SuiteAlreadyFinished {
                            suite: suite.clone(),
                            event: "suite finish",
                        },
                    };
                    *phase = other;
                    return Err(usage(err));
                }
            }
        };

        let (suite, snapshot) = run.freeze(self.clock.now());
        debug!(
            "Suite '{}' frozen with {} outcomes",
            suite.name,
            snapshot.total()
        );

        let mut report_files = Vec::new();
        let mut reporter_errors = Vec::new();
        for reporter in &self.reporters {
            match reporter.on_suite_end(&suite, &snapshot) {
                Ok(Some(path)) => report_files.push(path),
                Ok(None) => {}
                Err(e) => {
                    error!("Reporter failed: {:#}", e);
                    reporter_errors.push(e);
                }
            }
        }

        Ok(SuiteReport {
            suite,
            snapshot,
            report_files,
            reporter_errors,
        })
    }

    fn record(&self, event: &'static str, outcome: TestOutcome) -> Result<(), LifecycleError> {
        let phase = self.phase.read().unwrap_or_else(PoisonError::into_inner);
        let run = running(&phase, event)?;

        run.record(outcome.clone());
        for reporter in &self.reporters {
            reporter.on_test_end(&outcome);
        }
        Ok(())
    }
}

fn running<'a>(phase: &'a Phase, event: &'static str) -> Result<&'a SuiteRun, LifecycleError> {
    match phase {
        Phase::Running(run) => Ok(run),
        Phase::Idle => Err(usage(LifecycleError::SuiteNotStarted { event })),
        Phase::Finished { suite } => Err(usage(LifecycleError::SuiteAlreadyFinished {
            suite: suite.clone(),
            event,
        })),
    }
}

fn usage(err: LifecycleError) -> LifecycleError {
    warn!("Lifecycle usage error: {}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TestStatus;
    use crate::time::FixedClock;

    fn listener() -> LifecycleListener {
        let clock = FixedClock::at("2024-03-01 10:00:00").expect("valid instant");
        LifecycleListener::new(Arc::new(clock))
    }

    #[test]
    fn test_state_transitions() {
        let listener = listener();
        assert_eq!(listener.state(), ListenerState::Idle);

        listener.on_suite_start("Regression").expect("start");
        assert_eq!(listener.state(), ListenerState::Running);

        listener.on_suite_finish("Regression").expect("finish");
        assert_eq!(listener.state(), ListenerState::Finished);
    }

    #[test]
    fn test_event_before_start_is_usage_error() {
        let listener = listener();
        let err = listener
            .on_test_success("getUsers", None, 10)
            .expect_err("not running");
        assert_eq!(
            err,
            LifecycleError::SuiteNotStarted {
                event: "test success"
            }
        );
    }

    #[test]
    fn test_double_start_is_usage_error() {
        let listener = listener();
        listener.on_suite_start("Regression").expect("start");
        let err = listener.on_suite_start("Smoke").expect_err("already running");
        assert!(matches!(err, LifecycleError::SuiteAlreadyStarted { .. }));
        assert_eq!(listener.state(), ListenerState::Running);
    }

    #[test]
    fn test_event_after_finish_is_usage_error() {
        let listener = listener();
        listener.on_suite_start("Regression").expect("start");
        listener.on_suite_finish("Regression").expect("finish");

        let err = listener
            .on_test_skipped("late", None, None)
            .expect_err("finished");
        assert!(matches!(err, LifecycleError::SuiteAlreadyFinished { .. }));
    }

    #[test]
    fn test_finish_with_other_name_is_rejected() {
        let listener = listener();
        listener.on_suite_start("Regression").expect("start");
        let err = listener.on_suite_finish("Smoke").expect_err("mismatch");
        assert!(matches!(err, LifecycleError::SuiteNameMismatch { .. }));
        assert_eq!(listener.state(), ListenerState::Running);
    }

    #[test]
    fn test_outcomes_recorded_in_completion_order() {
        let listener = listener();
        listener.on_suite_start("Regression").expect("start");
        listener.on_test_start("b", None).expect("start b");
        listener.on_test_failure("b", None, 7, "boom").expect("fail b");
        listener.on_test_success("a", Some("first"), 3).expect("pass a");

        let report = listener.on_suite_finish("Regression").expect("finish");
        let outcomes = report.snapshot.outcomes();
        assert_eq!(outcomes[0].name, "b");
        assert_eq!(outcomes[0].status, TestStatus::Failed);
        assert_eq!(outcomes[1].name, "a");
        assert!(report.report_files.is_empty());
        assert!(report.reports_written());
    }

    #[test]
    fn test_restart_after_finish_uses_fresh_run() {
        let listener = listener();
        listener.on_suite_start("First").expect("start");
        listener.on_test_success("a", None, 1).expect("pass");
        listener.on_suite_finish("First").expect("finish");

        listener.on_suite_start("Second").expect("restart");
        let report = listener.on_suite_finish("Second").expect("finish");
        assert_eq!(report.snapshot.total(), 0);
    }
}
