pub mod config;
pub mod error;
pub mod listener;
pub mod logging;
pub mod report;
pub mod state;
pub mod time;

pub use error::{ConfigError, LifecycleError, ReportError};
pub use listener::{LifecycleListener, ListenerState, SuiteReport};
pub use state::{ResultAggregator, Snapshot, SuiteInfo, SuiteRun, TestOutcome, TestStatus};
