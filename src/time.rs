// Clock abstraction for suite and report timestamps

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Display format used in console blocks, HTML header and footer
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format embedded in report file names
pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single instant, advanced manually
pub struct FixedClock {
    instant: std::sync::Mutex<DateTime<Local>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self {
            instant: std::sync::Mutex::new(instant),
        }
    }

    /// Build from a naive local `yyyy-MM-dd HH:mm:ss` string
    pub fn at(local: &str) -> Option<Self> {
        let naive = NaiveDateTime::parse_from_str(local, DISPLAY_FORMAT).ok()?;
        let instant = Local.from_local_datetime(&naive).single()?;
        Some(Self::new(instant))
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut guard = self
            .instant
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard += chrono::Duration::milliseconds(millis);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self
            .instant
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn format_display(instant: &DateTime<Local>) -> String {
    instant.format(DISPLAY_FORMAT).to_string()
}
