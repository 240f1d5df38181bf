// Report writer - persists rendered HTML under the reports directory

use crate::error::ReportError;
use crate::time::{Clock, FILE_STAMP_FORMAT};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// `test-report-<yyyy-MM-dd-HH-mm-ss>.html`
///
/// Second precision only: two reports written within the same second map to
/// the same name and the later one replaces the earlier.
pub fn report_file_name(stamp: &DateTime<Local>) -> String {
    format!("test-report-{}.html", stamp.format(FILE_STAMP_FORMAT))
}

pub struct ReportWriter {
    clock: Arc<dyn Clock>,
}

impl ReportWriter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Create `base_dir` if needed and write `html` to a timestamped file in it.
    ///
    /// Blocking, with no timeout. Failures are returned to the caller, which
    /// owns logging them.
    pub fn write(&self, html: &str, base_dir: &Path) -> Result<PathBuf, ReportError> {
        let path = Self::write_at(html, base_dir, &self.clock.now())?;
        info!("Report generated: {}", path.display());
        Ok(path)
    }

    fn write_at(
        html: &str,
        base_dir: &Path,
        stamp: &DateTime<Local>,
    ) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(base_dir).map_err(|source| ReportError::CreateDir {
            path: base_dir.to_path_buf(),
            source,
        })?;

        let path = base_dir.join(report_file_name(stamp));
        fs::write(&path, html).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
