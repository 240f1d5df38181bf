// HTML reporter - self-contained HTML document with inline styles

use super::Reporter;
use super::writer::ReportWriter;
use crate::state::{Snapshot, SuiteInfo, TestOutcome};
use crate::time::format_display;
use anyhow::{Context, Result};
use std::path::PathBuf;

const STYLES: &str = r#"<style>
* {margin: 0; padding: 0; box-sizing: border-box;}
body {font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: #333; padding: 20px; min-height: 100vh;}
.container {max-width: 1200px; margin: 0 auto; background: white; border-radius: 10px; box-shadow: 0 10px 40px rgba(0,0,0,0.2); overflow: hidden;}
.header {background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 40px; text-align: center;}
.header h1 {font-size: 2.5em; margin-bottom: 10px;}
.header p {font-size: 1.1em; opacity: 0.9;}
.header .generated {margin-top: 10px; font-size: 0.9em;}
.content {padding: 40px;}
.statistics {display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 40px;}
.stat-card {background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 25px; border-radius: 8px; text-align: center; box-shadow: 0 4px 15px rgba(0,0,0,0.1);}
.stat-card.passed {background: linear-gradient(135deg, #11998e 0%, #38ef7d 100%);}
.stat-card.failed {background: linear-gradient(135deg, #ee0979 0%, #ff6a00 100%);}
.stat-card.skipped {background: linear-gradient(135deg, #ffa400 0%, #ffb74d 100%);}
.stat-value {font-size: 2.5em; font-weight: bold; margin: 10px 0;}
.stat-label {font-size: 0.9em; opacity: 0.9;}
.results-table {width: 100%; border-collapse: collapse; margin: 20px 0;}
.results-table thead {background: #f5f5f5; border-bottom: 2px solid #667eea;}
.results-table th {padding: 15px; text-align: left; font-weight: 600; color: #333;}
.results-table td {padding: 15px; border-bottom: 1px solid #eee;}
.results-table tr:hover {background: #f9f9f9;}
.status-badge {display: inline-block; padding: 5px 12px; border-radius: 20px; font-weight: 600; font-size: 0.85em;}
.status-badge.passed {background: #d4edda; color: #155724;}
.status-badge.failed {background: #f8d7da; color: #721c24;}
.status-badge.skipped {background: #fff3cd; color: #856404;}
.error-message {margin-top: 6px; font-family: monospace; font-size: 0.85em; color: #721c24; white-space: pre-wrap;}
.footer {background: #f5f5f5; padding: 20px; text-align: center; color: #666; font-size: 0.9em; border-top: 1px solid #ddd;}
.section-title {font-size: 1.5em; margin: 30px 0 20px 0; color: #333; border-bottom: 2px solid #667eea; padding-bottom: 10px;}
</style>
"#;

/// Escape text for insertion into HTML element content or attribute values
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Renders a finished suite into one HTML document
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    report_title: String,
}

impl HtmlRenderer {
    pub fn new(report_title: impl Into<String>) -> Self {
        Self {
            report_title: report_title.into(),
        }
    }

    /// Render the document. The generation timestamp is the suite end time,
    /// so rendering the same inputs twice gives identical output.
    pub fn render(&self, suite: &SuiteInfo, snapshot: &Snapshot) -> String {
        let generated = format_display(
            suite
                .timing
                .end_time
                .as_ref()
                .unwrap_or(&suite.timing.start_time),
        );

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");
        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!(
            "    <title>{} - Test Report</title>\n",
            escape_html(&suite.name)
        ));
        html.push_str(STYLES);
        html.push_str("</head>\n");
        html.push_str("<body>\n");
        html.push_str("<div class=\"container\">\n");
        html.push_str(&self.header(suite, &generated));
        html.push_str("    <div class=\"content\">\n");
        html.push_str(&statistics(snapshot));
        html.push_str(&results_table(snapshot.outcomes()));
        html.push_str("    </div>\n");
        html.push_str(&format!(
            "    <div class=\"footer\"><p>{} | Report generated on {}</p></div>\n",
            escape_html(&self.report_title),
            generated
        ));
        html.push_str("</div>\n");
        html.push_str("</body>\n");
        html.push_str("</html>\n");
        html
    }

    fn header(&self, suite: &SuiteInfo, generated: &str) -> String {
        format!(
            "    <div class=\"header\"><h1>📊 {}</h1><p>{}</p><p class=\"generated\">Generated: {}</p></div>\n",
            escape_html(&self.report_title),
            escape_html(&suite.name),
            generated
        )
    }
}

fn statistics(snapshot: &Snapshot) -> String {
    let mut html = String::new();
    html.push_str("        <div class=\"section-title\">📈 Test Statistics</div>\n");
    html.push_str("        <div class=\"statistics\">\n");
    html.push_str(&stat_card("", "Total Tests", &snapshot.total().to_string()));
    html.push_str(&stat_card(
        "passed",
        "Passed ✓",
        &snapshot.passed().to_string(),
    ));
    html.push_str(&stat_card(
        "failed",
        "Failed ✗",
        &snapshot.failed().to_string(),
    ));
    html.push_str(&stat_card(
        "skipped",
        "Skipped ⊗",
        &snapshot.skipped().to_string(),
    ));
    html.push_str(&stat_card(
        "",
        "Pass Rate",
        &format!("{:.1}%", snapshot.pass_rate()),
    ));
    html.push_str("        </div>\n");
    html
}

fn stat_card(class: &str, label: &str, value: &str) -> String {
    let class = if class.is_empty() {
        "stat-card".to_string()
    } else {
        format!("stat-card {}", class)
    };
    format!(
        "            <div class=\"{}\"><div class=\"stat-label\">{}</div><div class=\"stat-value\">{}</div></div>\n",
        class, label, value
    )
}

fn results_table(outcomes: &[TestOutcome]) -> String {
    let mut html = String::new();
    html.push_str("        <div class=\"section-title\">📋 Test Results</div>\n");
    html.push_str("        <table class=\"results-table\">\n");
    html.push_str(
        "            <thead><tr><th style=\"width: 30%;\">Test Name</th><th style=\"width: 40%;\">Description</th><th style=\"width: 15%;\">Status</th><th style=\"width: 15%;\">Duration</th></tr></thead>\n",
    );
    html.push_str("            <tbody>\n");

    for outcome in outcomes {
        html.push_str(&result_row(outcome));
    }

    html.push_str("            </tbody>\n");
    html.push_str("        </table>\n");
    html
}

fn result_row(outcome: &TestOutcome) -> String {
    let description = outcome
        .description
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "N/A".to_string());

    let detail = match outcome.error_message.as_deref() {
        Some(msg) if !msg.is_empty() => format!(
            "<div class=\"error-message\">{}</div>",
            escape_html(msg)
        ),
        _ => String::new(),
    };

    format!(
        "                <tr><td><strong>{}</strong>{}</td><td>{}</td><td><span class=\"status-badge {}\">{}</span></td><td>{}ms</td></tr>\n",
        escape_html(outcome.display_name()),
        detail,
        description,
        outcome.status.css_class(),
        outcome.status,
        outcome.duration_ms
    )
}

/// HTML reporter
///
/// Renders the finished suite and persists it through a [`ReportWriter`]
/// under the configured reports directory.
pub struct HtmlReporter {
    renderer: HtmlRenderer,
    writer: ReportWriter,
    reports_dir: PathBuf,
}

impl HtmlReporter {
    /// Create new HTML reporter
    pub fn new(renderer: HtmlRenderer, writer: ReportWriter, reports_dir: PathBuf) -> Self {
        Self {
            renderer,
            writer,
            reports_dir,
        }
    }
}

impl Reporter for HtmlReporter {
    fn on_test_start(&self, _test_id: &str, _description: Option<&str>) {
        // No-op for HTML file reporter
    }

    fn on_test_end(&self, _outcome: &TestOutcome) {
        // No-op, the document is written once at suite end
    }

    fn on_suite_end(&self, suite: &SuiteInfo, snapshot: &Snapshot) -> Result<Option<PathBuf>> {
        let html = self.renderer.render(suite, snapshot);
        let path = self
            .writer
            .write(&html, &self.reports_dir)
            .with_context(|| format!("Failed to generate HTML report for suite '{}'", suite.name))?;
        Ok(Some(path))
    }
}
