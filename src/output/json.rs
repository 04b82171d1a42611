//! JSON output for lookup reports.

use crate::error::Result;
use crate::lookup::Report;

/// Pretty-printed JSON for a report.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
