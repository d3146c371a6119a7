//! Result type returned by the extraction and scrape entry points.

use crate::record::{build_headers, Record};
use crate::runlog::RunLog;

/// Outcome of one extraction run: the kept records, the output column set
/// computed from them, a one-line status summary, and the narrated run log.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    /// Records that passed the keep rule, in discovery order.
    pub records: Vec<Record>,
    /// Union of field names across all records, preferred columns first.
    pub headers: Vec<String>,
    /// Human-readable summary of the run.
    pub status: String,
    /// Step-by-step narration of selector probing and fallbacks.
    pub log: RunLog,
}

impl ScrapeResult {
    pub(crate) fn new(records: Vec<Record>, log: RunLog) -> Self {
        let headers = build_headers(&records);
        let status = if records.is_empty() {
            "No data found that matches common patterns. Check URL or manually inspect structure."
                .to_string()
        } else {
            format!("Extracted {} entries.", records.len())
        };
        ScrapeResult {
            records,
            headers,
            status,
            log,
        }
    }

    /// Whether the run produced at least one record.
    #[must_use]
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }
}
