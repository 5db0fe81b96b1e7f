use tfguard_types::{Diagnostic, Finding, ScanReport, ScanSummary, ToolMeta, ids};
use time::OffsetDateTime;

/// Everything a finished scan produced, before it is wrapped into a report envelope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanOutcome {
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ScanSummary,
}

impl ScanOutcome {
    pub fn into_report(self, started_at: OffsetDateTime, finished_at: OffsetDateTime) -> ScanReport {
        ScanReport {
            schema: tfguard_types::SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: ids::TOOL_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            started_at,
            finished_at,
            findings: self.findings,
            diagnostics: self.diagnostics,
            summary: self.summary,
        }
    }

    /// Any finding that is not suppressed by an inline ignore.
    pub fn has_failures(&self) -> bool {
        self.findings.iter().any(|f| !f.ignored)
    }
}
