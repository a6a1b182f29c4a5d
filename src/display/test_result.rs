//! Test result display formatting

use tabled::Tabled;

use crate::models::TestResult;

use super::render_table;

#[derive(Tabled)]
struct TestResultRow {
    #[tabled(rename = "Test")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Coverage")]
    coverage: String,
    #[tabled(rename = "Recorded")]
    recorded: String,
}

pub fn format_test_results(results: &[TestResult]) -> String {
    let rows = results
        .iter()
        .map(|r| TestResultRow {
            name: r.name.clone(),
            status: r.status.to_string(),
            duration: r.duration_ms.map(|d| format!("{} ms", d)).unwrap_or_default(),
            coverage: r.coverage.map(|c| format!("{:.1}%", c)).unwrap_or_default(),
            recorded: r.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();
    render_table(rows, "No test results recorded.")
}
