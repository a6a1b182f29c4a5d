//! Import preview and result formatting

use tabled::Tabled;

use crate::services::import::{ImportOutcome, ImportPreview};

use super::{render_table, truncate};

#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Note")]
    note: String,
}

pub fn format_import_preview(preview: &ImportPreview) -> String {
    let rows = preview
        .rows
        .iter()
        .map(|r| PreviewRow {
            line: r.line,
            status: r.status.to_string(),
            date: r.date.clone(),
            description: truncate(&r.description, 24),
            category: r.category.clone(),
            amount: r
                .amount
                .map(|a| format!("{:.2}", a.as_major()))
                .unwrap_or_else(|| "?".to_string()),
            kind: r
                .kind
                .map(|k| k.to_string())
                .unwrap_or_else(|| r.raw_type.clone()),
            note: r.message.clone().unwrap_or_default(),
        })
        .collect();

    let s = &preview.summary;
    let mut output = render_table(rows, "No rows found.");
    output.push_str(&format!(
        "\n{} rows: {} ok, {} warnings, {} errors\n",
        s.total, s.success, s.warning, s.error
    ));
    output
}

pub fn format_import_outcome(outcome: &ImportOutcome) -> String {
    let mut output = String::new();

    output.push_str("Import complete\n");
    output.push_str(&format!("  Imported: {}\n", outcome.success_count));
    if outcome.error_count > 0 {
        output.push_str(&format!("  Failed:   {}\n", outcome.error_count));
        for failure in &outcome.failures {
            output.push_str(&format!("    Line {}: {}\n", failure.line, failure.message));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::import::{parse_csv, RowFailure};

    #[test]
    fn test_preview_lists_rows_and_counts() {
        let preview = parse_csv(
            "date,description,amount,category,type\n\
             2024-01-15,Coffee,45.00,Food,expense\n\
             2024-01-16,Refund,-5,Food,income\n",
        )
        .unwrap();

        let formatted = format_import_preview(&preview);
        assert!(formatted.contains("Coffee"));
        assert!(formatted.contains("45.00"));
        assert!(formatted.contains("Invalid amount"));
        assert!(formatted.contains("2 rows: 1 ok, 0 warnings, 1 errors"));
    }

    #[test]
    fn test_outcome_lists_failures() {
        let outcome = ImportOutcome {
            success_count: 3,
            error_count: 1,
            failures: vec![RowFailure {
                line: 4,
                message: "Backend error: offline".into(),
            }],
        };
        let formatted = format_import_outcome(&outcome);
        assert!(formatted.contains("Imported: 3"));
        assert!(formatted.contains("Line 4: Backend error: offline"));
    }
}
