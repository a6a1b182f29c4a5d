//! CSV import service
//!
//! Turns raw CSV text into ordered [`ImportedRow`]s, each tagged success,
//! warning or error, and persists the non-error rows through a [`Backend`].
//!
//! The reader is deliberately simple: fields are split on every comma with
//! no quote handling, so a description containing a comma shifts the
//! columns after it. Lines with fewer fields than the header are dropped.

use std::fmt;
use std::path::Path;

use chrono::{Duration, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use serde::Serialize;
use tracing::{info, warn};

use crate::backend::{Backend, Session};
use crate::error::{FinanceError, FinanceResult, ImportError};
use crate::models::{Money, NewTransaction, Transaction, TransactionType};
use crate::validation::{is_valid_import_date, normalize_date, MAX_AMOUNT};

/// Header fields every import file must provide, in reporting order
pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "description", "amount", "category", "type"];

const INVALID_DATE: &str = "Invalid date format. Use YYYY-MM-DD or DD/MM/YYYY";
const MISSING_DESCRIPTION: &str = "Missing description";
const INVALID_AMOUNT: &str = "Invalid amount";
const INVALID_TYPE: &str = "Invalid type, defaulting to expense";

/// Column positions located from the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date: usize,
    pub description: usize,
    pub amount: usize,
    pub category: usize,
    pub kind: usize,
    /// Number of header cells; shorter data lines are dropped
    pub width: usize,
}

impl ColumnMapping {
    /// Locate each required field by substring match on the lowercased header
    ///
    /// Every missing field is reported at once.
    pub fn detect(headers: &StringRecord) -> Result<Self, ImportError> {
        let headers: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |field: &str| headers.iter().position(|h| h.contains(field));

        let found: Vec<Option<usize>> = REQUIRED_COLUMNS.iter().map(|f| find(*f)).collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .zip(&found)
            .filter(|(_, idx)| idx.is_none())
            .map(|(field, _)| field.to_string())
            .collect();

        match found.as_slice() {
            [Some(date), Some(description), Some(amount), Some(category), Some(kind)] => {
                Ok(Self {
                    date: *date,
                    description: *description,
                    amount: *amount,
                    category: *category,
                    kind: *kind,
                    width: headers.len(),
                })
            }
            _ => Err(ImportError::MissingColumns(missing)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Success,
    Warning,
    Error,
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One data line as parsed and checked, before anything is persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    /// 1-based line number in the original text
    pub line: usize,
    pub date: String,
    pub description: String,
    pub category: String,
    /// `None` when the amount cell was not a number
    pub amount: Option<Money>,
    /// Lowercased type cell as written
    pub raw_type: String,
    /// `None` when `raw_type` is not a known type and no coercion happened
    pub kind: Option<TransactionType>,
    pub status: RowStatus,
    pub message: Option<String>,
}

impl ImportedRow {
    fn from_record(line: usize, record: &StringRecord, mapping: &ColumnMapping) -> Self {
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let date = field(mapping.date);
        let description = field(mapping.description);

        let category = match field(mapping.category) {
            c if c.is_empty() => "Other".to_string(),
            c => c,
        };

        let raw_amount = match field(mapping.amount) {
            a if a.is_empty() => "0".to_string(),
            a => a,
        };
        let amount = raw_amount
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Money::from_major);

        let raw_type = match field(mapping.kind) {
            t if t.is_empty() => "expense".to_string(),
            t => t.to_lowercase(),
        };
        let kind = TransactionType::parse(&raw_type);

        let mut row = Self {
            line,
            date,
            description,
            category,
            amount,
            raw_type,
            kind,
            status: RowStatus::Success,
            message: None,
        };
        row.check();
        row
    }

    /// Apply the row rules in order; the first one that fires decides
    fn check(&mut self) {
        let (status, message) = if !is_valid_import_date(&self.date) {
            (RowStatus::Error, INVALID_DATE)
        } else if self.description.is_empty() {
            (RowStatus::Warning, MISSING_DESCRIPTION)
        } else if !self
            .amount
            .is_some_and(|a| a.is_positive() && a <= MAX_AMOUNT)
        {
            (RowStatus::Error, INVALID_AMOUNT)
        } else if self.kind.is_none() {
            self.kind = Some(TransactionType::Expense);
            (RowStatus::Warning, INVALID_TYPE)
        } else {
            return;
        };

        self.status = status;
        self.message = Some(message.to_string());
    }

    /// Rows that are not errors are offered for import
    pub fn is_eligible(&self) -> bool {
        self.status != RowStatus::Error
    }
}

/// Row counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub success: usize,
    pub warning: usize,
    pub error: usize,
}

impl ImportSummary {
    pub fn from_rows(rows: &[ImportedRow]) -> Self {
        let count = |status: RowStatus| rows.iter().filter(|r| r.status == status).count();
        Self {
            total: rows.len(),
            success: count(RowStatus::Success),
            warning: count(RowStatus::Warning),
            error: count(RowStatus::Error),
        }
    }
}

/// Parsed file awaiting confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview {
    pub rows: Vec<ImportedRow>,
    pub summary: ImportSummary,
}

impl ImportPreview {
    pub fn eligible(&self) -> impl Iterator<Item = &ImportedRow> {
        self.rows.iter().filter(|r| r.is_eligible())
    }
}

/// Split one physical line into fields
///
/// Only `\n` ends a record, so a stray `\r` inside a field stays part of
/// that field and the line keeps its own row.
fn read_line(line: &str) -> Result<StringRecord, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    reader
        .read_record(&mut record)
        .map_err(|e| ImportError::Malformed(e.to_string()))?;
    Ok(record)
}

/// Parse CSV text into rows
///
/// Blank lines are ignored everywhere. Fails when no data line remains or
/// when the header lacks a required column.
pub fn parse_csv(text: &str) -> Result<ImportPreview, ImportError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
        .collect();

    if lines.len() < 2 {
        return Err(ImportError::EmptyFile);
    }

    let mut records = Vec::with_capacity(lines.len());
    for (line, text) in &lines {
        records.push((*line, read_line(text)?));
    }

    let ((_, header), data) = records.split_first().ok_or(ImportError::EmptyFile)?;
    let mapping = ColumnMapping::detect(header)?;

    let rows: Vec<ImportedRow> = data
        .iter()
        .filter(|(_, record)| record.len() >= mapping.width)
        .map(|(line, record)| ImportedRow::from_record(*line, record, &mapping))
        .collect();

    let summary = ImportSummary::from_rows(&rows);
    Ok(ImportPreview { rows, summary })
}

/// The downloadable example file: header plus two rows dated five days
/// ago and today
pub fn template(today: NaiveDate) -> String {
    let earlier = today - Duration::days(5);
    format!(
        "date,description,amount,category,type\n\
         {},Coffee Shop,45.00,Food,expense\n\
         {},Part-time Job,2000.00,Part-time Job,income\n",
        earlier.format("%Y-%m-%d"),
        today.format("%Y-%m-%d"),
    )
}

/// A row that was eligible but could not be stored
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub line: usize,
    pub message: String,
}

/// Result of a confirmed import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub success_count: usize,
    pub error_count: usize,
    pub failures: Vec<RowFailure>,
}

/// Service for CSV import
pub struct ImportService<'a, B: Backend> {
    backend: &'a B,
}

impl<'a, B: Backend> ImportService<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Read and parse a CSV file from disk
    pub fn preview_file(&self, path: &Path) -> FinanceResult<ImportPreview> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FinanceError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(parse_csv(&text)?)
    }

    /// Persist every eligible row of `preview`
    ///
    /// A failing row is counted and logged; the rest of the batch still
    /// runs. Categories created for a row stay even if its insert fails.
    pub fn confirm(
        &self,
        session: &Session,
        preview: &ImportPreview,
    ) -> FinanceResult<ImportOutcome> {
        let eligible: Vec<&ImportedRow> = preview.eligible().collect();
        if eligible.is_empty() {
            return Err(FinanceError::Validation(
                "No valid transactions to import".into(),
            ));
        }

        let mut outcome = ImportOutcome::default();
        for row in eligible {
            match self.import_row(session, row) {
                Ok(_) => outcome.success_count += 1,
                Err(e) => {
                    warn!(line = row.line, error = %e, "failed to import row");
                    outcome.error_count += 1;
                    outcome.failures.push(RowFailure {
                        line: row.line,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            imported = outcome.success_count,
            failed = outcome.error_count,
            "import finished"
        );
        Ok(outcome)
    }

    fn import_row(&self, session: &Session, row: &ImportedRow) -> FinanceResult<Transaction> {
        let kind = row.kind.ok_or_else(|| {
            FinanceError::Validation(format!("Invalid type '{}'", row.raw_type))
        })?;
        let amount = row
            .amount
            .filter(|a| a.is_positive() && *a <= MAX_AMOUNT)
            .ok_or_else(|| FinanceError::Validation(INVALID_AMOUNT.into()))?;

        let category_id = self.backend.create_category(session, &row.category, kind)?;

        let date = normalize_date(&row.date)
            .ok_or_else(|| FinanceError::Validation(INVALID_DATE.into()))?;

        self.backend.insert_transaction(
            session,
            NewTransaction {
                amount,
                category_id: Some(category_id),
                category: row.category.clone(),
                description: row.description.clone(),
                kind,
                date,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TransactionFilter;
    use crate::config::paths::FinancePaths;
    use crate::models::{
        BankAccount, BankAccountId, Budget, BudgetId, Category, CategoryId, TestResult,
        TransactionId,
    };
    use crate::storage::Storage;
    use std::cell::RefCell;
    use tempfile::TempDir;

    const HEADER: &str = "date,description,amount,category,type";

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn parse_one(line: &str) -> ImportedRow {
        let preview = parse_csv(&format!("{}\n{}", HEADER, line)).unwrap();
        assert_eq!(preview.rows.len(), 1);
        preview.rows.into_iter().next().unwrap()
    }

    #[test]
    fn test_parse_simple_row() {
        let row = parse_one("2024-01-15,Coffee,45.00,Food,expense");
        assert_eq!(row.status, RowStatus::Success);
        assert_eq!(row.kind, Some(TransactionType::Expense));
        assert_eq!(row.amount, Some(Money::from_minor(4500)));
        assert_eq!(row.category, "Food");
        assert_eq!(row.line, 2);
        assert!(row.message.is_none());
    }

    #[test]
    fn test_negative_amount_is_error() {
        let row = parse_one("2024-01-15,Coffee,-5,Food,expense");
        assert_eq!(row.status, RowStatus::Error);
        assert!(row.message.unwrap().contains("Invalid amount"));
    }

    #[test]
    fn test_unknown_type_is_coerced() {
        let row = parse_one("2024-01-15,Birthday,500,Gifts,gift");
        assert_eq!(row.status, RowStatus::Warning);
        assert_eq!(row.kind, Some(TransactionType::Expense));
        assert_eq!(row.message.as_deref(), Some(INVALID_TYPE));
    }

    #[test]
    fn test_bad_date_wins_over_everything() {
        let row = parse_one("not-a-date,,abc,Food,gift");
        assert_eq!(row.status, RowStatus::Error);
        assert_eq!(row.message.as_deref(), Some(INVALID_DATE));
    }

    #[test]
    fn test_missing_description_stops_later_rules() {
        let row = parse_one("2024-01-15,,abc,Food,gift");
        assert_eq!(row.status, RowStatus::Warning);
        assert_eq!(row.message.as_deref(), Some(MISSING_DESCRIPTION));
        // type rule never ran
        assert_eq!(row.kind, None);
        assert!(row.is_eligible());
    }

    #[test]
    fn test_defaults_for_empty_cells() {
        let row = parse_one("15/01/2024,Books,300,,");
        assert_eq!(row.category, "Other");
        assert_eq!(row.raw_type, "expense");
        assert_eq!(row.status, RowStatus::Success);

        let row = parse_one("2024-01-15,Books,,Study,INCOME");
        assert_eq!(row.amount, Some(Money::zero()));
        assert_eq!(row.status, RowStatus::Error);
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let row = parse_one("2024-01-15,Stipend,2000,Scholarship, Income ");
        assert_eq!(row.kind, Some(TransactionType::Income));
        assert_eq!(row.status, RowStatus::Success);
    }

    #[test]
    fn test_headers_matched_by_substring_in_any_order() {
        let text = "Transaction Type,Amount (INR),Txn Date,Category Name,Description\n\
                    income,2000,2024-01-01,Job,Salary";
        let preview = parse_csv(text).unwrap();
        let row = &preview.rows[0];
        assert_eq!(row.date, "2024-01-01");
        assert_eq!(row.description, "Salary");
        assert_eq!(row.kind, Some(TransactionType::Income));
    }

    #[test]
    fn test_missing_columns_named() {
        let err = parse_csv("date,description,category\n2024-01-01,x,y").unwrap_err();
        assert_eq!(
            err,
            ImportError::MissingColumns(vec!["amount".into(), "type".into()])
        );
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(parse_csv("").unwrap_err(), ImportError::EmptyFile);
        assert_eq!(
            parse_csv(&format!("{}\n\n   \n", HEADER)).unwrap_err(),
            ImportError::EmptyFile
        );
    }

    #[test]
    fn test_short_lines_dropped_and_blank_lines_skipped() {
        let text = format!(
            "{}\n2024-01-15,Coffee,45,Food,expense\n\n2024-01-16,Tea\r\n2024-01-17,Lunch,120,Food,expense\n",
            HEADER
        );
        let preview = parse_csv(&text).unwrap();
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[1].line, 5);
        assert_eq!(preview.rows[1].description, "Lunch");
    }

    #[test]
    fn test_comma_in_description_shifts_columns() {
        let row = parse_one("2024-01-15,Coffee, cake,45,Food,expense");
        assert_eq!(row.description, "Coffee");
        assert_eq!(row.amount, None);
        assert_eq!(row.status, RowStatus::Error);
    }

    #[test]
    fn test_carriage_return_inside_a_field_keeps_its_row() {
        let text = format!(
            "{}\n2024-01-15,Cof\rfee,45,Food,expense\n2024-01-16,Tea,20,Food,expense\n2024-01-17,Lunch,120,Food,expense",
            HEADER
        );
        let preview = parse_csv(&text).unwrap();
        assert_eq!(preview.rows.len(), 3);
        let lines: Vec<usize> = preview.rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert_eq!(preview.rows[0].description, "Cof\rfee");
        assert_eq!(preview.rows[1].description, "Tea");
        assert_eq!(preview.rows[2].description, "Lunch");
        assert_eq!(preview.summary.success, 3);
    }

    #[test]
    fn test_amount_above_cap_is_error() {
        let text = format!(
            "{}\n2024-01-15,Car,1e17,Travel,expense\n2024-01-16,Car,1e17,Travel,expense",
            HEADER
        );
        let preview = parse_csv(&text).unwrap();
        assert_eq!(preview.summary.error, 2);
        assert_eq!(preview.summary.success, 0);
        assert!(preview
            .rows
            .iter()
            .all(|r| r.message.as_deref() == Some(INVALID_AMOUNT)));

        assert_eq!(
            parse_one("2024-01-15,Fees,10000000,Study,expense").status,
            RowStatus::Success
        );
        assert_eq!(
            parse_one("2024-01-15,Fees,10000000.01,Study,expense").message.as_deref(),
            Some(INVALID_AMOUNT)
        );
    }

    #[test]
    fn test_amount_with_trailing_text_is_error() {
        let row = parse_one("2024-01-15,Coffee,45abc,Food,expense");
        assert_eq!(row.amount, None);
        assert_eq!(row.status, RowStatus::Error);
        assert_eq!(row.message.as_deref(), Some(INVALID_AMOUNT));
    }

    #[test]
    fn test_summary_counts() {
        let text = format!(
            "{}\n2024-01-15,Coffee,45,Food,expense\n2024-01-15,,45,Food,expense\nbad,x,1,y,expense\n2024-01-15,Gift,5,Misc,gift",
            HEADER
        );
        let preview = parse_csv(&text).unwrap();
        assert_eq!(
            preview.summary,
            ImportSummary {
                total: 4,
                success: 1,
                warning: 2,
                error: 1,
            }
        );
        assert_eq!(preview.eligible().count(), 3);
    }

    #[test]
    fn test_template_parses_cleanly() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let text = template(today);
        assert!(text.starts_with(HEADER));
        assert!(text.contains("2024-02-27,Coffee Shop,45.00,Food,expense"));

        let preview = parse_csv(&text).unwrap();
        assert_eq!(preview.summary.success, 2);
    }

    #[test]
    fn test_confirm_persists_rows_with_normalized_dates() {
        let (_temp_dir, storage) = create_test_storage();
        let session = Session::sign_in("asha@college.edu");
        let service = ImportService::new(&storage);

        let text = format!(
            "{}\n5/1/2024,Coffee,45,Food,expense\n2024-01-16,,30,Food,expense\nbad,x,1,y,expense",
            HEADER
        );
        let preview = parse_csv(&text).unwrap();
        let outcome = service.confirm(&session, &preview).unwrap();
        assert_eq!(outcome.success_count, 2);
        assert_eq!(outcome.error_count, 0);

        let stored = storage
            .list_transactions(&session, &TransactionFilter::default())
            .unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].date.to_string(), "2024-01-05");
        assert_eq!(storage.list_categories(&session).unwrap().len(), 1);
    }

    #[test]
    fn test_confirm_with_nothing_eligible() {
        let (_temp_dir, storage) = create_test_storage();
        let session = Session::sign_in("asha@college.edu");
        let preview = parse_csv(&format!("{}\nbad,x,1,y,expense", HEADER)).unwrap();

        let err = ImportService::new(&storage)
            .confirm(&session, &preview)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: No valid transactions to import"
        );
    }

    #[test]
    fn test_confirm_counts_rows_without_a_type() {
        let (_temp_dir, storage) = create_test_storage();
        let session = Session::sign_in("asha@college.edu");
        let preview = parse_csv(&format!(
            "{}\n2024-01-15,,45,Food,gift\n2024-01-15,Tea,20,Food,expense",
            HEADER
        ))
        .unwrap();

        let outcome = ImportService::new(&storage)
            .confirm(&session, &preview)
            .unwrap();
        assert_eq!(outcome.success_count, 1);
        assert_eq!(outcome.error_count, 1);
        assert_eq!(outcome.failures[0].line, 2);
    }

    /// Backend whose inserts fail for one description
    struct FlakyBackend {
        fail_on: &'static str,
        categories: RefCell<Vec<String>>,
        inserted: RefCell<Vec<NewTransaction>>,
    }

    impl FlakyBackend {
        fn new(fail_on: &'static str) -> Self {
            Self {
                fail_on,
                categories: RefCell::new(Vec::new()),
                inserted: RefCell::new(Vec::new()),
            }
        }
    }

    impl Backend for FlakyBackend {
        fn find_category(&self, _: &Session, name: &str) -> FinanceResult<Option<CategoryId>> {
            Ok(self
                .categories
                .borrow()
                .iter()
                .any(|c| c == name)
                .then(CategoryId::new))
        }

        fn create_category(
            &self,
            _: &Session,
            name: &str,
            _: TransactionType,
        ) -> FinanceResult<CategoryId> {
            let mut categories = self.categories.borrow_mut();
            if !categories.iter().any(|c| c == name) {
                categories.push(name.to_string());
            }
            Ok(CategoryId::new())
        }

        fn list_categories(&self, _: &Session) -> FinanceResult<Vec<Category>> {
            Ok(Vec::new())
        }

        fn insert_transaction(
            &self,
            session: &Session,
            record: NewTransaction,
        ) -> FinanceResult<Transaction> {
            if record.description == self.fail_on {
                return Err(FinanceError::Backend("connection reset".into()));
            }
            self.inserted.borrow_mut().push(record.clone());
            Ok(record.into_transaction(session.user_id))
        }

        fn list_transactions(
            &self,
            _: &Session,
            _: &TransactionFilter,
        ) -> FinanceResult<Vec<Transaction>> {
            Ok(Vec::new())
        }

        fn delete_transaction(&self, _: &Session, _: TransactionId) -> FinanceResult<bool> {
            Ok(false)
        }

        fn list_budgets(&self, _: &Session) -> FinanceResult<Vec<Budget>> {
            Ok(Vec::new())
        }

        fn upsert_budget(&self, _: &Session, budget: Budget) -> FinanceResult<Budget> {
            Ok(budget)
        }

        fn delete_budget(&self, _: &Session, _: BudgetId) -> FinanceResult<bool> {
            Ok(false)
        }

        fn list_bank_accounts(&self, _: &Session) -> FinanceResult<Vec<BankAccount>> {
            Ok(Vec::new())
        }

        fn upsert_bank_account(
            &self,
            _: &Session,
            account: BankAccount,
        ) -> FinanceResult<BankAccount> {
            Ok(account)
        }

        fn delete_bank_account(&self, _: &Session, _: BankAccountId) -> FinanceResult<bool> {
            Ok(false)
        }

        fn record_test_result(&self, _: &Session, _: TestResult) -> FinanceResult<()> {
            Ok(())
        }

        fn list_test_results(&self, _: &Session) -> FinanceResult<Vec<TestResult>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_partial_failure_does_not_abort_batch() {
        let backend = FlakyBackend::new("Rent");
        let session = Session::sign_in("asha@college.edu");
        let preview = parse_csv(&format!(
            "{}\n2024-01-01,Coffee,45,Food,expense\n2024-01-02,Rent,8000,Housing,expense\n2024-01-03,Stipend,2000,Scholarship,income",
            HEADER
        ))
        .unwrap();

        let outcome = ImportService::new(&backend)
            .confirm(&session, &preview)
            .unwrap();

        assert_eq!(outcome.success_count, 2);
        assert_eq!(outcome.error_count, 1);
        assert_eq!(outcome.failures[0].line, 3);
        assert!(outcome.failures[0].message.contains("connection reset"));
        assert_eq!(backend.inserted.borrow().len(), 2);
        // category for the failed row is kept
        assert!(backend.categories.borrow().contains(&"Housing".to_string()));
    }
}
