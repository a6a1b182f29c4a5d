//! Budget display formatting

use tabled::Tabled;

use crate::models::{Budget, BudgetStatus};
use crate::services::budget::BudgetTotals;

use super::{money, render_table};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Budget")]
    amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status_label(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Good => "On track",
        BudgetStatus::Warning => "Near limit",
        BudgetStatus::Exceeded => "Over budget",
    }
}

/// Usage bar, capped at 100%
fn usage_bar(percent: f64, width: usize) -> String {
    let capped = percent.clamp(0.0, 100.0);
    let filled = ((capped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = budgets
        .iter()
        .map(|b| BudgetRow {
            id: b.id.to_string(),
            category: b.category.clone(),
            period: b.period.to_string(),
            amount: money(b.amount),
            spent: money(b.spent),
            remaining: money(b.remaining()),
            used: format!("{:.0}%", b.percent_used().min(100.0)),
            status: status_label(b.status()).to_string(),
        })
        .collect();

    let totals = BudgetTotals::from_budgets(budgets);
    let mut output = render_table(rows, "");
    output.push('\n');
    output.push_str(&format!(
        "Budgeted: {}  Spent: {}  Remaining: {}\n",
        money(totals.budgeted),
        money(totals.spent),
        money(totals.remaining)
    ));
    if totals.exceeded > 0 || totals.warning > 0 {
        output.push_str(&format!(
            "{} over budget, {} near limit\n",
            totals.exceeded, totals.warning
        ));
    }
    output
}

pub fn format_budget_details(budget: &Budget) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {} ({})\n", budget.category, budget.id));
    output.push_str(&format!("Period:    {}\n", budget.period));
    output.push_str(&format!("Limit:     {}\n", money(budget.amount)));
    output.push_str(&format!("Spent:     {}\n", money(budget.spent)));
    output.push_str(&format!("Remaining: {}\n", money(budget.remaining())));
    output.push_str(&format!(
        "Usage:     {} {:.1}%\n",
        usage_bar(budget.percent_used(), 20),
        budget.percent_used()
    ));
    output.push_str(&format!("Status:    {}\n", status_label(budget.status())));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money, UserId};

    fn budget(amount: i64, spent: i64) -> Budget {
        let mut b = Budget::new(
            UserId::new(),
            "Food",
            Money::from_minor(amount),
            BudgetPeriod::Monthly,
        );
        b.spent = Money::from_minor(spent);
        b
    }

    #[test]
    fn test_usage_bar_is_capped() {
        assert_eq!(usage_bar(50.0, 10), "[#####-----]");
        assert_eq!(usage_bar(250.0, 10), "[##########]");
    }

    #[test]
    fn test_list_caps_percent_and_shows_status() {
        let formatted = format_budget_list(&[budget(10000, 15000)]);
        assert!(formatted.contains("100%"));
        assert!(formatted.contains("Over budget"));
        assert!(formatted.contains("1 over budget"));
    }

    #[test]
    fn test_details() {
        let formatted = format_budget_details(&budget(10000, 8500));
        assert!(formatted.contains("Near limit"));
        assert!(formatted.contains("85.0%"));
        assert!(formatted.contains("monthly"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_budget_list(&[]), "No budgets found.\n");
    }
}
