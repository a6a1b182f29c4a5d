//! Analytics and financial health report formatting

use tabled::Tabled;

use crate::services::analytics::{AnalyticsData, FinancialHealth};

use super::{money, render_table};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "Day")]
    day: &'static str,
    #[tabled(rename = "Avg spending")]
    average: String,
    #[tabled(rename = "Count")]
    count: usize,
}

/// Totals, top categories, monthly trends and weekday patterns
pub fn format_analytics_summary(data: &AnalyticsData) -> String {
    let mut output = String::new();

    output.push_str("Financial Overview\n");
    output.push_str(&format!("{}\n", "=".repeat(40)));
    output.push_str(&format!("Total income:    {}\n", money(data.total_income)));
    output.push_str(&format!("Total expenses:  {}\n", money(data.total_expenses)));
    output.push_str(&format!("Balance:         {}\n", money(data.balance)));
    output.push_str(&format!("Transactions:    {}\n", data.transaction_count));
    output.push_str(&format!("Average expense: {}\n", money(data.average_expense)));
    output.push_str(&format!("Average income:  {}\n", money(data.average_income)));
    output.push_str(&format!("Savings rate:    {:.1}%\n", data.savings_rate()));

    output.push_str("\nTop Categories\n");
    output.push_str(&render_table(
        data.top_categories
            .iter()
            .map(|c| CategoryRow {
                category: c.category.clone(),
                amount: money(c.amount),
                count: c.count,
                share: format!("{:.1}%", c.percentage),
            })
            .collect(),
        "No expenses recorded.",
    ));

    output.push_str("\nMonthly Trends\n");
    output.push_str(&render_table(
        data.monthly_trends
            .iter()
            .map(|m| MonthRow {
                month: m.month.clone(),
                income: money(m.income),
                expenses: money(m.expenses),
                balance: money(m.balance),
            })
            .collect(),
        "No transactions recorded.",
    ));

    if data.spending_patterns.iter().any(|p| p.transaction_count > 0) {
        output.push_str("\nSpending by Day\n");
        output.push_str(&render_table(
            data.spending_patterns
                .iter()
                .map(|p| DayRow {
                    day: p.day_of_week,
                    average: money(p.average_spending),
                    count: p.transaction_count,
                })
                .collect(),
            "",
        ));
    }

    output
}

pub fn format_health_report(health: &FinancialHealth) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Financial health: {}/100 ({})\n",
        health.score, health.level
    ));
    if health.recommendations.is_empty() {
        output.push_str("No recommendations. Keep it up!\n");
    } else {
        output.push_str("Recommendations:\n");
        for rec in &health.recommendations {
            output.push_str(&format!("  - {}\n", rec));
        }
    }

    output
}

pub fn format_insights(insights: &[String]) -> String {
    let mut output = String::from("Insights:\n");
    for insight in insights {
        output.push_str(&format!("  * {}\n", insight));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction, TransactionType, UserId};
    use crate::services::analytics::{calculate, financial_health, insights};
    use chrono::NaiveDate;

    fn sample() -> Vec<Transaction> {
        let user = UserId::new();
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        vec![
            Transaction::new(user, Money::from_minor(500000), "Allowance", "Monthly", TransactionType::Income, date),
            Transaction::new(user, Money::from_minor(120000), "Food", "Mess", TransactionType::Expense, date),
        ]
    }

    #[test]
    fn test_summary_sections() {
        let formatted = format_analytics_summary(&calculate(&sample()));
        assert!(formatted.contains("Total income:    ₹5,000.00"));
        assert!(formatted.contains("Food"));
        assert!(formatted.contains("100.0%"));
        assert!(formatted.contains("2024-02"));
        assert!(formatted.contains("Spending by Day"));
    }

    #[test]
    fn test_empty_summary() {
        let formatted = format_analytics_summary(&calculate(&[]));
        assert!(formatted.contains("No expenses recorded."));
        assert!(!formatted.contains("Spending by Day"));
    }

    #[test]
    fn test_health_and_insights() {
        let data = calculate(&sample());
        let report = format_health_report(&financial_health(&data));
        assert!(report.contains("/100"));
        assert!(report.contains("Recommendations:"));

        let text = format_insights(&insights(&data));
        assert!(text.contains("Your highest spending category is Food"));
    }
}
