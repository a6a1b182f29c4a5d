//! Analytics over a user's transactions
//!
//! Category breakdown, month-by-month trends, day-of-week spending patterns,
//! a 0-100 financial health score and short text insights.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::Serialize;

use crate::models::money::as_major;
use crate::models::{Money, Transaction};

use super::transaction::{total_expenses, total_income};

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Direction of a category's spending over time
///
/// Only `Stable` is produced today: there is no historical baseline yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalytics {
    pub category: String,
    #[serde(with = "as_major")]
    pub amount: Money,
    pub count: usize,
    /// Share of total expenses, 0-100
    pub percentage: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// `YYYY-MM`
    pub month: String,
    #[serde(with = "as_major")]
    pub income: Money,
    #[serde(with = "as_major")]
    pub expenses: Money,
    #[serde(with = "as_major")]
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingPattern {
    pub day_of_week: &'static str,
    #[serde(with = "as_major")]
    pub average_spending: Money,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    #[serde(with = "as_major")]
    pub total_income: Money,
    #[serde(with = "as_major")]
    pub total_expenses: Money,
    #[serde(with = "as_major")]
    pub balance: Money,
    pub transaction_count: usize,
    #[serde(with = "as_major")]
    pub average_expense: Money,
    #[serde(with = "as_major")]
    pub average_income: Money,
    pub top_categories: Vec<CategoryAnalytics>,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub spending_patterns: Vec<SpendingPattern>,
}

impl AnalyticsData {
    /// Percentage of income kept; 0 when there is no income
    pub fn savings_rate(&self) -> f64 {
        if !self.total_income.is_positive() {
            return 0.0;
        }
        (self.total_income - self.total_expenses).as_major() / self.total_income.as_major() * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthLevel {
    fn from_score(score: u32) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl std::fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialHealth {
    pub score: u32,
    pub level: HealthLevel,
    pub recommendations: Vec<String>,
}

fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        Money::zero()
    } else {
        Money::from_major(total.as_major() / count as f64)
    }
}

/// Compute the full analytics snapshot for a list of transactions
pub fn calculate(transactions: &[Transaction]) -> AnalyticsData {
    let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
    let income_count = transactions.iter().filter(|t| t.is_income()).count();

    let total_income = total_income(transactions);
    let total_expenses = total_expenses(transactions);

    AnalyticsData {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count: transactions.len(),
        average_expense: average(total_expenses, expenses.len()),
        average_income: average(total_income, income_count),
        top_categories: top_categories(&expenses),
        monthly_trends: monthly_trends(transactions),
        spending_patterns: spending_patterns(&expenses),
    }
}

/// Expense totals per category, largest first
pub fn top_categories(expenses: &[&Transaction]) -> Vec<CategoryAnalytics> {
    let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let entry = totals
            .entry(expense.category.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let total: Money = expenses.iter().map(|t| t.amount).sum();

    let mut categories: Vec<CategoryAnalytics> = totals
        .into_iter()
        .map(|(category, (amount, count))| CategoryAnalytics {
            category: category.to_string(),
            amount,
            count,
            percentage: if total.is_positive() {
                amount.minor() as f64 * 100.0 / total.minor() as f64
            } else {
                0.0
            },
            trend: Trend::Stable,
        })
        .collect();

    // Ties broken by name so the order is deterministic
    categories.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
    categories
}

/// Income and expenses per calendar month, oldest first
pub fn monthly_trends(transactions: &[Transaction]) -> Vec<MonthlyTrend> {
    let mut months: BTreeMap<String, (Money, Money)> = BTreeMap::new();
    for txn in transactions {
        let key = format!("{:04}-{:02}", txn.date.year(), txn.date.month());
        let entry = months.entry(key).or_insert((Money::zero(), Money::zero()));
        if txn.is_income() {
            entry.0 += txn.amount;
        } else {
            entry.1 += txn.amount;
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTrend {
            month,
            income,
            expenses,
            balance: income - expenses,
        })
        .collect()
}

/// Average expense per weekday, always seven entries from Sunday
pub fn spending_patterns(expenses: &[&Transaction]) -> Vec<SpendingPattern> {
    let mut days = [(Money::zero(), 0usize); 7];
    for expense in expenses {
        let idx = expense.date.weekday().num_days_from_sunday() as usize;
        days[idx].0 += expense.amount;
        days[idx].1 += 1;
    }

    DAY_NAMES
        .iter()
        .zip(days)
        .map(|(day, (total, count))| SpendingPattern {
            day_of_week: *day,
            average_spending: average(total, count),
            transaction_count: count,
        })
        .collect()
}

/// Score saving habits, spending spread, tracking frequency and balance
pub fn financial_health(analytics: &AnalyticsData) -> FinancialHealth {
    let mut score = 0;
    let mut recommendations = Vec::new();

    let savings_rate = analytics.savings_rate();
    if savings_rate >= 20.0 {
        score += 40;
    } else if savings_rate >= 10.0 {
        score += 30;
        recommendations.push("Try to save at least 20% of your income".to_string());
    } else if savings_rate >= 0.0 {
        score += 15;
        recommendations.push("Increase your savings rate to at least 10%".to_string());
    } else {
        recommendations
            .push("You're spending more than you earn - review your expenses".to_string());
    }

    match analytics.top_categories.first().map(|c| c.percentage) {
        Some(share) if share < 40.0 => score += 30,
        Some(share) if share < 60.0 => {
            score += 20;
            recommendations.push("Try to diversify your spending across categories".to_string());
        }
        _ => {
            score += 10;
            recommendations
                .push("Too much spending in one category - consider rebalancing".to_string());
        }
    }

    if analytics.transaction_count >= 20 {
        score += 20;
    } else if analytics.transaction_count >= 10 {
        score += 15;
    } else {
        score += 10;
        recommendations.push("Track more transactions for better financial insights".to_string());
    }

    let balance = analytics.balance.minor() as f64;
    if balance >= analytics.total_income.minor() as f64 * 0.1 {
        score += 10;
    } else if balance >= 0.0 {
        score += 5;
    }

    FinancialHealth {
        score,
        level: HealthLevel::from_score(score),
        recommendations,
    }
}

/// Short human-readable observations for the dashboard
pub fn insights(analytics: &AnalyticsData) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(top) = analytics.top_categories.first() {
        insights.push(format!(
            "Your highest spending category is {} at ₹{:.2}",
            top.category,
            top.amount.as_major()
        ));
    }

    let savings_rate = analytics.savings_rate();
    if savings_rate > 0.0 {
        insights.push(format!("You're saving {:.1}% of your income", savings_rate));
    } else {
        insights.push("You're spending more than you earn this period".to_string());
    }

    if analytics.average_expense.is_positive() {
        insights.push(format!(
            "Your average expense is ₹{:.2}",
            analytics.average_expense.as_major()
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionType, UserId};
    use chrono::NaiveDate;

    fn txn(amount: i64, category: &str, kind: TransactionType, y: i32, m: u32, d: u32) -> Transaction {
        Transaction::new(
            UserId::new(),
            Money::from_minor(amount),
            category,
            "entry",
            kind,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(2_000_000, "Allowance", TransactionType::Income, 2024, 1, 1),
            txn(600_000, "Rent", TransactionType::Expense, 2024, 1, 5),
            txn(300_000, "Food", TransactionType::Expense, 2024, 1, 7),
            txn(100_000, "Food", TransactionType::Expense, 2024, 2, 3),
            txn(1_000_000, "Scholarship", TransactionType::Income, 2023, 12, 20),
        ]
    }

    #[test]
    fn test_calculate_totals() {
        let data = calculate(&sample());
        assert_eq!(data.total_income, Money::from_minor(3_000_000));
        assert_eq!(data.total_expenses, Money::from_minor(1_000_000));
        assert_eq!(data.balance, Money::from_minor(2_000_000));
        assert_eq!(data.transaction_count, 5);
        assert_eq!(data.average_income, Money::from_minor(1_500_000));
        assert_eq!(data.average_expense, Money::from_minor(333_333));
    }

    #[test]
    fn test_top_categories_sorted_and_sum_to_hundred() {
        let data = calculate(&sample());
        let names: Vec<_> = data.top_categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food"]);
        assert_eq!(data.top_categories[1].count, 2);
        assert!(data.top_categories.iter().all(|c| c.trend == Trend::Stable));

        let sum: f64 = data.top_categories.iter().map(|c| c.percentage).sum();
        assert!((sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_top_categories_ignore_income() {
        let only_income = vec![txn(5000, "Allowance", TransactionType::Income, 2024, 1, 1)];
        assert!(calculate(&only_income).top_categories.is_empty());
    }

    #[test]
    fn test_monthly_trends_ascending() {
        let trends = monthly_trends(&sample());
        let months: Vec<_> = trends.iter().map(|t| t.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
        assert_eq!(trends[1].income, Money::from_minor(2_000_000));
        assert_eq!(trends[1].expenses, Money::from_minor(900_000));
        assert_eq!(trends[2].balance, Money::from_minor(-100_000));
    }

    #[test]
    fn test_spending_patterns_has_all_weekdays() {
        let data = calculate(&sample());
        assert_eq!(data.spending_patterns.len(), 7);
        assert_eq!(data.spending_patterns[0].day_of_week, "Sunday");

        // 2024-01-05 was a Friday
        let friday = &data.spending_patterns[5];
        assert_eq!(friday.transaction_count, 1);
        assert_eq!(friday.average_spending, Money::from_minor(600_000));
        assert_eq!(data.spending_patterns[1].average_spending, Money::zero());
    }

    #[test]
    fn test_health_score_for_saver() {
        // savings 66% → 40, top share 60% → 10, 5 txns → 10, balance ≥ 10% → 10
        let health = financial_health(&calculate(&sample()));
        assert_eq!(health.score, 70);
        assert_eq!(health.level, HealthLevel::Good);
        assert_eq!(health.recommendations.len(), 2);
    }

    #[test]
    fn test_health_score_for_overspender() {
        let list = vec![
            txn(10_000, "Allowance", TransactionType::Income, 2024, 1, 1),
            txn(50_000, "Food", TransactionType::Expense, 2024, 1, 2),
        ];
        let health = financial_health(&calculate(&list));
        // 0 + 10 + 10 + 0
        assert_eq!(health.score, 20);
        assert_eq!(health.level, HealthLevel::Poor);
        assert!(health.recommendations[0].contains("spending more than you earn"));
    }

    #[test]
    fn test_empty_analytics() {
        let data = calculate(&[]);
        assert_eq!(data.balance, Money::zero());
        assert!(data.top_categories.is_empty());

        let health = financial_health(&data);
        // 15 + 10 + 10 + 10
        assert_eq!(health.score, 45);
        assert_eq!(health.level, HealthLevel::Fair);
    }

    #[test]
    fn test_insights() {
        let lines = insights(&calculate(&sample()));
        assert_eq!(lines[0], "Your highest spending category is Rent at ₹6000.00");
        assert_eq!(lines[1], "You're saving 66.7% of your income");
        assert_eq!(lines[2], "Your average expense is ₹3333.33");
    }

    #[test]
    fn test_json_uses_camel_case_major_units() {
        let json = serde_json::to_value(calculate(&sample())).unwrap();
        assert_eq!(json["totalIncome"], 30000.0);
        assert_eq!(json["topCategories"][0]["trend"], "stable");
        assert_eq!(json["spendingPatterns"][0]["dayOfWeek"], "Sunday");
    }
}
