//! Category display formatting

use tabled::Tabled;

use crate::models::Category;

use super::render_table;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Created")]
    created: String,
}

pub fn format_category_list(categories: &[Category]) -> String {
    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            kind: c.kind.to_string(),
            created: c.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect();
    render_table(rows, "No categories yet. They are created when you add transactions.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionType, UserId};

    #[test]
    fn test_format_category_list() {
        let user = UserId::new();
        let list = vec![
            Category::new(user, "Food", TransactionType::Expense),
            Category::new(user, "Allowance", TransactionType::Income),
        ];
        let formatted = format_category_list(&list);
        assert!(formatted.contains("Food"));
        assert!(formatted.contains("income"));
    }

    #[test]
    fn test_format_empty_categories() {
        assert!(format_category_list(&[]).contains("No categories yet"));
    }
}
