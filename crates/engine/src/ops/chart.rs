use std::collections::BTreeMap;

use crate::{Expense, ResultEngine};

use super::Engine;

/// Total amount per category, ordered by category name.
pub type ChartTotals = BTreeMap<String, f64>;

/// Sum amounts per category. Expenses whose amount is not a number are left
/// out with a warning.
pub fn category_totals(expenses: &[Expense]) -> ChartTotals {
    let mut totals = ChartTotals::new();
    for expense in expenses {
        let Some(value) = expense.amount.value() else {
            tracing::warn!(
                id = expense.id,
                amount = %expense.amount,
                "skipping expense with non numeric amount"
            );
            continue;
        };
        *totals.entry(expense.category.clone()).or_insert(0.0) += value;
    }
    totals
}

impl Engine {
    /// Category totals over the whole store.
    pub async fn chart_totals(&self) -> ResultEngine<ChartTotals> {
        let expenses = self.snapshot().await?;
        Ok(category_totals(&expenses))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Amount;

    fn expense(id: u64, category: &str, amount: &str) -> Expense {
        Expense {
            id,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: category.to_string(),
            amount: Amount::new(amount),
        }
    }

    #[test]
    fn sums_per_category() {
        let totals = category_totals(&[
            expense(1, "Food", "10"),
            expense(2, "Food", "5"),
            expense(3, "Travel", "20"),
        ]);
        assert_eq!(
            totals,
            ChartTotals::from([("Food".to_string(), 15.0), ("Travel".to_string(), 20.0)])
        );
    }

    #[test]
    fn non_numeric_amounts_are_skipped() {
        let totals = category_totals(&[
            expense(1, "Food", "10"),
            expense(2, "Food", "ten"),
            expense(3, "Gifts", "n/a"),
        ]);
        assert_eq!(totals, ChartTotals::from([("Food".to_string(), 10.0)]));
    }

    #[test]
    fn empty_store_has_no_totals() {
        assert!(category_totals(&[]).is_empty());
    }
}
