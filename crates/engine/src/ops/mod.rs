use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;

use crate::{Amount, CsvStore, EngineError, Expense, ResultEngine};

mod chart;
mod expenses;

pub use chart::{ChartTotals, category_totals};
pub use expenses::CategoryFilter;

const MISSING_FIELDS: &str = "Missing fields";

#[derive(Debug)]
pub struct Engine {
    store: Mutex<CsvStore>,
    today: fn() -> NaiveDate,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Read the whole store while holding the lock.
    async fn snapshot(&self) -> ResultEngine<Vec<Expense>> {
        let store = self.store.lock().await;
        store.read_all().await
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Validate the fields of an add or edit request.
fn validate_input(category: &str, amount: Option<&str>) -> ResultEngine<(String, Amount)> {
    let category = category.trim();
    let amount = amount.map(Amount::new).unwrap_or_default();
    if category.is_empty() || amount.is_missing() {
        return Err(EngineError::Validation(MISSING_FIELDS.to_string()));
    }
    Ok((category.to_string(), amount))
}

/// The builder for `Engine`
pub struct EngineBuilder {
    store: CsvStore,
    today: fn() -> NaiveDate,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            store: CsvStore::new("expenses.csv"),
            today: local_today,
        }
    }
}

impl EngineBuilder {
    /// Pass the store holding the expenses
    pub fn store(mut self, store: CsvStore) -> EngineBuilder {
        self.store = store;
        self
    }

    /// Override the clock used to date new expenses
    pub fn today(mut self, today: fn() -> NaiveDate) -> EngineBuilder {
        self.today = today;
        self
    }

    /// Construct `Engine`, creating the store file if missing
    pub async fn build(self) -> ResultEngine<Engine> {
        self.store.ensure_initialized().await?;
        Ok(Engine {
            store: Mutex::new(self.store),
            today: self.today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_trims_category() {
        let (category, amount) = validate_input("  Food ", Some("12")).unwrap();
        assert_eq!(category, "Food");
        assert_eq!(amount, Amount::new("12"));
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let missing = EngineError::Validation(MISSING_FIELDS.to_string());
        assert_eq!(validate_input("", Some("12")).unwrap_err(), missing);
        assert_eq!(validate_input("   ", Some("12")).unwrap_err(), missing);
        assert_eq!(validate_input("Food", None).unwrap_err(), missing);
        assert_eq!(validate_input("Food", Some("")).unwrap_err(), missing);
        assert_eq!(validate_input("Food", Some("  ")).unwrap_err(), missing);
    }

    #[test]
    fn validate_accepts_zero_text() {
        let (_, amount) = validate_input("Food", Some("0")).unwrap();
        assert_eq!(amount, Amount::new("0"));
    }
}
