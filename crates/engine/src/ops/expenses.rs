use crate::{EngineError, Expense, ExpenseId, ResultEngine};

use super::{Engine, validate_input};

/// Narrowing applied when listing expenses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match on the category.
    Category(String),
}

impl CategoryFilter {
    /// Query value that explicitly asks for every category.
    pub const ALL: &'static str = "All";

    /// Build a filter from the `category` query parameter. Absent, empty and
    /// [`CategoryFilter::ALL`] mean no filter.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(Self::ALL) => Self::All,
            Some(category) => Self::Category(category.to_string()),
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => expense.category == *category,
        }
    }
}

fn parse_id(id: &str) -> Option<ExpenseId> {
    match id.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::debug!("ignoring non numeric expense id '{id}'");
            None
        }
    }
}

fn next_id(expenses: &[Expense]) -> ResultEngine<ExpenseId> {
    match expenses.iter().map(|e| e.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(EngineError::IdOverflow(max)),
    }
}

impl Engine {
    /// Record a new expense dated today and return it.
    ///
    /// The id is one past the highest id in the store, or `1` for an empty
    /// store.
    pub async fn add(&self, category: &str, amount: Option<&str>) -> ResultEngine<Expense> {
        let (category, amount) = validate_input(category, amount)?;

        let store = self.store.lock().await;
        let mut expenses = store.read_all().await?;
        let expense = Expense {
            id: next_id(&expenses)?,
            date: (self.today)(),
            category,
            amount,
        };
        expenses.push(expense.clone());
        store.write_all(&expenses).await?;

        tracing::info!(
            id = expense.id,
            category = %expense.category,
            "expense added"
        );
        Ok(expense)
    }

    /// List expenses in store order.
    pub async fn list(&self, filter: &CategoryFilter) -> ResultEngine<Vec<Expense>> {
        let mut expenses = self.snapshot().await?;
        expenses.retain(|expense| filter.matches(expense));
        Ok(expenses)
    }

    /// Remove every expense with the given id and return how many were
    /// removed. Unknown ids leave the store untouched.
    pub async fn delete(&self, id: &str) -> ResultEngine<usize> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };

        let store = self.store.lock().await;
        let mut expenses = store.read_all().await?;
        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        let removed = before - expenses.len();

        if removed == 0 {
            tracing::debug!(id, "delete matched no expense");
            return Ok(0);
        }
        store.write_all(&expenses).await?;
        tracing::info!(id, removed, "expense deleted");
        Ok(removed)
    }

    /// Overwrite category and amount of the first expense with the given id.
    ///
    /// Returns `false` when no expense matches. Id and date never change.
    pub async fn edit(
        &self,
        id: &str,
        category: &str,
        amount: Option<&str>,
    ) -> ResultEngine<bool> {
        let (category, amount) = validate_input(category, amount)?;
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        let store = self.store.lock().await;
        let mut expenses = store.read_all().await?;
        let Some(expense) = expenses.iter_mut().find(|expense| expense.id == id) else {
            tracing::debug!(id, "edit matched no expense");
            return Ok(false);
        };
        expense.category = category;
        expense.amount = amount;

        store.write_all(&expenses).await?;
        tracing::info!(id, "expense edited");
        Ok(true)
    }
}
