use std::fmt;

use chrono::NaiveDate;

/// Sequential identifier of an [`Expense`].
pub type ExpenseId = u64;

/// Amount of an expense, kept byte for byte as the text the user submitted.
///
/// The store never rewrites amounts, so a value that does not parse as a
/// number survives a round trip untouched. Use [`Amount::value`] when a
/// number is needed.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!(Amount::new(" 12.50 ").value(), Some(12.5));
/// assert_eq!(Amount::new("lunch").value(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Amount(String);

impl Amount {
    /// Creates an amount from raw text.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().to_string())
    }

    /// Returns the stored text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the amount as a finite number, ignoring surrounding
    /// whitespace.
    pub fn value(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|value| value.is_finite())
    }

    /// Returns `true` if the amount counts as not provided. Only blank text
    /// does: `"0"` is a provided amount.
    pub fn is_missing(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One expense entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    /// Day the expense was recorded. Set on creation, never edited.
    pub date: NaiveDate,
    pub category: String,
    pub amount: Amount,
}
