use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Amount as sent by clients.
    ///
    /// Numbers and strings are stored as text, so `12.50` and `"12.50"` end
    /// up identical. Any other JSON value is accepted here and sorted out by
    /// [`AmountInput::into_text`].
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Number(serde_json::Number),
        Text(String),
        Bool(bool),
        Other(serde_json::Value),
    }

    impl AmountInput {
        /// Text to store, or `None` when the value counts as not provided:
        /// a numeric zero, `false`, or an empty array or object.
        ///
        /// Strings are returned as sent, so `"0"` is a provided amount.
        pub fn into_text(self) -> Option<String> {
            match self {
                Self::Number(number) if number.as_f64() == Some(0.0) => None,
                Self::Number(number) => Some(number.to_string()),
                Self::Text(text) => Some(text),
                Self::Bool(false) => None,
                Self::Bool(true) => Some("true".to_string()),
                Self::Other(serde_json::Value::Array(items)) if items.is_empty() => None,
                Self::Other(serde_json::Value::Object(fields)) if fields.is_empty() => None,
                Self::Other(value) => Some(value.to_string()),
            }
        }
    }

    /// Body of `POST /add` and `PUT /edit/{id}`.
    ///
    /// Both fields are optional on the wire so that a missing field is
    /// reported as a validation error rather than a decoding one.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseInput {
        pub category: Option<String>,
        pub amount: Option<AmountInput>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseListQuery {
        /// Exact category to keep. `All` keeps everything.
        pub category: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        #[serde(rename = "ID")]
        pub id: u64,
        #[serde(rename = "Date")]
        pub date: NaiveDate,
        #[serde(rename = "Category")]
        pub category: String,
        #[serde(rename = "Amount")]
        pub amount: String,
    }
}

pub mod chart {
    use std::collections::BTreeMap;

    /// Response of `GET /chart-data`: total amount per category.
    pub type ChartData = BTreeMap<String, f64>;
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::expense::{AmountInput, ExpenseInput};

    fn amount_text(json: &str) -> Option<String> {
        let input: ExpenseInput = serde_json::from_str(json).unwrap();
        input.amount.and_then(AmountInput::into_text)
    }

    #[test]
    fn amount_accepts_number_or_string() {
        assert_eq!(amount_text(r#"{"amount": 12.5}"#).as_deref(), Some("12.5"));
        assert_eq!(amount_text(r#"{"amount": "7"}"#).as_deref(), Some("7"));
    }

    #[test]
    fn zero_string_is_provided_but_zero_number_is_not() {
        assert_eq!(amount_text(r#"{"amount": "0"}"#).as_deref(), Some("0"));
        assert_eq!(amount_text(r#"{"amount": 0}"#), None);
        assert_eq!(amount_text(r#"{"amount": 0.0}"#), None);
    }

    #[test]
    fn falsy_json_values_are_not_provided() {
        assert_eq!(amount_text(r#"{"amount": false}"#), None);
        assert_eq!(amount_text(r#"{"amount": []}"#), None);
        assert_eq!(amount_text(r#"{"amount": {}}"#), None);
        assert_eq!(amount_text(r#"{"amount": null}"#), None);
        assert_eq!(amount_text(r#"{}"#), None);
    }

    #[test]
    fn absent_or_null_fields_decode_as_none() {
        let input: ExpenseInput = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        assert!(input.category.is_none());
        assert!(input.amount.is_none());
    }
}
