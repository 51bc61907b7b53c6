//! Expense bookkeeping engine.
//!
//! The engine owns the CSV store and serializes every read/modify/write
//! cycle behind a single lock. See [`Engine`] for the available operations
//! and [`CsvStore`] for the on-disk format.

pub use error::EngineError;
pub use expense::{Amount, Expense, ExpenseId};
pub use ops::{CategoryFilter, ChartTotals, Engine, EngineBuilder, category_totals};
pub use store::{CsvStore, Schema, format_records, parse_records};

mod error;
mod expense;
mod ops;
mod store;

type ResultEngine<T> = Result<T, EngineError>;
