//! CSV file backing the engine.
//!
//! The store is always read and written as a whole. Writes go to a sibling
//! temporary file which is then renamed over the store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::StringRecord;
use tokio::io::AsyncWriteExt;

use crate::{Amount, EngineError, Expense, ExpenseId, ResultEngine};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Layout of the store, identified by its header row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// `Date,Category,Amount`. Ids are assigned in file order on read.
    V1,
    /// `ID,Date,Category,Amount`. The layout every write produces.
    V2,
}

impl Schema {
    pub const CURRENT: Schema = Schema::V2;

    pub fn header(self) -> &'static [&'static str] {
        match self {
            Self::V1 => &["Date", "Category", "Amount"],
            Self::V2 => &["ID", "Date", "Category", "Amount"],
        }
    }

    fn detect(header: &StringRecord) -> ResultEngine<Schema> {
        let fields: Vec<&str> = header.iter().map(str::trim).collect();
        [Self::V2, Self::V1]
            .into_iter()
            .find(|schema| schema.header() == fields.as_slice())
            .ok_or_else(|| EngineError::UnknownSchema(fields.join(",")))
    }

    fn parse_row(self, row: &StringRecord, next_legacy_id: ExpenseId) -> Result<Expense, String> {
        if row.len() != self.header().len() {
            return Err(format!(
                "expected {} fields, found {}",
                self.header().len(),
                row.len()
            ));
        }

        let (id, rest) = match self {
            Self::V1 => (next_legacy_id, 0),
            Self::V2 => {
                let raw = row[0].trim();
                let id = raw
                    .parse::<ExpenseId>()
                    .map_err(|_| format!("invalid id '{raw}'"))?;
                (id, 1)
            }
        };

        let raw_date = row[rest].trim();
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
            .map_err(|_| format!("invalid date '{raw_date}'"))?;

        Ok(Expense {
            id,
            date,
            category: row[rest + 1].to_string(),
            amount: Amount::new(&row[rest + 2]),
        })
    }
}

/// Parse the full content of a store.
///
/// Rows that cannot be parsed are skipped with a warning. An empty input
/// is an empty store.
pub fn parse_records(data: &[u8]) -> ResultEngine<Vec<Expense>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);
    let mut rows = reader.records();

    let schema = match rows.next() {
        Some(header) => Schema::detect(&header?)?,
        None => return Ok(Vec::new()),
    };
    if schema != Schema::CURRENT {
        tracing::info!("reading legacy {schema:?} store, ids assigned in file order");
    }

    let mut expenses = Vec::new();
    for (index, row) in rows.enumerate() {
        // header is line 1
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(line, "skipping unreadable store row: {err}");
                continue;
            }
        };
        let next_legacy_id = expenses.len() as ExpenseId + 1;
        match schema.parse_row(&row, next_legacy_id) {
            Ok(expense) => expenses.push(expense),
            Err(reason) => tracing::warn!(line, "skipping malformed store row: {reason}"),
        }
    }

    Ok(expenses)
}

/// Format records as a [`Schema::CURRENT`] store.
pub fn format_records(records: &[Expense]) -> ResultEngine<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(Schema::CURRENT.header())?;
    for record in records {
        let id = record.id.to_string();
        let date = record.date.format(DATE_FORMAT).to_string();
        writer.write_record([
            id.as_str(),
            date.as_str(),
            record.category.as_str(),
            record.amount.as_str(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| EngineError::Io(err.into_error()))
}

/// Handle to the CSV file holding every expense.
#[derive(Clone, Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with only the header row, unless it already exists.
    pub async fn ensure_initialized(&self) -> ResultEngine<()> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, format_records(&[])?).await?;
        tracing::info!("created expense store at {}", self.path.display());
        Ok(())
    }

    /// Read every record. A missing file reads as an empty store.
    pub async fn read_all(&self) -> ResultEngine<Vec<Expense>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("store {} not found, reading as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        parse_records(&data)
    }

    /// Replace the store content with `records`, in order.
    ///
    /// The data is synced to a temporary sibling before it is renamed over
    /// the store. The temporary file is removed if any step fails.
    pub async fn write_all(&self, records: &[Expense]) -> ResultEngine<()> {
        let data = format_records(records)?;
        let temp_path = self.path.with_extension("csv.tmp");

        if let Err(err) = self.replace_with(&temp_path, &data).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!(
                    "failed to remove {}: {cleanup}",
                    temp_path.display()
                );
            }
            return Err(err.into());
        }

        tracing::debug!(
            "wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn replace_with(&self, temp_path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(temp_path, &self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: ExpenseId, category: &str, amount: &str) -> Expense {
        Expense {
            id,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            category: category.to_string(),
            amount: Amount::new(amount),
        }
    }

    #[test]
    fn empty_input_is_empty_store() {
        assert_eq!(parse_records(b"").unwrap(), Vec::new());
    }

    #[test]
    fn header_only_is_empty_store() {
        assert_eq!(parse_records(b"ID,Date,Category,Amount\n").unwrap(), Vec::new());
    }

    #[test]
    fn parses_current_layout() {
        let data = b"ID,Date,Category,Amount\n1,2024-03-01,Food,10\n2,2024-03-01,Travel,20.5\n";
        let expenses = parse_records(data).unwrap();
        assert_eq!(
            expenses,
            vec![expense(1, "Food", "10"), expense(2, "Travel", "20.5")]
        );
    }

    #[test]
    fn legacy_layout_gets_ids_in_file_order() {
        let data = b"Date,Category,Amount\n2024-03-01,Food,10\n2024-03-01,Rent,700\n";
        let expenses = parse_records(data).unwrap();
        assert_eq!(
            expenses,
            vec![expense(1, "Food", "10"), expense(2, "Rent", "700")]
        );
    }

    #[test]
    fn unknown_header_is_rejected() {
        let err = parse_records(b"when,what\n").unwrap_err();
        assert_eq!(err, EngineError::UnknownSchema("when,what".to_string()));
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let data = b"ID,Date,Category,Amount\n\
x,2024-03-01,Food,10\n\
2,yesterday,Food,10\n\
3,2024-03-01,Food\n\
4,2024-03-01,Food,abc\n";
        let expenses = parse_records(data).unwrap();
        assert_eq!(expenses, vec![expense(4, "Food", "abc")]);
    }

    #[test]
    fn format_writes_current_header_and_quotes_fields() {
        let data = format_records(&[expense(7, "Eating, out", "12.5")]).unwrap();
        let text = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["ID,Date,Category,Amount", "7,2024-03-01,\"Eating, out\",12.5"]
        );
    }

    #[test]
    fn format_then_parse_keeps_order() {
        let records = vec![
            expense(3, "Travel", "20"),
            expense(1, "Food", "not a number"),
            expense(2, "Food", "5"),
        ];
        let data = format_records(&records).unwrap();
        assert_eq!(parse_records(&data).unwrap(), records);
    }
}
