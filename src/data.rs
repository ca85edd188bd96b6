//! Transaction loading and cleaning from CSV

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;

/// A single purchase row from the transaction table.
///
/// Extra columns in the input are ignored; `quantity` and `category` are
/// optional and default to absent when the column is missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub customer_id: String,
    #[serde(deserialize_with = "deserialize_transaction_date")]
    pub transaction_date: NaiveDateTime,
    pub total_amount: f64,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Result of loading a transaction table
#[derive(Debug)]
pub struct LoadOutcome {
    pub transactions: Vec<Transaction>,
    /// Rows discarded because customer_id was empty
    pub dropped_rows: usize,
}

/// Parse an ISO-8601 date or datetime string.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` (both with optional
/// fractional seconds and a trailing `Z`), and bare `YYYY-MM-DD`.
pub fn parse_transaction_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim().trim_end_matches('Z');
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn deserialize_transaction_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_transaction_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unparseable transaction_date '{raw}'")))
}

/// Load transactions from a CSV file.
///
/// # Arguments
/// * `file_path` - Path to the CSV file with at least `transaction_id`,
///   `customer_id`, `transaction_date`, `total_amount` columns
///
/// # Returns
/// * `LoadOutcome` with the cleaned rows and the dropped-row count
pub fn load_transactions(file_path: &str) -> crate::Result<LoadOutcome> {
    let file =
        File::open(file_path).with_context(|| format!("failed to open '{file_path}'"))?;
    read_transactions(file).with_context(|| format!("failed to load '{file_path}'"))
}

/// Load transactions from any CSV reader.
///
/// Rows with an empty `customer_id` are dropped and counted; a malformed
/// required field on any other row aborts the load with a row-numbered error.
pub fn read_transactions<R: Read>(reader: R) -> crate::Result<LoadOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    let mut dropped_rows = 0;
    for (row, result) in csv_reader.deserialize::<Transaction>().enumerate() {
        // +2: one for the header row, one for 1-based numbering
        let tx = result.with_context(|| format!("row {}", row + 2))?;
        if tx.customer_id.is_empty() {
            dropped_rows += 1;
            continue;
        }
        transactions.push(tx);
    }

    if transactions.is_empty() {
        anyhow::bail!("no valid transactions found after filtering");
    }

    Ok(LoadOutcome {
        transactions,
        dropped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "transaction_id,customer_id,transaction_date,total_amount,quantity,category"
        )
        .unwrap();
        writeln!(file, "t1,c1,2024-01-05T08:26:00,120.50,1,electronics").unwrap();
        writeln!(file, "t2,c1,2024-03-10 14:00:00,80.00,2,books").unwrap();
        writeln!(file, "t3,c2,2024-06-01,40.25,1,books").unwrap();
        writeln!(file, "t4,,2024-06-02T09:00:00,15.00,1,toys").unwrap();
        file
    }

    #[test]
    fn test_load_transactions() {
        let test_file = create_test_csv();
        let outcome = load_transactions(test_file.path().to_str().unwrap()).unwrap();

        assert_eq!(outcome.transactions.len(), 3);
        assert_eq!(outcome.dropped_rows, 1);
        assert_eq!(outcome.transactions[0].customer_id, "c1");
        assert_eq!(outcome.transactions[0].total_amount, 120.50);
        assert_eq!(
            outcome.transactions[0].category.as_deref(),
            Some("electronics")
        );
    }

    #[test]
    fn test_date_formats() {
        let with_t = parse_transaction_date("2024-01-05T08:26:00").unwrap();
        let with_space = parse_transaction_date("2024-01-05 08:26:00").unwrap();
        assert_eq!(with_t, with_space);

        let with_zone = parse_transaction_date("2024-01-05T08:26:00Z").unwrap();
        assert_eq!(with_zone, with_t);

        let bare = parse_transaction_date("2024-01-05").unwrap();
        assert_eq!(bare.time(), NaiveTime::MIN);

        assert!(parse_transaction_date("05/01/2024").is_none());
        assert!(parse_transaction_date("not a date").is_none());
    }

    #[test]
    fn test_malformed_row_aborts() {
        let csv = "transaction_id,customer_id,transaction_date,total_amount\n\
                   t1,c1,2024-01-05,10.0\n\
                   t2,c2,garbage,20.0\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 3"));

        let csv = "transaction_id,customer_id,transaction_date,total_amount\n\
                   t1,c1,2024-01-05,not-a-number\n";
        assert!(read_transactions(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_optional_columns_absent() {
        let csv = "transaction_id,customer_id,transaction_date,total_amount\n\
                   t1,c1,2024-01-05,10.0\n";
        let outcome = read_transactions(csv.as_bytes()).unwrap();
        assert_eq!(outcome.transactions[0].quantity, None);
        assert_eq!(outcome.transactions[0].category, None);
    }

    #[test]
    fn test_all_rows_dropped_is_error() {
        let csv = "transaction_id,customer_id,transaction_date,total_amount\n\
                   t1,,2024-01-05,10.0\n";
        assert!(read_transactions(csv.as_bytes()).is_err());
    }
}
