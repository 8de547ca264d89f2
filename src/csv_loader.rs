//! CSV loader for batch tax calculation input.
//!
//! ## CSV Format
//!
//! The header row must be exactly `totalIncome,wht,donation`, in that order.
//! Every data row must have exactly three numeric fields. Whitespace around
//! data fields is ignored; header cells must match exactly.
//!
//! ```csv
//! totalIncome,wht,donation
//! 500000,0,0
//! 600000,40000,20000
//! ```
//!
//! Each row becomes a [`TaxInformation`] with a single donation allowance.

use std::io::Read;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{AllowanceType, TaxInformation};

/// The required header, column by column.
pub const CSV_HEADER: [&str; 3] = ["totalIncome", "wht", "donation"];

/// Errors that can occur while reading batch input.
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    /// The underlying CSV reader failed (bad quoting, invalid UTF-8, I/O).
    #[error("cannot reading csv: {0}")]
    Read(#[from] csv::Error),

    /// The header row is missing columns, has extra ones, or is misspelled.
    #[error("invalid csv header")]
    InvalidHeader,

    /// A data row has the wrong number of fields. `row` is 1-based, counting
    /// the header as row 0.
    #[error("cannot parsing data: row {row} has {fields} fields, expected 3")]
    FieldCount {
        /// The offending row.
        row: usize,
        /// How many fields it had.
        fields: usize,
    },

    /// A field is not a number.
    #[error("cannot parsing data: row {row} column '{column}' value '{value}'")]
    InvalidNumber {
        /// The offending row.
        row: usize,
        /// The column name.
        column: &'static str,
        /// The raw value.
        value: String,
    },
}

/// Parses CSV text into tax information records, in file order.
///
/// Empty input yields no records.
pub fn load_from_str(input: &str) -> Result<Vec<TaxInformation>, CsvError> {
    load_from_reader(input.as_bytes())
}

/// Parses CSV from any reader into tax information records, in file order.
///
/// # Errors
///
/// * [`CsvError::Read`] if the CSV is structurally unreadable.
/// * [`CsvError::InvalidHeader`] if the header does not match [`CSV_HEADER`].
/// * [`CsvError::FieldCount`] / [`CsvError::InvalidNumber`] for a malformed
///   data row.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<TaxInformation>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();

    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };
    validate_header(&header?)?;

    let mut tax_information = Vec::new();
    for (index, record) in records.enumerate() {
        tax_information.push(convert_row(&record?, index + 1)?);
    }
    Ok(tax_information)
}

fn validate_header(header: &csv::StringRecord) -> Result<(), CsvError> {
    if header.len() == CSV_HEADER.len() && header.iter().eq(CSV_HEADER) {
        Ok(())
    } else {
        Err(CsvError::InvalidHeader)
    }
}

fn convert_row(record: &csv::StringRecord, row: usize) -> Result<TaxInformation, CsvError> {
    if record.len() != CSV_HEADER.len() {
        return Err(CsvError::FieldCount {
            row,
            fields: record.len(),
        });
    }

    let field = |column: usize| -> Result<Decimal, CsvError> {
        let value = record[column].trim();
        parse_decimal(value).ok_or_else(|| CsvError::InvalidNumber {
            row,
            column: CSV_HEADER[column],
            value: value.to_string(),
        })
    };

    Ok(TaxInformation::new(field(0)?)
        .with_wht(field(1)?)
        .with_allowance(AllowanceType::Donation, field(2)?))
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
