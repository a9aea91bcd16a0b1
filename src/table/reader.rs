//! Delimited-text input.

use std::io;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::models::{RawRow, RawTable};

/// Reads a CSV document with a header row into a [`RawTable`].
///
/// Cells are trimmed and ragged rows are accepted; a short row simply has
/// no value for its trailing columns. A UTF-8 byte-order mark before the
/// header is ignored.
///
/// # Errors
///
/// Returns `InvalidInput` when the text is not valid UTF-8 or the CSV
/// structure cannot be parsed.
///
/// # Example
///
/// ```
/// use meal_audit::table::read_table;
///
/// let csv = "Employee,Date\nAna,\"Jul 04, 2025\"\n";
/// let table = read_table(csv.as_bytes())?;
/// assert_eq!(table.headers, vec!["Employee", "Date"]);
/// assert_eq!(table.rows[0].get("Date"), Some("Jul 04, 2025"));
/// # Ok::<(), meal_audit::error::AuditError>(())
/// ```
pub fn read_table<R: io::Read>(reader: R) -> AuditResult<RawTable> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| invalid_input("header", e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| invalid_input(&format!("row {}", index + 1), e))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    debug!(columns = headers.len(), rows = rows.len(), "Read delimited input");

    Ok(RawTable::new(headers, rows))
}

fn invalid_input(location: &str, error: csv::Error) -> AuditError {
    AuditError::InvalidInput {
        message: format!("{}: {}", location, error),
    }
}
