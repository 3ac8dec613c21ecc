use std::{fs::File, io::Read, path::Path};

use tracing::{debug, warn};

use crate::catalog::{RawRow, RawTable};
use crate::error::{IngestError, Result};

/// Read a headered CSV file into raw rows
pub fn read_rows(path: &Path) -> Result<RawTable> {
    let file = File::open(path)
        .map_err(|e| IngestError::io(e, format!("Failed to open input table: {:?}", path)))?;
    read_rows_from(file)
}

/// Read headered CSV from any reader.
/// Empty cells become nulls. Rows shorter than the header get nulls for the
/// missing cells, surplus cells are ignored.
pub fn read_rows_from<R: Read>(reader: R) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    debug!("Input columns: {:?}", headers);

    let mut rows = Vec::new();
    let mut ragged = 0usize;
    for record in csv_reader.records() {
        let record = record?;
        if record.len() != headers.len() {
            ragged += 1;
        }
        let mut row = RawRow::new();
        for (idx, column) in headers.iter().enumerate() {
            let value = record
                .get(idx)
                .filter(|cell| !cell.is_empty())
                .map(|cell| cell.to_string());
            row.insert(column, value);
        }
        rows.push(row);
    }
    if ragged > 0 {
        warn!("{} row(s) did not match the header width", ragged);
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_become_null() {
        let data = "title,author,year\nA,,2023.0\n";
        let table = read_rows_from(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["title", "author", "year"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("title"), Some("A"));
        assert_eq!(table.rows[0].get("author"), None);
        assert_eq!(table.rows[0].get("year"), Some("2023.0"));
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let data = "title,author,tags\n\"Rust, the book\",\"Klabnik\",\"a, b\nc\"\n";
        let table = read_rows_from(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].get("title"), Some("Rust, the book"));
        assert_eq!(table.rows[0].get("tags"), Some("a, b\nc"));
    }

    #[test]
    fn short_rows_are_kept_with_nulls() {
        let data = "title,author,abstract\nA,X\nB,Y,text\n";
        let table = read_rows_from(data.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("abstract"), None);
        assert_eq!(table.rows[1].get("abstract"), Some("text"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_rows(Path::new("/nonexistent/dir/items.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
