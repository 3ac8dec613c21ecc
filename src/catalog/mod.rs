//! Catalog rows: reading, normalization, deduplication and corpus building.

pub mod corpus;
pub mod dedup;
pub mod normalizer;
pub mod reader;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Columns whose absence leaves no usable identity key
pub const REQUIRED_COLUMNS: [&str; 2] = ["title", "author"];

/// Untyped row as read from the source table.
/// `None` marks a null cell; a column missing from the map is treated the same.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: IndexMap<String, Option<String>>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.insert(column, Some(value.into()));
        self
    }

    pub fn insert(&mut self, column: &str, value: Option<String>) -> &mut Self {
        self.fields.insert(column.to_string(), value);
        self
    }

    /// Cell value, `None` for null or absent
    #[inline]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(|v| v.as_deref())
    }
}

/// Header plus rows of one input table
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Fails with a schema error naming every required column the header lacks
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IngestError::Schema { missing })
        }
    }
}

/// Cleaned catalog item.
/// String fields are never null and carry no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub title: String,
    pub author: String,
    pub subject: String,
    /// Passed through verbatim from the source
    pub year: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub tags: String,
    pub availability: String,
}

impl NormalizedItem {
    /// Identity used for deduplication, case-sensitive
    #[inline]
    pub fn key(&self) -> (&str, &str) {
        (&self.title, &self.author)
    }

    /// Integer view of `year`; accepts integral decimals such as `2023.0`
    pub fn year_number(&self) -> Option<i64> {
        let raw = self.year.as_deref()?.trim();
        if let Ok(year) = raw.parse::<i64>() {
            return Some(year);
        }
        let value = raw.parse::<f64>().ok()?;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(value as i64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_year(year: Option<&str>) -> NormalizedItem {
        NormalizedItem {
            title: "T".into(),
            author: "A".into(),
            subject: String::new(),
            year: year.map(str::to_string),
            abstract_text: String::new(),
            tags: String::new(),
            availability: String::new(),
        }
    }

    #[test]
    fn year_number_reads_integral_values() {
        assert_eq!(item_with_year(Some("1999")).year_number(), Some(1999));
        assert_eq!(item_with_year(Some("2023.0")).year_number(), Some(2023));
        assert_eq!(item_with_year(Some("2023.5")).year_number(), None);
        assert_eq!(item_with_year(Some("circa 1900")).year_number(), None);
        assert_eq!(item_with_year(None).year_number(), None);
    }

    #[test]
    fn require_columns_lists_all_missing() {
        let table = RawTable {
            headers: vec!["subject".into(), "year".into()],
            rows: Vec::new(),
        };
        match table.require_columns(&REQUIRED_COLUMNS) {
            Err(IngestError::Schema { missing }) => {
                assert_eq!(missing, vec!["title".to_string(), "author".to_string()]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn raw_row_null_and_absent_read_the_same() {
        let mut row = RawRow::new().with("title", "x");
        row.insert("author", None);
        assert_eq!(row.get("title"), Some("x"));
        assert_eq!(row.get("author"), None);
        assert_eq!(row.get("tags"), None);
    }
}
