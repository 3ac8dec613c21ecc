use crate::catalog::{NormalizedItem, RawRow};

/// Text columns that get null-filled and trimmed
pub const TEXT_COLUMNS: [&str; 6] = ["title", "author", "subject", "abstract", "tags", "availability"];

/// Null or absent becomes empty, everything else is trimmed
#[inline]
fn clean_text(row: &RawRow, column: &str) -> String {
    row.get(column).map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Normalize one row. Never fails: missing fields degrade to empty strings.
pub fn normalize_row(row: &RawRow) -> NormalizedItem {
    NormalizedItem {
        title: clean_text(row, "title"),
        author: clean_text(row, "author"),
        subject: clean_text(row, "subject"),
        year: row.get("year").map(str::to_string),
        abstract_text: clean_text(row, "abstract"),
        tags: clean_text(row, "tags"),
        availability: clean_text(row, "availability"),
    }
}

/// Normalize every row, in order. No row is dropped.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<NormalizedItem> {
    rows.iter().map(normalize_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_fills_text_columns() {
        let mut row = RawRow::new()
            .with("title", "  Dune \t")
            .with("author", "Herbert")
            .with("tags", " sci-fi; classic ");
        row.insert("abstract", None);
        let item = normalize_row(&row);
        assert_eq!(item.title, "Dune");
        assert_eq!(item.author, "Herbert");
        assert_eq!(item.tags, "sci-fi; classic");
        assert_eq!(item.abstract_text, "");
        assert_eq!(item.subject, "");
        assert_eq!(item.availability, "");
    }

    #[test]
    fn year_passes_through_untouched() {
        let row = RawRow::new().with("title", "A").with("year", " 2023.0");
        let item = normalize_row(&row);
        assert_eq!(item.year.as_deref(), Some(" 2023.0"));

        let row = RawRow::new().with("title", "A");
        assert_eq!(normalize_row(&row).year, None);
    }

    #[test]
    fn every_text_column_is_trimmed() {
        let mut row = RawRow::new();
        for column in TEXT_COLUMNS {
            row.insert(column, Some(format!("  {}  ", column)));
        }
        let item = normalize_row(&row);
        let values = [
            &item.title,
            &item.author,
            &item.subject,
            &item.abstract_text,
            &item.tags,
            &item.availability,
        ];
        for (column, value) in TEXT_COLUMNS.iter().zip(values) {
            assert_eq!(value.as_str(), *column);
        }
    }

    #[test]
    fn missing_availability_is_empty() {
        let row = RawRow::new().with("title", "A").with("author", "X");
        assert_eq!(normalize_row(&row).availability, "");

        let mut row = RawRow::new().with("title", "A");
        row.insert("availability", None);
        assert_eq!(normalize_row(&row).availability, "");
    }

    #[test]
    fn keeps_every_row() {
        let rows = vec![RawRow::new(), RawRow::new().with("title", "x"), RawRow::new()];
        let items = normalize_rows(&rows);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].title, "x");
    }
}
