use std::collections::HashSet;

use crate::catalog::NormalizedItem;

/// Keep the first item for every `(title, author)` key, preserving input order.
/// Matching is exact and case-sensitive.
pub fn dedup_items(items: Vec<NormalizedItem>) -> Vec<NormalizedItem> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert((item.title.clone(), item.author.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{normalizer::normalize_rows, RawRow};

    fn rows(data: &[(&str, &str, &str)]) -> Vec<NormalizedItem> {
        let raw: Vec<RawRow> = data
            .iter()
            .map(|(t, a, abs)| RawRow::new().with("title", *t).with("author", *a).with("abstract", *abs))
            .collect();
        normalize_rows(&raw)
    }

    #[test]
    fn first_occurrence_wins() {
        let items = rows(&[("A", "X", "ml"), ("A", "X", "different"), ("B", "Y", "db")]);
        let kept = dedup_items(items.clone());
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0], items[0]);
        assert_eq!(kept[0].abstract_text, "ml");
        assert_eq!(kept[1], items[2]);
    }

    #[test]
    fn case_sensitive_keys() {
        let kept = dedup_items(rows(&[("A", "X", ""), ("a", "X", ""), ("A", "x", "")]));
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn whitespace_differences_collapse_after_trim() {
        let kept = dedup_items(rows(&[("A ", " X", "first"), ("A", "X", "second")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].abstract_text, "first");
    }

    #[test]
    fn preserves_first_seen_order_and_uniqueness() {
        let kept = dedup_items(rows(&[
            ("C", "1", ""),
            ("A", "1", ""),
            ("C", "1", ""),
            ("B", "1", ""),
            ("A", "1", ""),
        ]));
        let titles: Vec<&str> = kept.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
        let keys: HashSet<(&str, &str)> = kept.iter().map(|i| i.key()).collect();
        assert_eq!(keys.len(), kept.len());
    }
}
