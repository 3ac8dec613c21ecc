use crate::catalog::NormalizedItem;

/// Searchable text of one item: `title abstract tags`, single-space joined.
/// Empty fields still contribute their separator so field positions are fixed.
#[inline]
pub fn corpus_document(item: &NormalizedItem) -> String {
    let mut doc =
        String::with_capacity(item.title.len() + item.abstract_text.len() + item.tags.len() + 2);
    doc.push_str(&item.title);
    doc.push(' ');
    doc.push_str(&item.abstract_text);
    doc.push(' ');
    doc.push_str(&item.tags);
    doc
}

/// One document per item, index-aligned with `items`
pub fn build_corpus(items: &[NormalizedItem]) -> Vec<String> {
    items.iter().map(corpus_document).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, abs: &str, tags: &str) -> NormalizedItem {
        NormalizedItem {
            title: title.into(),
            author: "someone".into(),
            subject: "ignored".into(),
            year: None,
            abstract_text: abs.into(),
            tags: tags.into(),
            availability: "available".into(),
        }
    }

    #[test]
    fn joins_three_fields_in_order() {
        assert_eq!(corpus_document(&item("Dune", "desert planet", "sf")), "Dune desert planet sf");
    }

    #[test]
    fn empty_fields_keep_separators() {
        assert_eq!(corpus_document(&item("Dune", "", "sf")), "Dune  sf");
        assert_eq!(corpus_document(&item("", "", "")), "  ");
    }

    #[test]
    fn corpus_is_aligned_with_items() {
        let items = vec![item("a", "", ""), item("b", "x", ""), item("", "", "")];
        let corpus = build_corpus(&items);
        assert_eq!(corpus.len(), items.len());
        for (doc, item) in corpus.iter().zip(&items) {
            assert_eq!(doc, &corpus_document(item));
        }
    }
}
