use crate::config::VectorizerConfig;
use crate::vectorizer::term::TermFrequency;

/// Turns raw document text into n-gram counts.
///
/// Tokens are maximal runs of alphanumeric characters or `_`; everything else
/// separates them. Tokens shorter than `min_token_len` characters are dropped
/// before n-grams are formed, and n-gram parts are joined with one space.
#[derive(Debug, Clone)]
pub struct Analyzer {
    lowercase: bool,
    min_token_len: usize,
    ngram_range: (usize, usize),
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Analyzer {
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            lowercase: config.lowercase,
            min_token_len: config.min_token_len,
            ngram_range: config.ngram_range,
        }
    }

    pub fn tokens(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        text.split(|c: char| !is_word_char(c))
            .filter(|tok| !tok.is_empty() && tok.chars().count() >= self.min_token_len)
            .map(str::to_string)
            .collect()
    }

    /// All n-grams of the configured lengths, in text order, shortest first
    pub fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n == 0 || n > tokens.len() {
                continue;
            }
            grams.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        grams
    }

    pub fn term_frequency(&self, text: &str) -> TermFrequency {
        let grams = self.ngrams(&self.tokens(text));
        let mut freq = TermFrequency::new();
        freq.add_terms(&grams);
        freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::new(&VectorizerConfig::default())
    }

    #[test]
    fn splits_on_punctuation_and_lowercases() {
        let toks = analyzer().tokens("Machine-Learning, for DB_systems! (2nd ed.)");
        assert_eq!(toks, vec!["machine", "learning", "for", "db_systems", "2nd", "ed"]);
    }

    #[test]
    fn drops_single_char_tokens_before_ngrams() {
        let a = analyzer();
        let toks = a.tokens("a rust b book");
        assert_eq!(toks, vec!["rust", "book"]);
        assert_eq!(a.ngrams(&toks), vec!["rust", "book", "rust book"]);
    }

    #[test]
    fn unicode_words_are_kept() {
        let toks = analyzer().tokens("Café été  naïve");
        assert_eq!(toks, vec!["café", "été", "naïve"]);
    }

    #[test]
    fn counts_repeated_grams() {
        let tf = analyzer().term_frequency("ml ml ml");
        assert_eq!(tf.term_count("ml"), 3);
        assert_eq!(tf.term_count("ml ml"), 2);
    }

    #[test]
    fn blank_text_has_no_terms() {
        assert!(analyzer().term_frequency("   ").is_empty());
        assert!(analyzer().term_frequency("a , b").is_empty());
    }

    #[test]
    fn respects_case_setting() {
        let config = VectorizerConfig {
            lowercase: false,
            ngram_range: (1, 1),
            ..VectorizerConfig::default()
        };
        let tf = Analyzer::new(&config).term_frequency("Rust rust");
        assert_eq!(tf.term_count("Rust"), 1);
        assert_eq!(tf.term_count("rust"), 1);
    }
}
