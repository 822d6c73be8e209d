// file: src/index/tokenizer.rs
// description: lexical tokenization shared by passages and questions
// reference: lower-case, split on non-alphanumerics, drop short tokens and stop words

use crate::config::DEFAULT_MIN_TOKEN_LEN;
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    pub static ref STOP_WORDS: HashSet<&'static str> = [
        // articles
        "a", "an", "the",
        // conjunctions
        "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "because", "while",
        // pronouns
        "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours",
        "he", "him", "his", "she", "her", "hers", "it", "its", "they", "them", "their",
        "theirs", "this", "that", "these", "those", "what", "which", "who", "whom", "whose",
        // auxiliaries
        "am", "is", "are", "was", "were", "be", "been", "being", "do", "does", "did",
        "has", "have", "had", "can", "could", "will", "would", "shall", "should", "may",
        "might", "must",
        // prepositions
        "of", "to", "in", "on", "at", "by", "for", "with", "from", "as", "into", "about",
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_len: usize,
}

impl Tokenizer {
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len: min_len.max(1),
        }
    }

    /// Every normalized token, stop words included.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= self.min_len)
            .map(str::to_string)
            .collect()
    }

    /// Tokens that participate in indexing and scoring.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.tokens(text)
            .into_iter()
            .filter(|token| !is_stop_word(token))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LEN)
    }
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_split() {
        let tokens = Tokenizer::default().tokens("Hello, WORLD! e-mail 42x");
        assert_eq!(tokens, vec!["hello", "world", "mail", "42x"]);
    }

    #[test]
    fn test_short_tokens_dropped() {
        let tokens = Tokenizer::default().tokens("I x am ok");
        assert_eq!(tokens, vec!["am", "ok"]);

        let tokens = Tokenizer::new(3).tokens("I x am ok yes");
        assert_eq!(tokens, vec!["yes"]);
    }

    #[test]
    fn test_stop_words_removed_from_terms() {
        let terms = Tokenizer::default().terms("The grass and the sky are what we see");
        assert_eq!(terms, vec!["grass", "sky", "see"]);
    }

    #[test]
    fn test_unicode_alphanumerics() {
        let terms = Tokenizer::default().terms("Größe über Café");
        assert_eq!(terms, vec!["größe", "über", "café"]);
    }

    #[test]
    fn test_only_noise_gives_nothing() {
        assert!(Tokenizer::default().terms("the and a").is_empty());
        assert!(Tokenizer::default().terms("?!... ---").is_empty());
        assert!(Tokenizer::default().terms("").is_empty());
    }
}
