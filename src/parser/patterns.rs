// file: src/parser/patterns.rs
// description: compiled regex patterns for passage segmentation
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A blank line, possibly holding stray spaces, plus any whitespace after it
    pub static ref PARAGRAPH_BREAK: Regex = Regex::new(
        r"\n[^\S\n]*\n\s*"
    ).expect("PARAGRAPH_BREAK regex is valid");

    // Terminal punctuation, optional closing quotes/brackets, then whitespace
    pub static ref SENTENCE_END: Regex = Regex::new(
        r#"[.!?]+["'\u{201D}\u{2019})\]]*\s+"#
    ).expect("SENTENCE_END regex is valid");
}
