// file: src/index/mod.rs
// description: tokenization and per-document index exports
// reference: internal module structure

pub mod indexer;
pub mod tokenizer;

pub use indexer::{DocumentIndex, IndexStats, Indexer};
pub use tokenizer::{STOP_WORDS, Tokenizer, is_stop_word};
