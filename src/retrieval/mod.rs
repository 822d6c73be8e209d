// file: src/retrieval/mod.rs
// description: question matching and answer selection exports
// reference: internal module structure

pub mod matcher;
pub mod selector;

pub use matcher::{QueryMatcher, ScoredPassage, inverse_document_frequency};
pub use selector::AnswerSelector;
