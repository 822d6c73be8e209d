// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod answer;
pub mod document;
pub mod passage;
pub mod question;

pub use answer::{Answer, Confidence, NO_MATCH_MESSAGE};
pub use document::{Document, DocumentFormat, ExtractionReport};
pub use passage::Passage;
pub use question::Question;
