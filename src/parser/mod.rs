// file: src/parser/mod.rs
// description: format normalization and passage segmentation exports
// reference: internal module structure

pub mod docx;
pub mod normalizer;
pub mod patterns;
pub mod pdf;
pub mod segmenter;
pub mod text;

pub use normalizer::{Extraction, FormatNormalizer};
pub use segmenter::PassageSegmenter;
