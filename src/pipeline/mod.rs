// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: pipeline orchestration

mod deadline;
mod engine;
mod progress;

pub use deadline::{block_on_detached, run_blocking_with_timeout};
pub use engine::{LoadedDocument, QaEngine};
pub use progress::{IngestSpinner, IngestStats};
