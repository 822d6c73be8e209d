// file: src/pipeline/progress.rs
// description: ingestion statistics and a terminal spinner for the cli host
// reference: uses indicatif for progress display

use crate::index::IndexStats;
use crate::models::ExtractionReport;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestStats {
    pub bytes: u64,
    pub characters: usize,
    pub pages: Option<usize>,
    pub skipped_pages: usize,
    pub paragraphs: Option<usize>,
    pub skipped_tables: usize,
    pub skipped_elements: usize,
    pub truncated: bool,
    pub passages: usize,
    pub vocabulary: usize,
    pub duration_ms: u64,
}

impl IngestStats {
    pub fn new(
        bytes: u64,
        report: &ExtractionReport,
        index: IndexStats,
        duration: Duration,
    ) -> Self {
        Self {
            bytes,
            characters: report.characters,
            pages: report.pages,
            skipped_pages: report.skipped_pages.len(),
            paragraphs: report.paragraphs,
            skipped_tables: report.skipped_tables,
            skipped_elements: report.skipped_elements,
            truncated: report.truncated,
            passages: index.passages,
            vocabulary: index.vocabulary,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn bytes_per_second(&self) -> f64 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.bytes as f64 / (self.duration_ms as f64 / 1000.0)
    }

    /// Whether anything was dropped on the best-effort path.
    pub fn is_partial(&self) -> bool {
        self.skipped_pages > 0
            || self.skipped_tables > 0
            || self.skipped_elements > 0
            || self.truncated
    }

    pub fn format(&self) -> String {
        let mut line = format!(
            "{} bytes -> {} chars, {} passages, {} terms in {}ms",
            self.bytes, self.characters, self.passages, self.vocabulary, self.duration_ms
        );

        if self.duration_ms > 0 {
            line.push_str(&format!(" ({:.1} KB/s)", self.bytes_per_second() / 1024.0));
        }
        if let Some(pages) = self.pages {
            line.push_str(&format!(" | pages: {}", pages));
        }
        if let Some(paragraphs) = self.paragraphs {
            line.push_str(&format!(" | paragraphs: {}", paragraphs));
        }
        if self.is_partial() {
            line.push_str(&format!(
                " | skipped pages: {}, skipped tables: {}, skipped elements: {}, truncated: {}",
                self.skipped_pages, self.skipped_tables, self.skipped_elements, self.truncated
            ));
        }

        line
    }
}

/// Spinner shown while a document is being ingested.
pub struct IngestSpinner {
    bar: ProgressBar,
}

impl IngestSpinner {
    pub fn new(filename: &str, colored: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] {msg}"
        } else {
            "{spinner} [{elapsed_precise}] {msg}"
        };
        bar.set_style(
            ProgressStyle::default_spinner()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Reading {}", filename));
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Spinner that draws nothing, for non-interactive output.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self, stats: &IngestStats) {
        let message = if stats.is_partial() {
            format!("Indexed with gaps: {}", stats.format()).yellow().to_string()
        } else {
            format!("Indexed: {}", stats.format())
        };
        self.bar.finish_with_message(message);
    }

    pub fn fail(&self, message: &str) {
        self.bar.abandon_with_message(message.red().to_string());
    }
}

impl Drop for IngestSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> IngestStats {
        let report = ExtractionReport {
            pages: Some(3),
            skipped_pages: vec![2],
            characters: 900,
            ..ExtractionReport::default()
        };
        let index = IndexStats {
            passages: 12,
            vocabulary: 80,
            term_occurrences: 150,
        };
        IngestStats::new(2000, &report, index, Duration::from_millis(500))
    }

    #[test]
    fn test_stats_from_report() {
        let stats = stats();
        assert_eq!(stats.pages, Some(3));
        assert_eq!(stats.skipped_pages, 1);
        assert_eq!(stats.passages, 12);
        assert_eq!(stats.bytes_per_second(), 4000.0);
        assert!(stats.is_partial());
    }

    #[test]
    fn test_zero_duration() {
        let stats = IngestStats::default();
        assert_eq!(stats.bytes_per_second(), 0.0);
        assert!(!stats.is_partial());
    }

    #[test]
    fn test_format_mentions_gaps() {
        let line = stats().format();
        assert!(line.contains("12 passages"));
        assert!(line.contains("(3.9 KB/s)"));
        assert!(line.contains("pages: 3"));
        assert!(line.contains("skipped pages: 1"));
    }

    #[test]
    fn test_hidden_spinner_lifecycle() {
        let spinner = IngestSpinner::hidden();
        spinner.set_message("Indexing".to_string());
        spinner.finish(&stats());
    }
}
