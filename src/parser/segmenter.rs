// file: src/parser/segmenter.rs
// description: splits normalized document text into ordered passages
// reference: paragraph then sentence segmentation over byte spans

use crate::models::Passage;
use crate::parser::patterns::{PARAGRAPH_BREAK, SENTENCE_END};
use std::ops::Range;
use tracing::debug;

pub struct PassageSegmenter;

impl PassageSegmenter {
    pub fn new() -> Self {
        Self
    }

    /// Split on blank-line paragraph breaks, then on sentence ends inside each
    /// paragraph. Whitespace-only fragments yield no passage.
    pub fn segment(&self, text: &str) -> Vec<Passage> {
        let mut passages = Vec::new();

        for paragraph in paragraph_ranges(text) {
            let body = &text[paragraph.clone()];
            let mut cursor = 0;

            for boundary in SENTENCE_END.find_iter(body) {
                let end = boundary.start() + boundary.as_str().trim_end().len();
                push_passage(&mut passages, text, paragraph.start + cursor..paragraph.start + end);
                cursor = boundary.end();
            }

            push_passage(&mut passages, text, paragraph.start + cursor..paragraph.end);
        }

        debug!("Segmented {} bytes into {} passages", text.len(), passages.len());
        passages
    }
}

impl Default for PassageSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

fn paragraph_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut cursor = 0;

    for brk in PARAGRAPH_BREAK.find_iter(text) {
        ranges.push(cursor..brk.start());
        cursor = brk.end();
    }
    ranges.push(cursor..text.len());

    ranges
}

fn push_passage(passages: &mut Vec<Passage>, text: &str, range: Range<usize>) {
    let raw = &text[range.clone()];
    let start = range.start + (raw.len() - raw.trim_start().len());
    let end = range.start + raw.trim_end().len();

    if start >= end {
        return;
    }

    let display = collapse_whitespace(&text[start..end]);
    passages.push(Passage::new(passages.len(), display, start..end));
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
