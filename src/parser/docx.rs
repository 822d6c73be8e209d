// file: src/parser/docx.rs
// description: paragraph text extraction from .docx containers
// reference: https://docs.rs/docx-rs

use crate::error::IngestError;
use crate::models::{DocumentFormat, ExtractionReport};
use docx_rs::{
    DocumentChild, InsertChild, MoveToChild, Paragraph, ParagraphChild, Run, RunChild,
    StructuredDataTag, StructuredDataTagChild, read_docx,
};
use tracing::{debug, warn};

pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

pub fn extract_text(bytes: &[u8]) -> Result<(String, ExtractionReport), IngestError> {
    let docx = read_docx(bytes).map_err(|e| IngestError::CorruptDocument {
        format: DocumentFormat::Docx,
        message: format!("{:?}", e),
    })?;

    let mut walker = BodyWalker::default();
    for child in &docx.document.children {
        walker.document_child(child);
    }

    let BodyWalker {
        paragraphs,
        mut report,
    } = walker;

    if report.skipped_tables > 0 {
        warn!(
            "Skipped {} table(s) in DOCX document; only body paragraphs are indexed",
            report.skipped_tables
        );
    }
    if report.skipped_elements > 0 {
        warn!(
            "Skipped {} DOCX element(s) without indexable body text",
            report.skipped_elements
        );
    }

    let text = paragraphs.join(PARAGRAPH_SEPARATOR);
    debug!("DOCX yielded {} non-empty paragraphs", paragraphs.len());

    report.paragraphs = Some(paragraphs.len());
    report.characters = text.chars().count();

    Ok((text, report))
}

#[derive(Default)]
struct BodyWalker {
    paragraphs: Vec<String>,
    report: ExtractionReport,
}

impl BodyWalker {
    fn document_child(&mut self, child: &DocumentChild) {
        match child {
            DocumentChild::Paragraph(paragraph) => self.paragraph(paragraph),
            DocumentChild::StructuredDataTag(tag) => self.content_control(tag),
            DocumentChild::Table(_) => self.report.skipped_tables += 1,
            DocumentChild::TableOfContents(_) => {
                debug!("Skipping DOCX table of contents");
                self.report.skipped_elements += 1;
            }
            DocumentChild::Section(_) => {
                warn!("Skipping DOCX section block; its content is not readable");
                self.report.skipped_elements += 1;
            }
            DocumentChild::BookmarkStart(_)
            | DocumentChild::BookmarkEnd(_)
            | DocumentChild::CommentStart(_)
            | DocumentChild::CommentEnd(_) => {}
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        let mut text = String::new();
        self.paragraph_children(&paragraph.children, &mut text);
        if !text.trim().is_empty() {
            self.paragraphs.push(text);
        }
    }

    /// Block-level content controls wrap whole paragraphs; their paragraphs
    /// keep their own place in document order.
    fn content_control(&mut self, tag: &StructuredDataTag) {
        let mut loose = String::new();

        for child in &tag.children {
            match child {
                StructuredDataTagChild::Paragraph(paragraph) => {
                    self.flush(&mut loose);
                    self.paragraph(paragraph);
                }
                StructuredDataTagChild::StructuredDataTag(inner) => {
                    self.flush(&mut loose);
                    self.content_control(inner);
                }
                StructuredDataTagChild::Run(run) => run_text(run, &mut loose),
                StructuredDataTagChild::Table(_) => self.report.skipped_tables += 1,
                _ => {}
            }
        }

        self.flush(&mut loose);
    }

    fn flush(&mut self, loose: &mut String) {
        if !loose.trim().is_empty() {
            self.paragraphs.push(std::mem::take(loose));
        }
        loose.clear();
    }

    /// Runs are fragments of the same sentence so they are joined without a
    /// separator. Tracked insertions and moves count as current text.
    fn paragraph_children(&mut self, children: &[ParagraphChild], out: &mut String) {
        for child in children {
            match child {
                ParagraphChild::Run(run) => run_text(run, out),
                ParagraphChild::Hyperlink(link) => self.paragraph_children(&link.children, out),
                ParagraphChild::Insert(insert) => {
                    for inserted in &insert.children {
                        match inserted {
                            InsertChild::Run(run) => run_text(run, out),
                            InsertChild::Delete(_) => self.deleted(),
                            _ => {}
                        }
                    }
                }
                ParagraphChild::MoveTo(moved) => {
                    for moved_child in &moved.children {
                        match moved_child {
                            MoveToChild::Run(run) => run_text(run, out),
                            MoveToChild::Delete(_) => self.deleted(),
                            _ => {}
                        }
                    }
                }
                ParagraphChild::StructuredDataTag(tag) => {
                    for tag_child in &tag.children {
                        match tag_child {
                            StructuredDataTagChild::Run(run) => run_text(run, out),
                            StructuredDataTagChild::Paragraph(inner) => {
                                self.paragraph_children(&inner.children, out)
                            }
                            StructuredDataTagChild::Table(_) => self.report.skipped_tables += 1,
                            _ => {}
                        }
                    }
                }
                ParagraphChild::Delete(_) | ParagraphChild::MoveFrom(_) => self.deleted(),
                _ => {}
            }
        }
    }

    fn deleted(&mut self) {
        debug!("Skipping tracked deletion in DOCX paragraph");
        self.report.skipped_elements += 1;
    }
}

fn run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) | RunChild::Break(_) => out.push(' '),
            _ => {}
        }
    }
}
