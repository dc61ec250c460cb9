//! Preprocessor pipeline: load the envelope, expand chapters, emit the book.

use std::io::{Read, Write};

use serde_json::Value;

use crate::{
    book::Book,
    config::VarTable,
    debug,
    error::PreprocessError,
    template::{has_placeholder, render},
};

/// Counters collected during one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Chapters scanned.
    pub chapters: usize,
    /// Chapters whose content was rewritten.
    pub rendered: usize,
}

/// Parse `[context, book]` and decode the book. The context is discarded.
pub fn parse_input(input: &[u8]) -> Result<Book, PreprocessError> {
    let (_context, book): (Value, Value) =
        serde_json::from_slice(input).map_err(PreprocessError::MalformedInput)?;
    Book::from_value(book)
}

/// Expand placeholders in every chapter, in book order.
///
/// Chapters without a known placeholder are not touched at all.
pub fn expand_book(book: &mut Book, vars: &VarTable) -> Report {
    let mut report = Report::default();

    for chapter in book.chapters_mut() {
        report.chapters += 1;
        if !has_placeholder(chapter.content(), vars) {
            continue;
        }

        let content = render(chapter.content(), vars);
        debug!("render"; "chapter `{}`", chapter.name().unwrap_or("<unnamed>"));
        chapter.set_content(content);
        report.rendered += 1;
    }

    report
}

/// Run the whole pipeline from `reader` to `writer`.
///
/// The output is fully serialized before anything is written, so a failure
/// never leaves partial JSON behind.
pub fn process<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    vars: &VarTable,
) -> Result<Report, PreprocessError> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let mut book = parse_input(&input)?;
    let report = expand_book(&mut book, vars);

    let output = serde_json::to_vec(&book).map_err(PreprocessError::Serialize)?;
    writer.write_all(&output)?;
    writer.flush()?;

    debug!("render"; "rendered {} of {} chapters", report.rendered, report.chapters);
    Ok(report)
}
