/*
 * project.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The end-to-end projection request.

use usfm_align::{Book, VerseRef};

use crate::assembler::assemble;
use crate::error::ProjectionMiss;
use crate::quote::{QuoteRequest, QuoteSpec};
use crate::render::render;
use crate::resolver::VerseAlignment;

/// A quote rendered in the target text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedQuote {
    /// Rendered target text, parts joined by ` … `.
    pub text: String,
    /// Target token positions of each part.
    pub spans: Vec<Vec<usize>>,
}

/// Project `quote_text` (the `occurrence`-th match at `reference`) from
/// `source` into `target`.
///
/// Returns [`ProjectionMiss::Skipped`] when the request asks for no
/// projection (see [`QuoteRequest::new`]).
pub fn project_quote(
    quote_text: &str,
    reference: VerseRef,
    occurrence: usize,
    source: &Book,
    target: &Book,
) -> Result<ProjectedQuote, ProjectionMiss> {
    let quote = QuoteRequest::new(quote_text, occurrence).ok_or(ProjectionMiss::Skipped)?;
    project(&quote.at(reference), source, target)
}

/// Project an already-validated quote request.
pub fn project(
    quote: &QuoteSpec,
    source: &Book,
    target: &Book,
) -> Result<ProjectedQuote, ProjectionMiss> {
    let reference = quote.reference;
    let source_verse = source
        .verse_at(reference)
        .ok_or(ProjectionMiss::SourceVerseNotFound { reference })?;
    let target_verse = target
        .verse_at(reference)
        .ok_or(ProjectionMiss::TargetVerseNotFound { reference })?;

    let alignment = VerseAlignment::new(source_verse, target_verse)?;
    let assembled = assemble(quote, &alignment)?;
    let text = render(target_verse, &assembled);
    if assembled.is_empty() || text.trim().is_empty() {
        return Err(ProjectionMiss::Empty);
    }

    tracing::debug!(
        reference = %reference,
        spans = assembled.spans.len(),
        elliptical = quote.is_elliptical(),
        aligned_words = alignment.aligned_source_words(),
        projection = %text,
        "projected quote"
    );

    Ok(ProjectedQuote {
        text,
        spans: assembled.spans,
    })
}
