/*
 * assembler.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Span assembler: resolve every part of a (possibly elliptical) quote.
//!
//! The occurrence selects the first part's match. An elliptical quote names
//! one passage with words left out, so each later part is the first match
//! at or after the end of the first part.

use crate::error::ProjectionMiss;
use crate::locator;
use crate::quote::QuoteSpec;
use crate::resolver::{ResolveMiss, VerseAlignment};

/// Target token positions for each quote part, in quote order.
///
/// An ellipsis break sits between consecutive spans, never inside one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledQuote {
    pub spans: Vec<Vec<usize>>,
}

impl AssembledQuote {
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(Vec::is_empty)
    }
}

/// Locate and resolve every span of `quote`.
///
/// # Errors
///
/// Fails as a whole if any single part is not found or resolves to no
/// target tokens; no partial multi-part result is produced.
pub fn assemble(
    quote: &QuoteSpec,
    alignment: &VerseAlignment<'_>,
) -> Result<AssembledQuote, ProjectionMiss> {
    let source = alignment.source;
    let mut spans = Vec::with_capacity(quote.spans.len());
    let mut first_end: Option<usize> = None;

    for (index, words) in quote.spans.iter().enumerate() {
        let part = index + 1;
        let found = match first_end {
            None => locator::locate(source, words, quote.occurrence),
            Some(from) => locator::locate_from(source, words, from),
        };
        let Some(range) = found else {
            tracing::debug!(
                part,
                matches = locator::count(source, words),
                occurrence = quote.occurrence.get(),
                "quote part not found"
            );
            return Err(ProjectionMiss::QuoteNotFound {
                part,
                words: words.join(" "),
                occurrence: quote.occurrence.get(),
            });
        };
        if first_end.is_none() {
            first_end = Some(range.end);
        }

        let positions = alignment
            .resolve(range)
            .map_err(|ResolveMiss::Unaligned| ProjectionMiss::Unaligned { part })?;
        // A group with no target words aligns the part to nothing.
        if positions.is_empty() {
            return Err(ProjectionMiss::Unaligned { part });
        }
        spans.push(positions);
    }

    Ok(AssembledQuote { spans })
}
