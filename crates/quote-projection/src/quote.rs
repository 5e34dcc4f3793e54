/*
 * quote.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Quote requests: splitting quote text into spans and the skip precondition.

use std::num::NonZeroUsize;

use usfm_align::VerseRef;
use usfm_align::normalize::{self, SegmentKind};

/// Marker between the parts of an elliptical quote.
pub const ELLIPSIS: &str = "…";

/// The verse-independent part of a quote request: normalized words per
/// span, and which occurrence of the first span is meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub spans: Vec<Vec<String>>,
    pub occurrence: NonZeroUsize,
}

impl QuoteRequest {
    /// Build a quote request, or `None` when no projection is requested.
    ///
    /// This is the single skip rule: a quote with no words (empty,
    /// whitespace, punctuation or ellipsis only) or an occurrence of zero
    /// means "do not project".
    pub fn new(quote_text: &str, occurrence: usize) -> Option<Self> {
        let occurrence = NonZeroUsize::new(occurrence)?;
        let spans = split_quote(quote_text);
        if spans.is_empty() {
            return None;
        }
        Some(QuoteRequest { spans, occurrence })
    }

    /// Attach the request to a verse.
    pub fn at(self, reference: VerseRef) -> QuoteSpec {
        QuoteSpec {
            reference,
            spans: self.spans,
            occurrence: self.occurrence,
        }
    }
}

/// A quote to project at a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSpec {
    pub reference: VerseRef,
    pub spans: Vec<Vec<String>>,
    pub occurrence: NonZeroUsize,
}

impl QuoteSpec {
    /// Same skip rule as [`QuoteRequest::new`], with the verse supplied up front.
    pub fn new(reference: VerseRef, quote_text: &str, occurrence: usize) -> Option<Self> {
        QuoteRequest::new(quote_text, occurrence).map(|request| request.at(reference))
    }

    pub fn is_elliptical(&self) -> bool {
        self.spans.len() > 1
    }
}

/// Split quote text at ellipsis markers (`…` or `...`) into spans of
/// normalized words. Spans without words are dropped.
pub fn split_quote(text: &str) -> Vec<Vec<String>> {
    text.replace("...", ELLIPSIS)
        .split(ELLIPSIS)
        .map(quote_words)
        .filter(|words| !words.is_empty())
        .collect()
}

/// The normalized words of one quote span.
pub fn quote_words(text: &str) -> Vec<String> {
    normalize::segments(text)
        .into_iter()
        .filter(|segment| segment.kind == SegmentKind::Word)
        .map(|segment| normalize::normalize_word(segment.text))
        .filter(|word| !word.is_empty())
        .collect()
}

/// Parse an occurrence field. Empty, zero, negative or non-numeric values
/// all yield 0, which [`QuoteRequest::new`] treats as "skip".
pub fn parse_occurrence(field: &str) -> usize {
    field.trim().parse().unwrap_or(0)
}
