/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error and soft-miss types for quote projection.

use thiserror::Error;
use usfm_align::VerseRef;

/// Corrupt alignment data in a target verse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    /// Two alignment groups claim the same source word.
    #[error(
        "source word {word:?} (occurrence {occurrence}) is claimed by alignment groups \
         {first} and {second}"
    )]
    OverlappingGroups {
        word: String,
        occurrence: u32,
        first: usize,
        second: usize,
    },
}

/// Why a quote produced no projection.
///
/// Every variant is recoverable: callers record an empty projection and
/// move on to the next request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionMiss {
    /// The quote text was empty or the occurrence was zero.
    #[error("no projection requested")]
    Skipped,

    #[error("{reference} not found in the source text")]
    SourceVerseNotFound { reference: VerseRef },

    #[error("{reference} not found in the target text")]
    TargetVerseNotFound { reference: VerseRef },

    /// A quote part does not occur (often enough) in the source verse.
    #[error("quote part {part} {words:?} not found (occurrence {occurrence})")]
    QuoteNotFound {
        part: usize,
        words: String,
        occurrence: usize,
    },

    /// None of the words of a quote part are aligned.
    #[error("quote part {part} has no aligned words")]
    Unaligned { part: usize },

    /// The aligned target tokens render to nothing.
    #[error("aligned target text is empty")]
    Empty,

    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

impl ProjectionMiss {
    /// True for misses caused by bad data rather than by the request itself.
    pub fn is_data_error(&self) -> bool {
        matches!(self, ProjectionMiss::Alignment(_))
    }
}
