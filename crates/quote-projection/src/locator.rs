/*
 * locator.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Occurrence locator: find the Nth exact match of a word sequence in a verse.
//!
//! Matching runs over the verse's normalized words only, so punctuation
//! between words never breaks a match. There is no fuzzy matching.

use std::num::NonZeroUsize;
use std::ops::Range;

use usfm_align::Verse;

/// All matches of `span` in `verse`, left to right, as token index ranges.
///
/// Windows slide one word at a time, so overlapping matches are counted
/// separately (`a a` occurs twice in `a a a`).
pub fn matches<'a>(
    verse: &'a Verse,
    span: &'a [String],
) -> impl Iterator<Item = Range<usize>> + 'a {
    let words: Vec<(usize, &str)> = verse
        .words()
        .map(|token| (token.position, token.normalized.as_str()))
        .collect();
    let width = span.len();
    let windows = if width == 0 || words.len() < width {
        0
    } else {
        words.len() - width + 1
    };

    (0..windows).filter_map(move |start| {
        let window = &words[start..start + width];
        let hit = window
            .iter()
            .zip(span)
            .all(|((_, word), wanted)| *word == wanted.as_str());
        hit.then(|| window[0].0..window[width - 1].0 + 1)
    })
}

/// The `occurrence`-th match of `span`, or `None` when the verse has fewer matches.
pub fn locate(verse: &Verse, span: &[String], occurrence: NonZeroUsize) -> Option<Range<usize>> {
    matches(verse, span).nth(occurrence.get() - 1)
}

/// The first match of `span` starting at or after token index `from`.
pub fn locate_from(verse: &Verse, span: &[String], from: usize) -> Option<Range<usize>> {
    matches(verse, span).find(|range| range.start >= from)
}

/// Number of matches of `span` in `verse`.
pub fn count(verse: &Verse, span: &[String]) -> usize {
    matches(verse, span).count()
}
