/*
 * normalize.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Text normalization and segmentation shared by the parser and quote matching.
//!
//! Matching is insensitive to case and diacritics: a word is decomposed
//! (NFD), combining marks and invisible format characters are removed, and
//! the remainder is lowercased. Hebrew points and cantillation marks are
//! combining marks, so they disappear along with Greek accents.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Hebrew punctuation that is not covered by the general punctuation blocks.
const HEBREW_PUNCTUATION: &[char] = &[
    '\u{05BE}', '\u{05C0}', '\u{05C3}', '\u{05C6}', '\u{05F3}', '\u{05F4}',
];

/// Sentence and clause marks of other gateway-language scripts.
const SCRIPT_PUNCTUATION: &[char] = &[
    // Armenian
    '\u{055C}', '\u{055D}', '\u{055E}', '\u{0589}',
    // Arabic and Urdu
    '\u{060C}', '\u{061B}', '\u{061F}', '\u{066A}', '\u{066B}', '\u{066C}', '\u{06D4}',
    // Devanagari danda and double danda, shared by Bengali, Gujarati and others
    '\u{0964}', '\u{0965}',
    // Myanmar
    '\u{104A}', '\u{104B}',
    // Khmer
    '\u{17D4}', '\u{17D5}', '\u{17D6}',
    // Fullwidth colon, semicolon and question mark
    '\u{FF1A}', '\u{FF1B}', '\u{FF1F}',
];

/// Returns true for characters that separate words without being whitespace.
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || HEBREW_PUNCTUATION.contains(&c)
        || SCRIPT_PUNCTUATION.contains(&c)
        || matches!(c,
            '\u{00A1}' | '\u{00A7}' | '\u{00AB}' | '\u{00B6}' | '\u{00B7}' | '\u{00BB}'
            | '\u{00BF}'
            | '\u{037E}' | '\u{0387}'
            | '\u{1361}'..='\u{1368}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{205E}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
            | '\u{FF01}'..='\u{FF0F}')
}

/// Zero-width characters that may appear inside a word (word joiner,
/// joiners, byte order mark).
pub fn is_format_char(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{2060}' | '\u{FEFF}')
}

/// Normalize a word for matching.
///
/// Punctuation-only input normalizes to the empty string.
pub fn normalize_word(text: &str) -> String {
    text.nfd()
        .filter(|&c| !is_combining_mark(c) && !is_format_char(c) && !is_punctuation(c))
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Canonical (NFC) form of a surface word, used to pair alignment
/// references with source tokens. Unlike [`normalize_word`], this keeps
/// diacritics: words that differ only in pointing are different words.
pub fn canonical_word(text: &str) -> String {
    text.trim().nfc().collect()
}

/// The class of a run of characters in running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Word,
    Punctuation,
    Whitespace,
}

/// A maximal run of same-class characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    /// Byte offset of the segment within the segmented string.
    pub offset: usize,
}

/// Split running text into word, punctuation and whitespace runs.
///
/// An apostrophe between two word characters stays inside the word, so
/// `God's` is one word while `'God'` is a word between two quote marks.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut out: Vec<Segment<'_>> = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<SegmentKind> = None;

    for (i, &(offset, c)) in chars.iter().enumerate() {
        let kind = classify(&chars, i, c);
        if run_kind != Some(kind) {
            if let Some(prev) = run_kind {
                out.push(Segment {
                    kind: prev,
                    text: &text[run_start..offset],
                    offset: run_start,
                });
            }
            run_start = offset;
            run_kind = Some(kind);
        }
    }
    if let Some(kind) = run_kind {
        out.push(Segment {
            kind,
            text: &text[run_start..],
            offset: run_start,
        });
    }
    out
}

fn classify(chars: &[(usize, char)], i: usize, c: char) -> SegmentKind {
    if c.is_whitespace() {
        return SegmentKind::Whitespace;
    }
    if !is_punctuation(c) {
        return SegmentKind::Word;
    }
    if matches!(c, '\'' | '\u{2019}') {
        let is_word = |j: usize| {
            chars
                .get(j)
                .is_some_and(|&(_, n)| !n.is_whitespace() && !is_punctuation(n))
        };
        if i > 0 && is_word(i - 1) && is_word(i + 1) {
            return SegmentKind::Word;
        }
    }
    SegmentKind::Punctuation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<(SegmentKind, &str)> {
        segments(text).into_iter().map(|s| (s.kind, s.text)).collect()
    }

    #[test]
    fn test_normalize_case_and_accents() {
        assert_eq!(normalize_word("Θεὸς"), normalize_word("θεος"));
        assert_eq!(normalize_word("Élohim"), "elohim");
    }

    #[test]
    fn test_normalize_hebrew_points_and_joiner() {
        // בְּ⁠רֵאשִׁ֖ית with a word joiner between prefix and stem
        let pointed = concat!(
            "\u{05D1}\u{05B0}\u{05BC}\u{2060}",
            "\u{05E8}\u{05B5}\u{05D0}\u{05E9}\u{05B4}\u{05C1}\u{0596}\u{05D9}\u{05EA}",
        );
        let bare = "\u{05D1}\u{05E8}\u{05D0}\u{05E9}\u{05D9}\u{05EA}";
        assert_eq!(normalize_word(pointed), bare);
    }

    #[test]
    fn test_normalize_punctuation_is_empty() {
        assert_eq!(normalize_word(","), "");
        assert_eq!(normalize_word("\u{05C3}"), "");
        assert_eq!(normalize_word("“"), "");
    }

    #[test]
    fn test_segments() {
        assert_eq!(
            kinds("God's word, “here”."),
            vec![
                (SegmentKind::Word, "God's"),
                (SegmentKind::Whitespace, " "),
                (SegmentKind::Word, "word"),
                (SegmentKind::Punctuation, ","),
                (SegmentKind::Whitespace, " "),
                (SegmentKind::Punctuation, "“"),
                (SegmentKind::Word, "here"),
                (SegmentKind::Punctuation, "”."),
            ]
        );
    }

    #[test]
    fn test_segments_maqaf_splits_words() {
        let text = "\u{05D0}\u{05EA}\u{05BE}\u{05D3}\u{05D5}\u{05D3}";
        let segs = kinds(text);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1], (SegmentKind::Punctuation, "\u{05BE}"));
    }

    #[test]
    fn test_segments_script_punctuation() {
        // बनाया। (Hindi, ends with a danda)
        assert_eq!(
            kinds("\u{092C}\u{0928}\u{093E}\u{092F}\u{093E}\u{0964}"),
            vec![
                (SegmentKind::Word, "\u{092C}\u{0928}\u{093E}\u{092F}\u{093E}"),
                (SegmentKind::Punctuation, "\u{0964}"),
            ]
        );
        // Arabic comma and question mark
        assert_eq!(
            kinds("\u{0644}\u{0627}\u{060C} \u{0645}\u{0646}\u{061F}"),
            vec![
                (SegmentKind::Word, "\u{0644}\u{0627}"),
                (SegmentKind::Punctuation, "\u{060C}"),
                (SegmentKind::Whitespace, " "),
                (SegmentKind::Word, "\u{0645}\u{0646}"),
                (SegmentKind::Punctuation, "\u{061F}"),
            ]
        );
        assert_eq!(normalize_word("\u{1362}"), "");
    }

    #[test]
    fn test_segments_leading_apostrophe_is_punctuation() {
        assert_eq!(
            kinds("'tis"),
            vec![(SegmentKind::Punctuation, "'"), (SegmentKind::Word, "tis")]
        );
    }

    #[test]
    fn test_canonical_word_keeps_points() {
        assert_ne!(canonical_word("\u{05D1}\u{05B8}"), canonical_word("\u{05D1}"));
        assert_eq!(canonical_word("e\u{0301}"), "\u{00E9}");
    }
}
