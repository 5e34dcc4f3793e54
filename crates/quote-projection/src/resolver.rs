/*
 * resolver.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Alignment resolver: map source token ranges to aligned target tokens.
//!
//! Target verses carry their alignment groups from parsing. Each group
//! names its source words by surface text and per-verse occurrence, so
//! pairing a source verse with a target verse is a single pass that counts
//! occurrences in the source and looks each word up in the group table.

use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use usfm_align::{GroupId, TokenKind, Verse, canonical_word};

use crate::error::AlignmentError;

/// A source verse paired with its aligned target verse.
#[derive(Debug, Clone)]
pub struct VerseAlignment<'a> {
    pub source: &'a Verse,
    pub target: &'a Verse,
    /// Group of each source token, indexed by token position.
    source_groups: Vec<Option<GroupId>>,
}

/// Why a range did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMiss {
    /// No token in the range belongs to an alignment group.
    Unaligned,
}

impl<'a> VerseAlignment<'a> {
    /// Pair `source` with `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::OverlappingGroups`] when two groups of the
    /// target verse claim the same source word.
    pub fn new(source: &'a Verse, target: &'a Verse) -> Result<Self, AlignmentError> {
        let mut by_word: HashMap<(String, u32), GroupId> = HashMap::new();
        for group in &target.groups {
            for word in &group.source_words {
                let key = (canonical_word(&word.text), word.occurrence);
                if let Some(previous) = by_word.insert(key, group.id) {
                    if previous != group.id {
                        return Err(AlignmentError::OverlappingGroups {
                            word: word.text.clone(),
                            occurrence: word.occurrence,
                            first: previous.0,
                            second: group.id.0,
                        });
                    }
                }
            }
        }

        let mut seen: HashMap<String, u32> = HashMap::new();
        let source_groups = source
            .tokens
            .iter()
            .map(|token| {
                if token.kind != TokenKind::Word {
                    return None;
                }
                let word = canonical_word(&token.text);
                let occurrence = seen.entry(word.clone()).or_insert(0);
                *occurrence += 1;
                by_word.get(&(word, *occurrence)).copied()
            })
            .collect();

        Ok(VerseAlignment {
            source,
            target,
            source_groups,
        })
    }

    /// The group a source token belongs to.
    pub fn source_group(&self, position: usize) -> Option<GroupId> {
        self.source_groups.get(position).copied().flatten()
    }

    /// Target positions aligned to any source token in `range`, in target order.
    ///
    /// Unaligned tokens inside the range are skipped; if none is aligned the
    /// range does not resolve.
    pub fn resolve(&self, range: Range<usize>) -> Result<Vec<usize>, ResolveMiss> {
        let groups: BTreeSet<GroupId> = range.filter_map(|p| self.source_group(p)).collect();
        if groups.is_empty() {
            return Err(ResolveMiss::Unaligned);
        }
        let positions: BTreeSet<usize> = groups
            .iter()
            .filter_map(|&id| self.target.group(id))
            .flat_map(|group| group.target_positions.iter().copied())
            .collect();
        Ok(positions.into_iter().collect())
    }

    /// Number of source word tokens that are aligned.
    pub fn aligned_source_words(&self) -> usize {
        self.source_groups.iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use usfm_align::parse_document;

    fn zaln(content: &str, occurrence: u32, words: &str) -> String {
        let words: Vec<String> = words.split(' ').map(|w| format!("\\w {w}\\w*")).collect();
        format!(
            "\\zaln-s |x-occurrence=\"{occurrence}\" x-content=\"{content}\"\\*{}\\zaln-e\\*",
            words.join(" ")
        )
    }

    fn parse_verse(body: &str) -> Verse {
        parse_document(&format!("\\c 1\n\\v 1 {body}"))
            .unwrap()
            .verse(1, 1)
            .unwrap()
            .clone()
    }

    fn texts(verse: &Verse, positions: &[usize]) -> Vec<String> {
        positions.iter().map(|&p| verse.tokens[p].text.clone()).collect()
    }

    #[test]
    fn test_resolve_in_target_order() {
        let source = parse_verse("God created");
        let target = parse_verse(&format!(
            "{} {}",
            zaln("created", 1, "creó"),
            zaln("God", 1, "Dios")
        ));
        let alignment = VerseAlignment::new(&source, &target).unwrap();
        let positions = alignment.resolve(0..source.tokens.len()).unwrap();
        assert_eq!(texts(&target, &positions), vec!["creó", "Dios"]);
    }

    #[test]
    fn test_occurrence_pairs_repeated_words() {
        let source = parse_verse("the heaven and the earth");
        let target = parse_verse(&format!(
            "{} {} y {} {}",
            zaln("the", 1, "los"),
            zaln("heaven", 1, "cielos"),
            zaln("the", 2, "la"),
            zaln("earth", 1, "tierra")
        ));
        let alignment = VerseAlignment::new(&source, &target).unwrap();
        let second_the = source.tokens.iter().filter(|t| t.text == "the").nth(1).unwrap();
        let positions = alignment
            .resolve(second_the.position..second_the.position + 1)
            .unwrap();
        assert_eq!(texts(&target, &positions), vec!["la"]);
    }

    #[test]
    fn test_partial_alignment_keeps_aligned_part() {
        let source = parse_verse("And the earth");
        let target = parse_verse(&format!(
            "Y {} {}",
            zaln("the", 1, "la"),
            zaln("earth", 1, "tierra")
        ));
        let alignment = VerseAlignment::new(&source, &target).unwrap();
        assert_eq!(alignment.source_group(0), None);
        assert_eq!(alignment.aligned_source_words(), 2);
        let positions = alignment.resolve(0..source.tokens.len()).unwrap();
        assert_eq!(texts(&target, &positions), vec!["la", "tierra"]);
    }

    #[test]
    fn test_fully_unaligned_range() {
        let source = parse_verse("And the earth");
        let target = parse_verse(&format!("Y {}", zaln("earth", 1, "tierra")));
        let alignment = VerseAlignment::new(&source, &target).unwrap();
        assert_eq!(alignment.resolve(0..1), Err(ResolveMiss::Unaligned));
    }

    #[test]
    fn test_multi_word_group_deduplicates() {
        let source = parse_verse("without form");
        let target = parse_verse(
            "\\zaln-s |x-occurrence=\"1\" x-content=\"without\"\\*\
             \\zaln-s |x-occurrence=\"1\" x-content=\"form\"\\*\
             \\w desordenada\\w*\\zaln-e\\*\\zaln-e\\*",
        );
        let alignment = VerseAlignment::new(&source, &target).unwrap();
        let positions = alignment.resolve(0..source.tokens.len()).unwrap();
        assert_eq!(texts(&target, &positions), vec!["desordenada"]);
    }

    #[test]
    fn test_overlapping_groups_fail() {
        let source = parse_verse("the earth");
        let target = parse_verse(&format!("{} {}", zaln("the", 1, "la"), zaln("the", 1, "tierra")));
        let err = VerseAlignment::new(&source, &target).unwrap_err();
        assert_eq!(
            err,
            AlignmentError::OverlappingGroups {
                word: "the".to_string(),
                occurrence: 1,
                first: 0,
                second: 1,
            }
        );
    }

    #[test]
    fn test_alignment_ignores_diacritic_composition() {
        // x-content decomposed, source text precomposed
        let source = parse_verse("\\w \u{03B8}\u{03B5}\u{03BF}\u{1FE6}\\w*");
        let target = parse_verse(&zaln("\u{03B8}\u{03B5}\u{03BF}\u{03C5}\u{0342}", 1, "God"));
        let alignment = VerseAlignment::new(&source, &target).unwrap();
        assert_eq!(alignment.source_group(0), Some(GroupId(0)));
    }
}
