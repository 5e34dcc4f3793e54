/*
 * types.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The parsed text model: books, chapters, verses, tokens and alignment groups.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Index of an alignment group within its verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punctuation,
    Whitespace,
}

/// One token of running text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text as it appears in the document.
    pub text: String,
    /// Matching form; empty for punctuation and whitespace.
    pub normalized: String,
    /// Index of this token within its verse.
    pub position: usize,
    pub kind: TokenKind,
    /// Alignment group the token belongs to, for tokens inside `\zaln-s` brackets.
    pub alignment_group: Option<GroupId>,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}

/// A source-language word named by an alignment milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceWordRef {
    /// The `x-content` attribute.
    pub text: String,
    /// 1-based occurrence of `text` within the source verse (`x-occurrence`).
    pub occurrence: u32,
}

/// Original-language words aligned with a run of target-language tokens.
///
/// Built from an outermost `\zaln-s ... \zaln-e\*` bracket; nested
/// milestones add their source words to the same group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentGroup {
    pub id: GroupId,
    pub source_words: Vec<SourceWordRef>,
    /// Positions of the non-whitespace tokens inside the bracket, ascending.
    pub target_positions: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub number: u32,
    /// Last verse covered by a bridge such as `\v 4-5`; equals `number` otherwise.
    pub end_number: u32,
    pub tokens: Vec<Token>,
    pub groups: Vec<AlignmentGroup>,
}

impl Verse {
    pub fn new(number: u32, end_number: u32) -> Self {
        Verse {
            number,
            end_number,
            tokens: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Tokens that take part in text matching.
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.normalized.is_empty())
    }

    pub fn group(&self, id: GroupId) -> Option<&AlignmentGroup> {
        self.groups.get(id.0)
    }

    /// The verse's surface text with markup removed.
    pub fn plain_text(&self) -> String {
        let text: String = self.tokens.iter().map(|t| t.text.as_str()).collect();
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn covers(&self, verse: u32) -> bool {
        self.number <= verse && verse <= self.end_number
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    pub number: u32,
    pub verses: BTreeMap<u32, Verse>,
}

/// A parsed USFM book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    /// Book code from the `\id` line, e.g. `TIT`.
    pub id: Option<String>,
    pub chapters: BTreeMap<u32, Chapter>,
}

impl Book {
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters.get(&number)
    }

    /// Look up a verse; a verse inside a bridge resolves to the bridged verse.
    pub fn verse(&self, chapter: u32, verse: u32) -> Option<&Verse> {
        let chapter = self.chapters.get(&chapter)?;
        if let Some(found) = chapter.verses.get(&verse) {
            return Some(found);
        }
        chapter
            .verses
            .range(..verse)
            .next_back()
            .map(|(_, v)| v)
            .filter(|v| v.covers(verse))
    }

    pub fn verse_at(&self, reference: VerseRef) -> Option<&Verse> {
        self.verse(reference.chapter, reference.verse)
    }

    pub fn verse_count(&self) -> usize {
        self.chapters.values().map(|c| c.verses.len()).sum()
    }
}

/// A chapter:verse reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseRef {
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    pub fn new(chapter: u32, verse: u32) -> Self {
        VerseRef { chapter, verse }
    }

    /// Build a reference from separate chapter and verse fields.
    ///
    /// A verse range such as `4-5` resolves to its first verse. Returns `None`
    /// for non-numeric fields like `front` or `intro`.
    pub fn from_parts(chapter: &str, verse: &str) -> Option<Self> {
        let chapter = chapter.trim().parse().ok()?;
        let verse = leading_number(verse)?;
        Some(VerseRef { chapter, verse })
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid verse reference: {0:?}")]
pub struct InvalidVerseRef(pub String);

impl FromStr for VerseRef {
    type Err = InvalidVerseRef;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chapter, verse) = s
            .split_once(':')
            .ok_or_else(|| InvalidVerseRef(s.to_string()))?;
        VerseRef::from_parts(chapter, verse).ok_or_else(|| InvalidVerseRef(s.to_string()))
    }
}

/// Parse the leading run of ASCII digits, ignoring surrounding whitespace.
pub(crate) fn leading_number(text: &str) -> Option<u32> {
    let text = text.trim();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
