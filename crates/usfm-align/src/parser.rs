/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! USFM parser that builds a [`Book`] with per-verse alignment groups.

use crate::attributes::Attributes;
use crate::error::{ParseError, ParseErrorKind, Result, SourceLocation};
use crate::lexer::{Event, Lexer};
use crate::normalize::{self, SegmentKind};
use crate::types::{
    AlignmentGroup, Book, Chapter, GroupId, SourceWordRef, Token, TokenKind, Verse,
    leading_number,
};

/// Parse a complete USFM document.
///
/// # Example
///
/// ```rust
/// use usfm_align::parse_document;
///
/// let book = parse_document("\\id TIT\n\\c 1\n\\p\n\\v 1 \\w Paul\\w*, a servant").unwrap();
/// assert_eq!(book.id.as_deref(), Some("TIT"));
/// assert_eq!(book.verse(1, 1).unwrap().plain_text(), "Paul, a servant");
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed markup: unbalanced alignment
/// milestones, unterminated words, notes or milestones, and chapter or verse
/// markers that are missing a number or appear out of order.
pub fn parse_document(source: &str) -> Result<Book> {
    DocumentParser::new(source).parse()
}

/// Paragraph-level markers whose line is heading or paratext, never verse text.
const PARATEXT_MARKERS: &[&str] = &[
    "ide", "h", "toc", "toca", "rem", "usfm", "sts", "cl", "cp", "cd", "sr", "r", "mr", "mt",
    "mte", "ms", "s", "sp", "qa", "is", "imt", "imte", "ip", "ipi", "im", "imi", "ipq", "imq",
    "ipr", "iq", "ib", "ili", "io", "iot", "iex", "periph",
];

/// Character markers that open a footnote or cross reference.
const NOTE_MARKERS: &[&str] = &["f", "fe", "ef", "x", "ex"];

fn is_paratext(name: &str) -> bool {
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    PARATEXT_MARKERS.contains(&base)
}

fn is_note(name: &str) -> bool {
    NOTE_MARKERS.contains(&name)
}

/// A marker waiting for its argument in the next text run.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Chapter(usize),
    Verse(usize),
    BookId,
}

/// The outermost `\zaln-s` bracket currently open.
struct OpenGroup {
    depth: usize,
    opened_at: usize,
    source_words: Vec<SourceWordRef>,
    target_positions: Vec<usize>,
}

struct DocumentParser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    book: Book,
    chapter: Option<u32>,
    /// Last verse number (bridge end) seen in the current chapter.
    last_verse: Option<u32>,
    verse: Option<Verse>,
    pending: Option<Pending>,
    skip_line: bool,
    note: Option<(&'a str, usize)>,
    alignment: Option<OpenGroup>,
}

impl<'a> DocumentParser<'a> {
    fn new(source: &'a str) -> Self {
        DocumentParser {
            source,
            lexer: Lexer::new(source),
            book: Book::default(),
            chapter: None,
            last_verse: None,
            verse: None,
            pending: None,
            skip_line: false,
            note: None,
            alignment: None,
        }
    }

    fn parse(mut self) -> Result<Book> {
        while let Some(event) = self.lexer.next_event()? {
            self.handle(event)?;
        }

        if let Some((name, offset)) = self.note {
            return Err(self.error(
                offset,
                ParseErrorKind::UnterminatedNote {
                    marker: name.to_string(),
                },
            ));
        }
        match self.pending {
            Some(Pending::Chapter(offset)) => {
                return Err(self.invalid_number(offset, "chapter", ""));
            }
            Some(Pending::Verse(offset)) => {
                return Err(self.invalid_number(offset, "verse", ""));
            }
            _ => {}
        }
        self.check_alignment_closed(self.source.len())?;
        self.finish_verse();
        Ok(self.book)
    }

    fn handle(&mut self, event: Event<'a>) -> Result<()> {
        if let Some((note, _)) = self.note {
            if let Event::EndMarker { name, .. } = event {
                if name == note {
                    self.note = None;
                }
            }
            return Ok(());
        }

        if !matches!(event, Event::Text { .. }) {
            match self.pending.take() {
                Some(Pending::Chapter(offset)) => {
                    return Err(self.invalid_number(offset, "chapter", ""));
                }
                Some(Pending::Verse(offset)) => {
                    return Err(self.invalid_number(offset, "verse", ""));
                }
                Some(Pending::BookId) | None => {}
            }
        }

        match event {
            Event::Text { text, .. } => self.handle_text(text),
            Event::Marker { name, offset } => {
                self.handle_marker(name, offset);
                Ok(())
            }
            Event::EndMarker { .. } => Ok(()),
            Event::Milestone {
                name,
                attributes,
                offset,
            } => match name {
                "zaln-s" => {
                    self.open_alignment(attributes, offset);
                    Ok(())
                }
                "zaln-e" => self.close_alignment(offset),
                _ => Ok(()),
            },
            Event::Word { text, .. } => {
                if !self.skip_line {
                    self.push_word(text);
                }
                Ok(())
            }
        }
    }

    fn handle_marker(&mut self, name: &'a str, offset: usize) {
        if self.skip_line && !matches!(name, "c" | "v") {
            return;
        }
        self.skip_line = false;
        match name {
            "c" => self.pending = Some(Pending::Chapter(offset)),
            "v" => self.pending = Some(Pending::Verse(offset)),
            "id" => self.pending = Some(Pending::BookId),
            _ if is_note(name) => self.note = Some((name, offset)),
            _ if is_paratext(name) => self.skip_line = true,
            // Paragraph and character style markers carry no text of their own.
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &'a str) -> Result<()> {
        let mut text = text;

        if let Some(pending) = self.pending.take() {
            let trimmed = text.trim_start();
            if trimmed.is_empty() {
                self.pending = Some(pending);
                return Ok(());
            }
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
            let value = &trimmed[..end];
            text = &trimmed[end..];
            match pending {
                Pending::Chapter(marker) => self.start_chapter(value, marker)?,
                Pending::Verse(marker) => {
                    self.start_verse(value, marker)?;
                    text = text.trim_start();
                }
                Pending::BookId => {
                    self.book.id = Some(value.to_string());
                    self.skip_line = true;
                }
            }
        }

        if self.skip_line {
            match text.find('\n') {
                Some(nl) => {
                    self.skip_line = false;
                    text = &text[nl + 1..];
                }
                None => return Ok(()),
            }
        }

        for segment in normalize::segments(text) {
            let kind = match segment.kind {
                SegmentKind::Word => TokenKind::Word,
                SegmentKind::Punctuation => TokenKind::Punctuation,
                SegmentKind::Whitespace => TokenKind::Whitespace,
            };
            self.push_token(segment.text, kind);
        }
        Ok(())
    }

    fn start_chapter(&mut self, value: &str, marker: usize) -> Result<()> {
        self.check_alignment_closed(marker)?;
        let number = value
            .parse::<u32>()
            .map_err(|_| self.invalid_number(marker, "chapter", value))?;
        if let Some(previous) = self.chapter {
            if number <= previous {
                return Err(self.error(
                    marker,
                    ParseErrorKind::ChapterOutOfOrder {
                        previous,
                        found: number,
                    },
                ));
            }
        }

        self.finish_verse();
        self.book.chapters.insert(
            number,
            Chapter {
                number,
                ..Default::default()
            },
        );
        self.chapter = Some(number);
        self.last_verse = None;
        Ok(())
    }

    fn start_verse(&mut self, value: &str, marker: usize) -> Result<()> {
        self.check_alignment_closed(marker)?;
        let Some(chapter) = self.chapter else {
            return Err(self.error(marker, ParseErrorKind::VerseOutsideChapter));
        };

        let (first, last) = match value.split_once('-') {
            Some((first, last)) => (first, Some(last)),
            None => (value, None),
        };
        let number =
            leading_number(first).ok_or_else(|| self.invalid_number(marker, "verse", value))?;
        let end_number = last
            .and_then(leading_number)
            .filter(|&end| end >= number)
            .unwrap_or(number);

        if let Some(previous) = self.last_verse {
            if number <= previous {
                return Err(self.error(
                    marker,
                    ParseErrorKind::VerseOutOfOrder {
                        chapter,
                        previous,
                        found: number,
                    },
                ));
            }
        }

        self.finish_verse();
        self.verse = Some(Verse::new(number, end_number));
        self.last_verse = Some(end_number);
        Ok(())
    }

    fn finish_verse(&mut self) {
        let Some(verse) = self.verse.take() else {
            return;
        };
        if let Some(chapter) = self.chapter.and_then(|c| self.book.chapters.get_mut(&c)) {
            chapter.verses.insert(verse.number, verse);
        }
    }

    fn open_alignment(&mut self, attributes: &str, offset: usize) {
        let attrs = Attributes::parse(attributes);
        let word = attrs
            .get("x-content")
            .filter(|content| !content.trim().is_empty())
            .map(|content| SourceWordRef {
                text: content.trim().to_string(),
                occurrence: attrs.get_u32("x-occurrence", 1),
            });

        let group = self.alignment.get_or_insert_with(|| OpenGroup {
            depth: 0,
            opened_at: offset,
            source_words: Vec::new(),
            target_positions: Vec::new(),
        });
        group.depth += 1;
        group.source_words.extend(word);
    }

    fn close_alignment(&mut self, offset: usize) -> Result<()> {
        let Some(group) = self.alignment.as_mut() else {
            return Err(self.error(offset, ParseErrorKind::UnmatchedAlignmentEnd));
        };
        group.depth -= 1;
        if group.depth > 0 {
            return Ok(());
        }

        let Some(group) = self.alignment.take() else {
            return Ok(());
        };
        if let Some(verse) = self.verse.as_mut() {
            let id = GroupId(verse.groups.len());
            verse.groups.push(AlignmentGroup {
                id,
                source_words: group.source_words,
                target_positions: group.target_positions,
            });
        }
        Ok(())
    }

    fn check_alignment_closed(&self, offset: usize) -> Result<()> {
        match &self.alignment {
            Some(group) => Err(self.error(
                offset,
                ParseErrorKind::UnterminatedAlignment {
                    opened: SourceLocation::from_offset(self.source, group.opened_at),
                },
            )),
            None => Ok(()),
        }
    }

    fn push_word(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let kind = if text.chars().all(normalize::is_punctuation) {
            TokenKind::Punctuation
        } else {
            TokenKind::Word
        };
        self.push_token(text, kind);
    }

    fn push_token(&mut self, text: &str, kind: TokenKind) {
        let Some(verse) = self.verse.as_mut() else {
            return;
        };
        let position = verse.tokens.len();

        let mut alignment_group = None;
        if kind != TokenKind::Whitespace {
            if let Some(group) = self.alignment.as_mut() {
                // The open group becomes the next entry of `verse.groups` when it closes.
                alignment_group = Some(GroupId(verse.groups.len()));
                group.target_positions.push(position);
            }
        }

        let normalized = match kind {
            TokenKind::Word => normalize::normalize_word(text),
            TokenKind::Punctuation | TokenKind::Whitespace => String::new(),
        };
        verse.tokens.push(Token {
            text: text.to_string(),
            normalized,
            position,
            kind,
            alignment_group,
        });
    }

    fn error(&self, offset: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::at(self.source, offset, kind)
    }

    fn invalid_number(&self, offset: usize, marker: &'static str, value: &str) -> ParseError {
        self.error(
            offset,
            ParseErrorKind::InvalidNumber {
                marker,
                value: value.to_string(),
            },
        )
    }
}
