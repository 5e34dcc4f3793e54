/*
 * lexer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Single-pass USFM lexer.
//!
//! The lexer only knows the shape of markers; which markers carry verse
//! text and which are stripped is decided by the parser.

use crate::error::{ParseError, ParseErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event<'a> {
    /// Running text between markers.
    Text { text: &'a str, offset: usize },
    /// An opening marker such as `\v`, `\p`, `\f` or `\add`.
    Marker { name: &'a str, offset: usize },
    /// A closing character marker such as `\add*` or `\f*`.
    EndMarker { name: &'a str, offset: usize },
    /// A milestone: `\zaln-s |...\*`, `\zaln-e\*`, `\ts\*`.
    Milestone {
        name: &'a str,
        attributes: &'a str,
        offset: usize,
    },
    /// A `\w text|attributes\w*` word.
    Word {
        text: &'a str,
        attributes: &'a str,
        offset: usize,
    },
}

pub(crate) struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer { source, pos: 0 }
    }

    pub fn next_event(&mut self) -> Result<Option<Event<'a>>> {
        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }
        let start = self.pos;

        if !rest.starts_with('\\') {
            let len = rest.find('\\').unwrap_or(rest.len());
            self.pos += len;
            return Ok(Some(Event::Text {
                text: &rest[..len],
                offset: start,
            }));
        }

        let name_len = rest[1..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '+'))
            .unwrap_or(rest.len() - 1);
        if name_len == 0 {
            // A stray backslash (or `\*` with nothing to close) is kept as text.
            let len = 1 + rest[1..].chars().next().map_or(0, char::len_utf8);
            self.pos += len;
            return Ok(Some(Event::Text {
                text: &rest[..len],
                offset: start,
            }));
        }

        let raw_name = &rest[1..1 + name_len];
        let name = raw_name.trim_start_matches('+');
        let after = 1 + name_len;
        let tail = &rest[after..];

        if tail.starts_with('*') {
            self.pos += after + 1;
            return Ok(Some(Event::EndMarker {
                name,
                offset: start,
            }));
        }
        if tail.starts_with("\\*") {
            self.pos += after + 2;
            return Ok(Some(Event::Milestone {
                name,
                attributes: "",
                offset: start,
            }));
        }
        if is_milestone(name) {
            let close = tail.find("\\*").ok_or_else(|| {
                ParseError::at(
                    self.source,
                    start,
                    ParseErrorKind::UnterminatedMilestone {
                        marker: name.to_string(),
                    },
                )
            })?;
            self.pos += after + close + 2;
            return Ok(Some(Event::Milestone {
                name,
                attributes: &tail[..close],
                offset: start,
            }));
        }

        // The single whitespace character after an opening marker is part of the marker.
        let mut body_start = after;
        if let Some(c) = tail.chars().next() {
            if c.is_whitespace() {
                body_start += c.len_utf8();
            }
        }

        if name == "w" {
            let terminator = format!("\\{raw_name}*");
            let body = &rest[body_start..];
            let unterminated = || {
                ParseError::at(
                    self.source,
                    start,
                    ParseErrorKind::UnterminatedWord {
                        marker: raw_name.to_string(),
                    },
                )
            };
            let close = body.find('\\').ok_or_else(unterminated)?;
            if !body[close..].starts_with(&terminator) {
                return Err(unterminated());
            }
            let content = &body[..close];
            let (text, attributes) = content.split_once('|').unwrap_or((content, ""));
            self.pos += body_start + close + terminator.len();
            return Ok(Some(Event::Word {
                text,
                attributes,
                offset: start,
            }));
        }

        self.pos += body_start;
        Ok(Some(Event::Marker {
            name,
            offset: start,
        }))
    }
}

fn is_milestone(name: &str) -> bool {
    name.len() > 2 && (name.ends_with("-s") || name.ends_with("-e"))
}
