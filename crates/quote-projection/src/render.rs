/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Renderer: turn assembled target positions back into readable text.

use usfm_align::{Token, TokenKind, Verse};

use crate::assembler::AssembledQuote;

/// Separator placed between the parts of an elliptical quote.
pub const SPAN_SEPARATOR: &str = " … ";

/// How a punctuation token attaches to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunctuationClass {
    /// Abuts the following word: `“`, `(`, `¿`.
    Opening,
    /// Abuts the preceding word: `,`, `.`, `”`, `)`.
    Closing,
    /// Abuts both sides: maqaf, hyphen, slash.
    Joining,
}

const OPENING: &[char] = &[
    '\u{201C}', '\u{2018}', '\u{201E}', '(', '[', '{', '\u{00AB}', '\u{00BF}', '\u{00A1}',
];

const JOINING: &[char] = &['\u{05BE}', '-', '/', '\u{2010}', '\u{2011}'];

pub fn punctuation_class(text: &str) -> PunctuationClass {
    if !text.is_empty() && text.chars().all(|c| JOINING.contains(&c)) {
        return PunctuationClass::Joining;
    }
    match text.chars().next() {
        Some(c) if OPENING.contains(&c) => PunctuationClass::Opening,
        _ => PunctuationClass::Closing,
    }
}

/// Render every span and join them with [`SPAN_SEPARATOR`].
///
/// Every span gets a separator, so the number of breaks always matches the
/// quote. Empty input renders to the empty string.
pub fn render(verse: &Verse, assembled: &AssembledQuote) -> String {
    assembled
        .spans
        .iter()
        .map(|span| render_span(verse, span))
        .collect::<Vec<_>>()
        .join(SPAN_SEPARATOR)
}

/// Render one span of ordered target positions.
///
/// Punctuation that sits directly between two selected tokens with no
/// whitespace around it (a maqaf, the hyphen of `well-known`) is kept so
/// the compound is not split apart.
pub fn render_span(verse: &Verse, positions: &[usize]) -> String {
    let mut out = String::new();
    let mut glue = true;
    let mut previous: Option<usize> = None;

    for &position in positions {
        if previous == Some(position) {
            continue;
        }
        let Some(token) = verse.tokens.get(position) else {
            continue;
        };
        if let Some(prev) = previous {
            if let Some(gap) = joined_gap(verse, prev, position) {
                for between in gap {
                    out.push_str(&between.text);
                }
                glue = true;
            }
        }
        previous = Some(position);

        match token.kind {
            TokenKind::Whitespace => continue,
            TokenKind::Word => {
                if !glue {
                    out.push(' ');
                }
                out.push_str(&token.text);
                glue = false;
            }
            TokenKind::Punctuation => match punctuation_class(&token.text) {
                PunctuationClass::Opening => {
                    if !glue {
                        out.push(' ');
                    }
                    out.push_str(&token.text);
                    glue = true;
                }
                PunctuationClass::Closing => {
                    out.push_str(&token.text);
                    glue = false;
                }
                PunctuationClass::Joining => {
                    out.push_str(&token.text);
                    glue = true;
                }
            },
        }
    }

    out
}

/// The tokens strictly between `from` and `to` when they are all punctuation.
fn joined_gap(verse: &Verse, from: usize, to: usize) -> Option<&[Token]> {
    if to <= from + 1 {
        return None;
    }
    let gap = verse.tokens.get(from + 1..to)?;
    gap.iter()
        .all(|token| token.kind == TokenKind::Punctuation)
        .then_some(gap)
}
