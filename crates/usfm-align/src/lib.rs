/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! USFM parsing with word-alignment tables.
//!
//! This crate turns a USFM document into a [`Book`]: chapters of verses,
//! each verse an ordered list of [`Token`]s. Documents aligned with
//! `\zaln-s`/`\zaln-e` milestones (as produced by translationCore) also get
//! a per-verse table of [`AlignmentGroup`]s, built once while parsing, that
//! links target-language tokens to the original-language words they
//! translate.
//!
//! # Example
//!
//! ```rust
//! use usfm_align::parse_document;
//!
//! let usfm = r#"\c 1
//! \v 1 \zaln-s |x-occurrence="1" x-occurrences="1" x-content="λόγος"\*\w the|x-occurrence="1" x-occurrences="1"\w*
//! \w Word|x-occurrence="1" x-occurrences="1"\w*\zaln-e\*"#;
//!
//! let book = parse_document(usfm).unwrap();
//! let verse = book.verse(1, 1).unwrap();
//! assert_eq!(verse.groups.len(), 1);
//! assert_eq!(verse.groups[0].source_words[0].text, "λόγος");
//! assert_eq!(verse.plain_text(), "the Word");
//! ```
//!
//! Footnotes, cross references and headings are removed before
//! tokenizing, so they never shift token positions or occurrence counts.

pub mod attributes;
pub mod error;
mod lexer;
pub mod normalize;
pub mod parser;
pub mod types;

pub use error::{ParseError, ParseErrorKind, Result, SourceLocation};
pub use normalize::{canonical_word, normalize_word};
pub use parser::parse_document;
pub use types::{
    AlignmentGroup, Book, Chapter, GroupId, InvalidVerseRef, SourceWordRef, Token, TokenKind,
    Verse, VerseRef,
};
