/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Quote projection across word-aligned translations.
//!
//! Given a phrase quoted from an original-language verse and a translation
//! of the same book aligned to it with `\zaln-s` milestones, find the phrase
//! the translation uses for it:
//!
//! 1. [`locator`] finds the requested occurrence of the quote in the source verse,
//! 2. [`resolver`] follows the alignment groups to target tokens,
//! 3. [`assembler`] does this for each part of an elliptical quote,
//! 4. [`render`] turns the target tokens back into text.
//!
//! ```rust
//! use quote_projection::project_quote;
//! use usfm_align::{VerseRef, parse_document};
//!
//! let source = parse_document("\\c 1\n\\v 1 \\w Ἐν\\w* \\w ἀρχῇ\\w*").unwrap();
//! let target = parse_document(concat!(
//!     "\\c 1\n\\v 1 ",
//!     "\\zaln-s |x-occurrence=\"1\" x-content=\"Ἐν\"\\*\\w In\\w*\\zaln-e\\* ",
//!     "\\w the\\w* ",
//!     "\\zaln-s |x-occurrence=\"1\" x-content=\"ἀρχῇ\"\\*\\w beginning\\w*\\zaln-e\\*",
//! ))
//! .unwrap();
//!
//! let reference = VerseRef::new(1, 1);
//! let projected = project_quote("ἐν ἀρχῇ", reference, 1, &source, &target).unwrap();
//! assert_eq!(projected.text, "In beginning");
//! ```
//!
//! Every failure to project is a [`ProjectionMiss`]; callers record an empty
//! projection for the request and continue.

pub mod assembler;
pub mod error;
pub mod locator;
pub mod project;
pub mod quote;
pub mod render;
pub mod resolver;

pub use assembler::{AssembledQuote, assemble};
pub use error::{AlignmentError, ProjectionMiss};
pub use project::{ProjectedQuote, project, project_quote};
pub use quote::{ELLIPSIS, QuoteRequest, QuoteSpec, parse_occurrence, split_quote};
pub use render::render;
pub use resolver::{ResolveMiss, VerseAlignment};
