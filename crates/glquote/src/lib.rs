/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fill the `GLQuote` column of a translation-notes TSV file.
//!
//! Each note quotes the original-language text (`OrigQuote`) at a
//! chapter:verse with an occurrence number. Given the aligned
//! gateway-language translation of the same book, [`fill_gl_quotes`]
//! projects every quote into the translation and stores the result next to
//! it. [`run`] wraps this with file loading for the `glquote` binary.

pub mod batch;
pub mod run;
pub mod tsv;

pub use batch::{BatchError, BatchReport, ColumnNames, MissReason, RowOutcome, fill_gl_quotes};
pub use run::{RunOptions, run};
pub use tsv::{TsvError, TsvTable};
