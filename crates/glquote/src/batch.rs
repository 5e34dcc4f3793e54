/*
 * batch.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fill the gateway-language quote column of a notes table.
//!
//! Rows are independent, so they are projected in parallel against the two
//! shared books and written back in input order. A row that cannot be
//! projected gets an empty field and a warning; it never stops the batch.

use quote_projection::{ProjectionMiss, QuoteRequest, QuoteSpec, parse_occurrence, project};
use rayon::prelude::*;
use thiserror::Error;
use usfm_align::{Book, VerseRef};

use crate::tsv::TsvTable;

/// Column names of a notes table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub book: String,
    pub chapter: String,
    pub verse: String,
    /// Combined `chapter:verse` column, used instead of `chapter` and
    /// `verse` when the table has it.
    pub reference: Option<String>,
    pub quote: String,
    pub occurrence: String,
    pub output: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            book: "Book".to_string(),
            chapter: "Chapter".to_string(),
            verse: "Verse".to_string(),
            reference: Some("Reference".to_string()),
            quote: "OrigQuote".to_string(),
            occurrence: "Occurrence".to_string(),
            output: "GLQuote".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("notes table has no {name:?} column")]
    MissingColumn { name: String },
}

/// Why a row produced no projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissReason {
    #[error("invalid reference {value:?}")]
    InvalidReference { value: String },

    #[error("row is for book {found}, source text is {expected}")]
    BookMismatch { expected: String, found: String },

    #[error(transparent)]
    Projection(#[from] ProjectionMiss),
}

impl MissReason {
    /// True when the target text itself is broken at this verse.
    pub fn is_data_error(&self) -> bool {
        matches!(self, MissReason::Projection(miss) if miss.is_data_error())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Projected(String),
    /// No projection was requested (empty quote, occurrence 0, blank row).
    Skipped,
    Missed(MissReason),
}

impl RowOutcome {
    /// The value written to the output column.
    pub fn value(&self) -> &str {
        match self {
            RowOutcome::Projected(text) => text,
            RowOutcome::Skipped | RowOutcome::Missed(_) => "",
        }
    }
}

/// Per-row outcomes, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<RowOutcome>,
}

impl BatchReport {
    pub fn projected(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Projected(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Skipped))
    }

    pub fn missed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Missed(_)))
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

#[derive(Debug, Clone, Copy)]
enum Location {
    Split { chapter: usize, verse: usize },
    Combined(usize),
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    book: Option<usize>,
    location: Location,
    quote: usize,
    occurrence: usize,
}

impl Columns {
    fn resolve(table: &TsvTable, names: &ColumnNames) -> Result<Self, BatchError> {
        let required = |name: &str| {
            table.column_index(name).ok_or_else(|| BatchError::MissingColumn {
                name: name.to_string(),
            })
        };

        let combined = names
            .reference
            .as_deref()
            .and_then(|name| table.column_index(name));
        let location = match combined {
            Some(index) => Location::Combined(index),
            None => Location::Split {
                chapter: required(&names.chapter)?,
                verse: required(&names.verse)?,
            },
        };

        Ok(Columns {
            book: table.column_index(&names.book),
            location,
            quote: required(&names.quote)?,
            occurrence: required(&names.occurrence)?,
        })
    }
}

/// Project every row of `table` and write the results to the output column,
/// appending that column when the table lacks it.
///
/// # Errors
///
/// Fails only when a required input column is missing; per-row problems are
/// reported in the returned [`BatchReport`].
pub fn fill_gl_quotes(
    table: &mut TsvTable,
    source: &Book,
    target: &Book,
    names: &ColumnNames,
) -> Result<BatchReport, BatchError> {
    let columns = Columns::resolve(table, names)?;

    let outcomes: Vec<RowOutcome> = table
        .rows()
        .par_iter()
        .enumerate()
        .map(|(index, row)| evaluate_row(index, row, columns, source, target))
        .collect();

    let output = table.ensure_column(&names.output);
    for (index, outcome) in outcomes.iter().enumerate() {
        if table.is_blank_row(index) {
            continue;
        }
        if let Err(err) = table.set(index, output, outcome.value()) {
            tracing::error!(row = index, error = %err, "could not write projection");
        }
    }

    let report = BatchReport { outcomes };
    tracing::info!(
        rows = report.outcomes.len(),
        projected = report.projected(),
        skipped = report.skipped(),
        missed = report.missed(),
        "filled {} column",
        names.output
    );
    Ok(report)
}

fn evaluate_row(
    index: usize,
    row: &[String],
    columns: Columns,
    source: &Book,
    target: &Book,
) -> RowOutcome {
    let field = move |column: usize| row.get(column).map_or("", |value| value.trim());

    if row.iter().all(String::is_empty) {
        return RowOutcome::Skipped;
    }

    let book = columns.book.map_or("", field);
    let quote = field(columns.quote);
    let occurrence = parse_occurrence(field(columns.occurrence));
    let (reference, raw_reference) = match columns.location {
        Location::Split { chapter, verse } => (
            VerseRef::from_parts(field(chapter), field(verse)),
            format!("{}:{}", field(chapter), field(verse)),
        ),
        Location::Combined(column) => (
            field(column).parse::<VerseRef>().ok(),
            field(column).to_string(),
        ),
    };

    // Line number in the file: one header line, then 1-based rows.
    let line = index + 2;

    let Some(request) = QuoteRequest::new(quote, occurrence) else {
        tracing::debug!(line, book, reference = %raw_reference, "no projection requested");
        return RowOutcome::Skipped;
    };

    let outcome = match reference {
        None => Err(MissReason::InvalidReference {
            value: raw_reference.clone(),
        }),
        Some(reference) => project_row(book, request.at(reference), source, target),
    };

    match outcome {
        Ok(text) => {
            tracing::debug!(
                line,
                book,
                reference = %raw_reference,
                quote,
                projection = %text,
                "projected"
            );
            RowOutcome::Projected(text)
        }
        Err(reason) if reason.is_data_error() => {
            tracing::error!(
                line,
                book,
                reference = %raw_reference,
                quote,
                "bad alignment data: {reason}"
            );
            RowOutcome::Missed(reason)
        }
        Err(reason) => {
            tracing::warn!(
                line,
                book,
                reference = %raw_reference,
                quote,
                occurrence,
                "no projection: {reason}"
            );
            RowOutcome::Missed(reason)
        }
    }
}

fn project_row(
    book: &str,
    spec: QuoteSpec,
    source: &Book,
    target: &Book,
) -> Result<String, MissReason> {
    if let Some(expected) = source.id.as_deref() {
        if !book.is_empty() && !book.eq_ignore_ascii_case(expected) {
            return Err(MissReason::BookMismatch {
                expected: expected.to_string(),
                found: book.to_string(),
            });
        }
    }

    let projected = project(&spec, source, target)?;
    Ok(projected.text)
}
