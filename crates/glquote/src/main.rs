/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Fill the GLQuote column of a translation-notes TSV file
 */

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glquote::{ColumnNames, RunOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "glquote")]
#[command(version)]
#[command(about = "Project original-language quotes in a notes file onto an aligned translation")]
struct Args {
    /// Original-language USFM file
    #[arg(long, alias = "source_path", value_name = "USFM")]
    source_path: PathBuf,

    /// Aligned gateway-language USFM file
    #[arg(long, alias = "target_path", value_name = "USFM")]
    target_path: PathBuf,

    /// Translation-notes TSV file
    #[arg(long, alias = "tn_path", value_name = "TSV")]
    tn_path: PathBuf,

    /// Write the filled table to FILE (defaults to <TN_PATH>.new)
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Book column
    #[arg(long, default_value = "Book")]
    book_column: String,

    /// Chapter column
    #[arg(long, default_value = "Chapter")]
    chapter_column: String,

    /// Verse column
    #[arg(long, default_value = "Verse")]
    verse_column: String,

    /// Combined chapter:verse column, used when present
    #[arg(long, default_value = "Reference")]
    reference_column: String,

    /// Original-language quote column
    #[arg(long, default_value = "OrigQuote")]
    quote_column: String,

    /// Occurrence column
    #[arg(long, default_value = "Occurrence")]
    occurrence_column: String,

    /// Column that receives the projected quote
    #[arg(long, default_value = "GLQuote")]
    output_column: String,

    /// Verbose output (-v logs every row)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_options(self) -> RunOptions {
        RunOptions {
            source_path: self.source_path,
            target_path: self.target_path,
            tn_path: self.tn_path,
            output_path: self.output,
            columns: ColumnNames {
                book: self.book_column,
                chapter: self.chapter_column,
                verse: self.verse_column,
                reference: Some(self.reference_column).filter(|name| !name.is_empty()),
                quote: self.quote_column,
                occurrence: self.occurrence_column,
                output: self.output_column,
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose > 0 {
        "glquote=debug,quote_projection=debug"
    } else {
        "glquote=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = args.into_options();
    let report = glquote::run(&options)?;

    eprintln!(
        "Processed {} rows: {} projected, {} skipped, {} missed",
        report.outcomes.len(),
        report.projected(),
        report.skipped(),
        report.missed()
    );

    Ok(())
}
