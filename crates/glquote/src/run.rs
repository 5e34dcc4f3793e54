/*
 * run.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! One complete run: load both books and the notes file, fill, write.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use usfm_align::{Book, parse_document};

use crate::batch::{BatchReport, ColumnNames, fill_gl_quotes};
use crate::tsv::TsvTable;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
    pub tn_path: PathBuf,
    /// Defaults to `<tn_path>.new`.
    pub output_path: Option<PathBuf>,
    pub columns: ColumnNames,
}

impl RunOptions {
    pub fn new(source_path: PathBuf, target_path: PathBuf, tn_path: PathBuf) -> Self {
        RunOptions {
            source_path,
            target_path,
            tn_path,
            output_path: None,
            columns: ColumnNames::default(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => {
                let mut name = OsString::from(self.tn_path.as_os_str());
                name.push(".new");
                PathBuf::from(name)
            }
        }
    }
}

/// Fill the quote column of the notes file and write the result.
///
/// All three inputs are checked for existence before anything is read.
pub fn run(options: &RunOptions) -> Result<BatchReport> {
    require_exists("source_path", &options.source_path)?;
    require_exists("target_path", &options.target_path)?;
    require_exists("tn_path", &options.tn_path)?;

    let (source, target) = rayon::join(
        || load_book("source text", &options.source_path),
        || load_book("target text", &options.target_path),
    );
    let (source, target) = (source?, target?);
    tracing::info!(
        source = %options.source_path.display(),
        source_verses = source.verse_count(),
        target = %options.target_path.display(),
        target_verses = target.verse_count(),
        "loaded books"
    );

    let notes = fs::read_to_string(&options.tn_path)
        .with_context(|| format!("Failed to read notes file: {}", options.tn_path.display()))?;
    let mut table = TsvTable::parse(&notes)
        .with_context(|| format!("Failed to parse notes file: {}", options.tn_path.display()))?;

    let report = fill_gl_quotes(&mut table, &source, &target, &options.columns)
        .with_context(|| format!("Cannot process notes file: {}", options.tn_path.display()))?;

    let output = options.output_path();
    fs::write(&output, table.to_tsv_string())
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    tracing::info!(output = %output.display(), "wrote notes");

    Ok(report)
}

fn require_exists(label: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{label} does not exist: {}", path.display());
    }
    Ok(())
}

fn load_book(label: &str, path: &Path) -> Result<Book> {
    let usfm = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {label}: {}", path.display()))?;
    parse_document(&usfm).with_context(|| format!("Failed to parse {label}: {}", path.display()))
}
