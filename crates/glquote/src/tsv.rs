/*
 * tsv.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tab-separated tables as used by translation-notes files.
//!
//! Fields are split on tabs only. Notes text routinely contains `"` as plain
//! text, so no quoting is recognised, and an unmodified table is written
//! back byte for byte.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TsvError {
    #[error("TSV input is empty; expected a header row")]
    MissingHeader,

    #[error("row {row} is out of range (table has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A header row plus records, each record a list of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    line_ending: LineEnding,
    trailing_newline: bool,
    bom: bool,
}

impl TsvTable {
    pub fn parse(text: &str) -> Result<Self, TsvError> {
        let (bom, text) = match text.strip_prefix('\u{FEFF}') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if text.is_empty() {
            return Err(TsvError::MissingHeader);
        }

        let line_ending = if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };
        let body = text.strip_suffix('\n').unwrap_or(text);
        let trailing_newline = body.len() != text.len();
        let body = match line_ending {
            LineEnding::CrLf => body.strip_suffix('\r').unwrap_or(body),
            LineEnding::Lf => body,
        };

        let mut lines = body.split(line_ending.as_str()).map(split_fields);
        let header = lines.next().ok_or(TsvError::MissingHeader)?;
        let rows = lines.collect();

        Ok(TsvTable {
            header,
            rows,
            line_ending,
            trailing_newline,
            bom,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Index of column `name`, appending it to the header when missing.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        match self.column_index(name) {
            Some(index) => index,
            None => {
                self.header.push(name.to_string());
                self.header.len() - 1
            }
        }
    }

    /// Field `column` of row `row`; short rows read as empty.
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        let record = self.rows.get(row)?;
        Some(record.get(column).map_or("", String::as_str))
    }

    /// True for a row with no content, such as a blank line.
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|record| record.iter().all(String::is_empty))
    }

    /// Set a field, padding a short row with empty fields.
    ///
    /// Tabs and line breaks in `value` are replaced by spaces so the row
    /// stays one record.
    pub fn set(&mut self, row: usize, column: usize, value: &str) -> Result<(), TsvError> {
        let rows = self.rows.len();
        let record = self
            .rows
            .get_mut(row)
            .ok_or(TsvError::RowOutOfRange { row, rows })?;
        if record.len() <= column {
            record.resize(column + 1, String::new());
        }
        record[column] = value.replace(['\t', '\r', '\n'], " ");
        Ok(())
    }

    pub fn to_tsv_string(&self) -> String {
        let newline = self.line_ending.as_str();
        let mut out = String::new();
        if self.bom {
            out.push('\u{FEFF}');
        }
        let lines = std::iter::once(&self.header).chain(&self.rows);
        for (i, record) in lines.enumerate() {
            if i > 0 {
                out.push_str(newline);
            }
            out.push_str(&record.join("\t"));
        }
        if self.trailing_newline {
            out.push_str(newline);
        }
        out
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}
