//! Input ingestion: item-matrix and outcome files → transaction model
//!
//! Two files describe a run. The item matrix is CSV with a header row naming
//! the item columns (`#name,item1,item2,...`); each following row is a
//! transaction name plus one 0/1 flag per item column. The outcome file has
//! one `name,value` (or tab-separated) row per transaction, covering the
//! same names in the same order.
//!
//! Every malformed-input condition is caught here, before the correction
//! machinery runs. The core never sees a partial or inconsistent matrix.

use crate::transaction::Transaction;
use std::path::Path;
use thiserror::Error;

/// Errors raised while parsing the two input files
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("matrix header must name at least one item column")]
    MalformedHeader,

    #[error("line {line}: expected {expected} columns, got {got}")]
    RowArity {
        line: usize,
        expected: usize,
        got: usize,
    },

    #[error("line {line}: matrix flag must be 0 or 1, got '{token}'")]
    NonBinaryFlag { line: usize, token: String },

    #[error("line {line}: cannot parse outcome value '{token}'")]
    BadValue { line: usize, token: String },

    #[error("line {line}: matrix row '{matrix}' does not match outcome row '{outcome}'")]
    NameMismatch {
        line: usize,
        matrix: String,
        outcome: String,
    },

    #[error("matrix has {matrix} transactions but outcome file has {outcome}")]
    CountMismatch { matrix: usize, outcome: usize },

    #[error("input contains no transactions")]
    Empty,
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Read both input files and build the transaction model
///
/// Returns the ordered transactions and the item id → display name map
/// (item id is the column position in the matrix header).
pub fn read_inputs(matrix_path: &Path, outcome_path: &Path) -> Result<(Vec<Transaction>, Vec<String>)> {
    let matrix = std::fs::read_to_string(matrix_path).map_err(|source| IngestError::Io {
        path: matrix_path.display().to_string(),
        source,
    })?;
    let outcomes = std::fs::read_to_string(outcome_path).map_err(|source| IngestError::Io {
        path: outcome_path.display().to_string(),
        source,
    })?;
    build_transactions(&matrix, &outcomes)
}

/// Parse both file contents and zip them into transactions
pub fn build_transactions(matrix: &str, outcomes: &str) -> Result<(Vec<Transaction>, Vec<String>)> {
    let (rows, item_names) = parse_matrix(matrix)?;
    let values = parse_outcomes(outcomes)?;

    if rows.len() != values.len() {
        return Err(IngestError::CountMismatch {
            matrix: rows.len(),
            outcome: values.len(),
        });
    }

    let mut transactions = Vec::with_capacity(rows.len());
    for (id, ((row_name, items), (value_name, value))) in
        rows.into_iter().zip(values.into_iter()).enumerate()
    {
        if row_name != value_name {
            return Err(IngestError::NameMismatch {
                line: id + 2,
                matrix: row_name,
                outcome: value_name,
            });
        }
        transactions.push(Transaction::new(id, items, value));
    }

    Ok((transactions, item_names))
}

/// Parse the item matrix: header row of item names, then flag rows
fn parse_matrix(content: &str) -> Result<(Vec<(String, Vec<usize>)>, Vec<String>)> {
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or(IngestError::Empty)?;
    let mut columns = split_row(header);
    if columns.len() < 2 {
        return Err(IngestError::MalformedHeader);
    }
    // First header cell labels the name column, optionally '#'-prefixed
    columns.remove(0);
    let item_names: Vec<String> = columns.iter().map(|c| c.trim().to_string()).collect();
    if item_names.iter().any(|n| n.is_empty()) {
        return Err(IngestError::MalformedHeader);
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let cells = split_row(line);
        if cells.len() != item_names.len() + 1 {
            return Err(IngestError::RowArity {
                line: idx + 1,
                expected: item_names.len() + 1,
                got: cells.len(),
            });
        }
        let name = cells[0].trim().to_string();
        let mut items = Vec::new();
        for (item_id, cell) in cells[1..].iter().enumerate() {
            match cell.trim() {
                "1" => items.push(item_id),
                "0" => {}
                token => {
                    return Err(IngestError::NonBinaryFlag {
                        line: idx + 1,
                        token: token.to_string(),
                    })
                }
            }
        }
        rows.push((name, items));
    }

    if rows.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok((rows, item_names))
}

/// Parse the outcome file: `name,value` rows, optional '#' header
fn parse_outcomes(content: &str) -> Result<Vec<(String, f64)>> {
    let mut values = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || (idx == 0 && trimmed.starts_with('#')) {
            continue;
        }
        let cells = split_row(trimmed);
        if cells.len() != 2 {
            return Err(IngestError::RowArity {
                line: idx + 1,
                expected: 2,
                got: cells.len(),
            });
        }
        let value: f64 = cells[1].trim().parse().map_err(|_| IngestError::BadValue {
            line: idx + 1,
            token: cells[1].trim().to_string(),
        })?;
        values.push((cells[0].trim().to_string(), value));
    }
    if values.is_empty() {
        return Err(IngestError::Empty);
    }
    Ok(values)
}

/// Split a row on tab when present, otherwise comma
fn split_row(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split(',').collect()
    }
}
