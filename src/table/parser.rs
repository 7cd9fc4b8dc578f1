//! Death-age distribution tables parsed from raw text
//!
//! The text format has one line per sex variant (combined, female, male)
//! and one whitespace-separated probability per age, starting at age 0.

use serde::Serialize;

use crate::error::{EvaluationError, MalformedTableError};
use crate::query::Sex;

/// Death-age probability mass functions for one country
///
/// Entry `i` of a row is the probability of dying at age `i`. Rows are
/// expected to sum to roughly 1; no renormalization is done here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortalityTable {
    rows: Vec<Vec<f64>>,
}

impl MortalityTable {
    /// Build a table from already-parsed rows, validating each value
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MalformedTableError> {
        if rows.is_empty() {
            return Err(MalformedTableError::Empty);
        }

        for (row, values) in rows.iter().enumerate() {
            for (age, &value) in values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(MalformedTableError::InvalidToken {
                        row,
                        column: age,
                        token: value.to_string(),
                    });
                }
                if value < 0.0 {
                    return Err(MalformedTableError::NegativeProbability { row, age, value });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Parse raw table text
    ///
    /// Trailing blank lines are ignored. A blank line between rows is an
    /// error, since row position selects the sex variant.
    pub fn parse(text: &str) -> Result<Self, MalformedTableError> {
        let rows = text
            .trim_end()
            .lines()
            .enumerate()
            .map(|(row, line)| parse_row(row, line))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(rows)
    }

    /// Row for the given sex variant
    pub fn row(&self, sex: Sex) -> Result<&[f64], EvaluationError> {
        self.rows
            .get(sex.row_index())
            .map(Vec::as_slice)
            .ok_or(EvaluationError::UnknownSexVariant {
                sex,
                available: self.rows.len(),
            })
    }

    /// Number of sex variants present
    pub fn variant_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

fn parse_row(row: usize, line: &str) -> Result<Vec<f64>, MalformedTableError> {
    if line.trim().is_empty() {
        return Err(MalformedTableError::EmptyRow { row });
    }

    line.split_ascii_whitespace()
        .enumerate()
        .map(|(column, token)| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(MalformedTableError::InvalidToken {
                row,
                column,
                token: token.to_string(),
            }),
        })
        .collect()
}
