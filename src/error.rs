//! Error types for table loading and distribution analysis
//!
//! Every failure is returned as an explicit value; no partial results are
//! produced and the table cache is never touched on failure.

use std::path::PathBuf;
use thiserror::Error;

use crate::query::Sex;

/// Raw table text that does not parse into rows of probabilities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedTableError {
    /// No non-blank lines in the input
    #[error("mortality table contains no rows")]
    Empty,

    /// A blank line before the last row, which would shift the sex variants
    #[error("blank line at row {row}")]
    EmptyRow { row: usize },

    /// A token is not a finite decimal number
    #[error("invalid token {token:?} at row {row}, column {column}")]
    InvalidToken {
        /// Zero-based row (sex variant) index
        row: usize,
        /// Zero-based token index within the row (age)
        column: usize,
        /// The offending token
        token: String,
    },

    /// A probability below zero
    #[error("negative probability {value} at row {row}, age {age}")]
    NegativeProbability {
        row: usize,
        age: usize,
        value: f64,
    },
}

/// Failure of a single evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// The table has no row for the requested sex variant
    #[error("no {sex} row in table ({available} rows available)")]
    UnknownSexVariant { sex: Sex, available: usize },

    /// The selected row has no positive probability mass
    #[error("{sex} distribution has no positive probability mass")]
    DegenerateDistribution { sex: Sex },

    /// The near-term risk threshold was not reached before the end of the row
    ///
    /// `years_to_go` and `probability` describe the window extended to the
    /// table's horizon and may be used as a substitute result.
    #[error(
        "risk threshold not reached from age {age} within the table's horizon \
         ({years_to_go} years, probability {probability})"
    )]
    ImpendingWindowOverflow {
        age: usize,
        years_to_go: usize,
        probability: f64,
    },
}

/// Failure to obtain a table or the country catalog from storage.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed mortality table for {country}: {source}")]
    Malformed {
        country: String,
        #[source]
        source: MalformedTableError,
    },

    #[error("invalid country catalog {}: {source}", path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure while resolving a query through the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("no mortality table loaded for {country}")]
    NotLoaded { country: String },
}
