//! Life Expectancy - personalized life-expectancy statistics from mortality tables
//!
//! This library provides:
//! - Parsing of per-country death-age distribution tables
//! - A write-once table cache shared across evaluations
//! - Conditional life expectancy, clamping and near-term risk for a given age
//! - Chart-ready series and display formatting for a presentation layer

pub mod error;
pub mod query;
pub mod format;
pub mod table;
pub mod analysis;
pub mod engine;

// Re-export commonly used types
pub use error::{EngineError, EvaluationError, LoadError, MalformedTableError};
pub use query::{Query, Sex};
pub use format::{format_age, format_percent};
pub use table::{CountryCatalog, MortalityTable, TableCache};
pub use analysis::{evaluate, AnalysisConfig, ChartSeries, DerivedStatistics, Evaluation};
pub use engine::Engine;
