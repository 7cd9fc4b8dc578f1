//! Whole-life sweep: statistics for every supported age of one row

use rayon::prelude::*;
use serde::Serialize;

use super::distribution::{summarize_tail, DistributionAnalyzer};
use crate::error::EvaluationError;
use crate::query::Sex;
use crate::table::MortalityTable;

/// Statistics at one attained age
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeTableRow {
    pub age: usize,
    pub killed_off: f64,
    pub mean: f64,
    pub remaining_years: f64,

    /// None when the risk threshold is not reached before the table ends
    pub years_to_go: Option<usize>,
    pub impending_death_probability: Option<f64>,
}

impl DistributionAnalyzer {
    /// Evaluate every age from 0 to the row's highest supported age
    ///
    /// Ages are evaluated in parallel. A risk window that runs off the end
    /// of the row is recorded as `None` instead of failing the sweep.
    pub fn life_table(
        &self,
        table: &MortalityTable,
        sex: Sex,
    ) -> Result<Vec<LifeTableRow>, EvaluationError> {
        let row = table.row(sex)?;
        let max_age = summarize_tail(row, sex, 0)?.max_age;

        (0..=max_age)
            .into_par_iter()
            .map(|age| {
                let tail = summarize_tail(row, sex, age)?;
                let window = match self.impending_window(row, &tail) {
                    Ok(window) => Some(window),
                    Err(EvaluationError::ImpendingWindowOverflow { .. }) => None,
                    Err(other) => return Err(other),
                };

                Ok(LifeTableRow {
                    age: tail.age,
                    killed_off: tail.killed_off,
                    mean: tail.mean,
                    remaining_years: tail.mean - tail.age as f64,
                    years_to_go: window.map(|(years, _)| years),
                    impending_death_probability: window.map(|(_, p)| p),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisConfig;

    #[test]
    fn test_one_row_per_supported_age() {
        let table = MortalityTable::parse("0.1 0.2 0.3 0.2 0.2 0 0").unwrap();
        let rows = DistributionAnalyzer::default()
            .life_table(&table, Sex::Combined)
            .unwrap();

        let ages: Vec<usize> = rows.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![0, 1, 2, 3, 4]);
        assert_eq!(rows[0].killed_off, 0.0);
        assert!((rows[4].remaining_years).abs() < 1e-12);
        assert!(rows.iter().all(|r| r.years_to_go.is_some()));
    }

    #[test]
    fn test_overflowing_window_is_recorded_as_none() {
        let table = MortalityTable::parse("0.995 0.005").unwrap();
        let rows = DistributionAnalyzer::new(AnalysisConfig::legacy())
            .life_table(&table, Sex::Combined)
            .unwrap();

        assert_eq!(rows[0].years_to_go, Some(1));
        assert_eq!(rows[1].years_to_go, None);
        assert_eq!(rows[1].impending_death_probability, None);
    }

    #[test]
    fn test_degenerate_row_fails() {
        let table = MortalityTable::parse("0 0").unwrap();
        assert!(DistributionAnalyzer::default()
            .life_table(&table, Sex::Combined)
            .is_err());
    }
}
