//! Derived statistics for a death-age distribution
//!
//! Given a table row and a current age this computes:
//! - Life expectancy at birth (unconditional mean age at death)
//! - The highest age carrying probability mass, clamping the query age to it
//! - Expected age at death conditioned on survival to the current age
//! - The share of the cohort that died before the current age
//! - The number of years until cumulative death risk reaches a threshold

use log::{debug, warn};
use serde::Serialize;

use super::chart::ChartSeries;
use crate::error::EvaluationError;
use crate::query::Sex;
use crate::table::MortalityTable;

/// Default near-term risk threshold, relative to the remaining mass
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.008;

/// Threshold used by the historic raw-probability comparison
pub const LEGACY_RISK_THRESHOLD: f64 = 0.01;

/// Default number of vertical points on the mean marker
pub const DEFAULT_MARKER_SAMPLES: usize = 21;

/// How accumulated death probability is compared to the risk threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskThreshold {
    /// Compare accumulated probability divided by the remaining mass
    Normalized(f64),
    /// Compare the raw accumulated probability
    Raw(f64),
}

impl RiskThreshold {
    fn reached(self, accumulated: f64, remaining_mass: f64) -> bool {
        match self {
            RiskThreshold::Normalized(threshold) => accumulated / remaining_mass >= threshold,
            RiskThreshold::Raw(threshold) => accumulated >= threshold,
        }
    }
}

/// Configuration for distribution analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Near-term risk threshold for the impending-death window
    pub risk_threshold: RiskThreshold,

    /// Number of points on the vertical mean marker of the chart, at least 2
    pub marker_samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk_threshold: RiskThreshold::Normalized(DEFAULT_RISK_THRESHOLD),
            marker_samples: DEFAULT_MARKER_SAMPLES,
        }
    }
}

impl AnalysisConfig {
    /// Raw comparison against a 1% threshold
    pub fn legacy() -> Self {
        Self {
            risk_threshold: RiskThreshold::Raw(LEGACY_RISK_THRESHOLD),
            ..Default::default()
        }
    }
}

/// Statistics for one (table, sex, age) evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStatistics {
    /// Selected death-age distribution
    pub distribution: Vec<f64>,

    /// Mean age at death over the whole row
    pub mean_at_birth: f64,

    /// Expected age at death given survival to `age`
    pub mean: f64,

    /// Highest age with positive probability
    pub max_age: usize,

    /// Share of the cohort that died before `age`
    pub killed_off: f64,

    /// Probability of dying within `years_to_go` years, given survival to `age`
    pub impending_death_probability: f64,

    /// Length of the near-term risk window in years
    pub years_to_go: usize,

    /// Age actually used, after clamping to `max_age`
    pub age: usize,

    /// Probability mass at and beyond `age`
    pub remaining_mass: f64,
}

impl DerivedStatistics {
    /// Expected years still to be lived
    pub fn remaining_life_expectancy(&self) -> f64 {
        self.mean - self.age as f64
    }
}

/// Statistics plus the chart series derived from them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub statistics: DerivedStatistics,
    pub chart: ChartSeries,
}

/// Everything except the impending-death window
#[derive(Debug, Clone, Copy)]
pub(crate) struct TailSummary {
    pub mean_at_birth: f64,
    pub max_age: usize,
    pub age: usize,
    pub remaining_mass: f64,
    pub mean: f64,
    pub killed_off: f64,
}

/// Main analysis entry point
#[derive(Debug, Clone, Default)]
pub struct DistributionAnalyzer {
    config: AnalysisConfig,
}

impl DistributionAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Evaluate a table for a sex variant and current age
    pub fn evaluate(
        &self,
        table: &MortalityTable,
        sex: Sex,
        age: usize,
    ) -> Result<Evaluation, EvaluationError> {
        let statistics = self.statistics(table, sex, age)?;
        let chart = ChartSeries::from_statistics(&statistics, self.config.marker_samples);
        Ok(Evaluation { statistics, chart })
    }

    /// Derived statistics only, without chart series
    pub fn statistics(
        &self,
        table: &MortalityTable,
        sex: Sex,
        age: usize,
    ) -> Result<DerivedStatistics, EvaluationError> {
        let row = table.row(sex)?;
        let tail = summarize_tail(row, sex, age)?;
        let (years_to_go, impending_death_probability) = self.impending_window(row, &tail)?;

        Ok(DerivedStatistics {
            distribution: row.to_vec(),
            mean_at_birth: tail.mean_at_birth,
            mean: tail.mean,
            max_age: tail.max_age,
            killed_off: tail.killed_off,
            impending_death_probability,
            years_to_go,
            age: tail.age,
            remaining_mass: tail.remaining_mass,
        })
    }

    /// Grow the window one age bucket at a time until the threshold is met
    ///
    /// Returns the window length and the conditional probability of dying
    /// within it.
    pub(crate) fn impending_window(
        &self,
        row: &[f64],
        tail: &TailSummary,
    ) -> Result<(usize, f64), EvaluationError> {
        let age = tail.age;
        let remaining_mass = tail.remaining_mass;

        let mut accumulated = row[age];
        let mut years_to_go = 1;

        while !self.config.risk_threshold.reached(accumulated, remaining_mass) {
            let Some(&p) = row.get(age + years_to_go) else {
                warn!(
                    "risk threshold not reached from age {} within {} years",
                    age, years_to_go
                );
                return Err(EvaluationError::ImpendingWindowOverflow {
                    age,
                    years_to_go,
                    probability: accumulated / remaining_mass,
                });
            };
            accumulated += p;
            years_to_go += 1;
        }

        Ok((years_to_go, accumulated / remaining_mass))
    }
}

/// Evaluate with the default configuration
pub fn evaluate(
    table: &MortalityTable,
    sex: Sex,
    age: usize,
) -> Result<Evaluation, EvaluationError> {
    DistributionAnalyzer::default().evaluate(table, sex, age)
}

/// Means, clamping and the already-dead share for one row and age
pub(crate) fn summarize_tail(
    row: &[f64],
    sex: Sex,
    requested_age: usize,
) -> Result<TailSummary, EvaluationError> {
    let max_age = row
        .iter()
        .rposition(|&p| p > 0.0)
        .ok_or(EvaluationError::DegenerateDistribution { sex })?;
    let total: f64 = row.iter().sum();

    let mean_at_birth = weighted_age_sum(row, 0);

    let mut age = requested_age;
    let mut remaining_mass = tail_mass(row, age);
    if remaining_mass <= 0.0 {
        debug!("age {} beyond {} distribution, clamping to {}", age, sex, max_age);
        age = max_age;
        remaining_mass = tail_mass(row, age);
    }
    if remaining_mass <= 0.0 || total <= 0.0 {
        return Err(EvaluationError::DegenerateDistribution { sex });
    }

    let mean = weighted_age_sum(row, age) / remaining_mass;
    let killed_off = row[..age].iter().sum::<f64>() / total;

    Ok(TailSummary {
        mean_at_birth,
        max_age,
        age,
        remaining_mass,
        mean,
        killed_off,
    })
}

/// Sum of probabilities from `age` to the end of the row
fn tail_mass(row: &[f64], age: usize) -> f64 {
    row.get(age..).map_or(0.0, |tail| tail.iter().sum())
}

/// Sum of `p[i] * i` for `i >= from`
fn weighted_age_sum(row: &[f64], from: usize) -> f64 {
    row.iter()
        .enumerate()
        .skip(from)
        .map(|(i, p)| p * i as f64)
        .sum()
}
