//! Chart-ready series derived from distribution statistics
//!
//! The presentation layer draws the distribution in two parts: ages already
//! survived, and ages still ahead with a cumulative risk curve. A vertical
//! marker shows the conditional mean age at death.

use serde::Serialize;
use std::io;

use super::distribution::DerivedStatistics;

/// Point on the already-survived part of the distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurvivedPoint {
    pub age: usize,
    pub probability: f64,
}

/// Point on the remaining part of the distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemainingPoint {
    pub age: usize,
    pub probability: f64,
    /// Running probability from the current age to `age`, normalized to end at 1
    pub cumulative: f64,
}

/// Point on the vertical mean marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerPoint {
    pub age: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Ages 0 through the current age
    pub survived: Vec<SurvivedPoint>,
    /// Current age through the end of the row
    pub remaining: Vec<RemainingPoint>,
    /// Evenly spaced points from 0 up to the distribution's height at the mean
    pub mean_marker: Vec<MarkerPoint>,
}

impl ChartSeries {
    pub fn from_statistics(stats: &DerivedStatistics, marker_samples: usize) -> Self {
        let distribution = &stats.distribution;
        let age = stats.age.min(distribution.len().saturating_sub(1));

        let survived = distribution
            .get(..=age)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, &probability)| SurvivedPoint { age: i, probability })
            .collect();

        let tail = distribution.get(age..).unwrap_or_default();
        let tail_total: f64 = tail.iter().sum();
        let mut running = 0.0;
        let remaining = tail
            .iter()
            .enumerate()
            .map(|(k, &probability)| {
                running += probability;
                RemainingPoint {
                    age: age + k,
                    probability,
                    cumulative: if tail_total > 0.0 { running / tail_total } else { 0.0 },
                }
            })
            .collect();

        // At least both ends of the marker
        let samples = marker_samples.max(2);
        let height = probability_at(distribution, stats.mean);
        let steps = (samples - 1) as f64;
        let mean_marker = (0..samples)
            .map(|i| MarkerPoint {
                age: stats.mean,
                probability: height * i as f64 / steps,
            })
            .collect();

        Self {
            survived,
            remaining,
            mean_marker,
        }
    }

    /// Write the remaining series as CSV with an `age,probability,cumulative` header
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for point in &self.remaining {
            csv_writer.serialize(point)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Probability at a fractional age, linearly interpolated between whole ages
///
/// Ages at or past the last index take the last entry.
pub fn probability_at(distribution: &[f64], age: f64) -> f64 {
    let Some(&last) = distribution.last() else {
        return 0.0;
    };
    if age <= 0.0 {
        return distribution[0];
    }

    let floor = age.floor() as usize;
    if floor + 1 >= distribution.len() {
        return last;
    }

    let fraction = age - floor as f64;
    distribution[floor] + fraction * (distribution[floor + 1] - distribution[floor])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{evaluate, DistributionAnalyzer};
    use crate::query::Sex;
    use crate::table::MortalityTable;

    fn chart(text: &str, age: usize) -> ChartSeries {
        let table = MortalityTable::parse(text).unwrap();
        evaluate(&table, Sex::Combined, age).unwrap().chart
    }

    #[test]
    fn test_series_split_at_current_age() {
        let series = chart("0.1 0.2 0.3 0.2 0.2", 2);

        assert_eq!(series.survived.len(), 3);
        assert_eq!(series.survived[2], SurvivedPoint { age: 2, probability: 0.3 });

        let ages: Vec<usize> = series.remaining.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![2, 3, 4]);
    }

    #[test]
    fn test_cumulative_ends_at_one() {
        let series = chart("0.1 0.2 0.3 0.2 0.2", 1);

        let cumulative: Vec<f64> = series.remaining.iter().map(|p| p.cumulative).collect();
        assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
        assert!((cumulative[0] - 0.2 / 0.9).abs() < 1e-12);
        assert!((cumulative.last().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_marker() {
        // Mean from age 3 is 3.5, halfway between 0.2 and 0.2
        let series = chart("0.1 0.2 0.3 0.2 0.2", 3);

        assert_eq!(series.mean_marker.len(), 21);
        assert!(series.mean_marker.iter().all(|p| (p.age - 3.5).abs() < 1e-12));
        assert_eq!(series.mean_marker[0].probability, 0.0);
        assert!((series.mean_marker[20].probability - 0.2).abs() < 1e-12);
        assert!((series.mean_marker[10].probability - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_mean_marker_keeps_both_ends() {
        let table = MortalityTable::parse("0.1 0.2 0.3 0.2 0.2").unwrap();
        let stats = DistributionAnalyzer::default()
            .statistics(&table, Sex::Combined, 3)
            .unwrap();

        for samples in [0, 1, 2] {
            let marker = ChartSeries::from_statistics(&stats, samples).mean_marker;
            assert_eq!(marker.len(), 2);
            assert_eq!(marker[0].probability, 0.0);
            assert!((marker[1].probability - 0.2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_probability_at() {
        let row = [0.1, 0.3, 0.2];
        assert!((probability_at(&row, 0.5) - 0.2).abs() < 1e-12);
        assert!((probability_at(&row, 1.0) - 0.3).abs() < 1e-12);
        assert_eq!(probability_at(&row, 2.0), 0.2);
        assert_eq!(probability_at(&row, 7.3), 0.2);
        assert_eq!(probability_at(&[], 1.0), 0.0);
    }

    #[test]
    fn test_write_csv() {
        let series = chart("0.5 0.25 0.25", 1);
        let mut buffer = Vec::new();
        series.write_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "age,probability,cumulative");
        assert_eq!(lines[1], "1,0.25,0.5");
        assert_eq!(lines[2], "2,0.25,1.0");
    }
}
