//! Plain-language wording of the near-term death risk

use serde::Serialize;

use super::distribution::DerivedStatistics;
use crate::format::format_percent;

/// How close to 1% a window probability must be to be called "1 in 100"
const ONE_IN_HUNDRED_TOLERANCE: f64 = 0.0025;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RiskOutlook {
    /// The window is a single year
    WithinNextYear { probability: f64 },
    /// The window probability is roughly 1%
    OneInHundred { years: usize },
    WithinYears { probability: f64, years: usize },
}

impl RiskOutlook {
    pub fn classify(stats: &DerivedStatistics) -> Self {
        let probability = stats.impending_death_probability;
        let years = stats.years_to_go;

        if years == 1 {
            RiskOutlook::WithinNextYear { probability }
        } else if (probability - 0.01).abs() < ONE_IN_HUNDRED_TOLERANCE {
            RiskOutlook::OneInHundred { years }
        } else {
            RiskOutlook::WithinYears { probability, years }
        }
    }

    /// Sentence completing "... there is also"
    pub fn describe(&self) -> String {
        match *self {
            RiskOutlook::WithinNextYear { probability } => format!(
                "a {} chance that you will die within the next year.",
                format_percent(probability)
            ),
            RiskOutlook::OneInHundred { years } => format!(
                "a 1 in 100 chance that you will already die within the next {} years of your life!",
                years
            ),
            RiskOutlook::WithinYears { probability, years } => format!(
                "a {} chance that you will already die within the next {} years of your life!",
                format_percent(probability),
                years
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::evaluate;
    use crate::query::Sex;
    use crate::table::MortalityTable;

    fn outlook(row: Vec<f64>, age: usize) -> RiskOutlook {
        let table = MortalityTable::from_rows(vec![row]).unwrap();
        let stats = evaluate(&table, Sex::Combined, age).unwrap().statistics;
        RiskOutlook::classify(&stats)
    }

    #[test]
    fn test_within_next_year() {
        let outlook = outlook(vec![0.1, 0.2, 0.3, 0.2, 0.2], 3);
        assert_eq!(outlook, RiskOutlook::WithinNextYear { probability: 0.5 });
        assert_eq!(
            outlook.describe(),
            "a 50% chance that you will die within the next year."
        );
    }

    #[test]
    fn test_one_in_hundred() {
        let mut row = vec![0.0025; 10];
        row.push(0.975);
        let outlook = outlook(row, 0);

        assert_eq!(outlook, RiskOutlook::OneInHundred { years: 4 });
        assert!(outlook.describe().starts_with("a 1 in 100 chance"));
        assert!(outlook.describe().contains("next 4 years"));
    }

    #[test]
    fn test_within_years() {
        // 1.4% over two years is outside the 1 in 100 band
        let row = vec![0.007, 0.007, 0.986];
        let outlook = outlook(row, 0);

        match outlook {
            RiskOutlook::WithinYears { years, probability } => {
                assert_eq!(years, 2);
                assert!((probability - 0.014).abs() < 1e-12);
            }
            other => panic!("unexpected outlook: {:?}", other),
        }
    }
}
