//! Distribution analysis: derived statistics, chart series and risk wording

mod distribution;
mod chart;
mod risk;
mod life_table;

pub use distribution::{
    evaluate, AnalysisConfig, DerivedStatistics, DistributionAnalyzer, Evaluation, RiskThreshold,
    DEFAULT_MARKER_SAMPLES, DEFAULT_RISK_THRESHOLD, LEGACY_RISK_THRESHOLD,
};
pub use chart::{probability_at, ChartSeries, MarkerPoint, RemainingPoint, SurvivedPoint};
pub use risk::RiskOutlook;
pub use life_table::LifeTableRow;
