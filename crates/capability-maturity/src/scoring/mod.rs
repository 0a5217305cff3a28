//! Maturity score values and the aggregator that rolls them up the taxonomy.

pub mod aggregate;
pub mod maturity;
mod overrides;
mod value;

pub use aggregate::{category_score, domain_score, global_score, process_score};
pub use maturity::{format_aggregate_score, format_process_score, HeatmapColors, MaturityBand};
pub use overrides::{find_override, CategoryScoreOverride};
pub use value::{ProcessScore, ScoreValue, ScoreValueError};
