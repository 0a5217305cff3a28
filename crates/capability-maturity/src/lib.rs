//! Capability maturity assessments: the static process taxonomy, the score
//! aggregator that rolls process ratings up to category, domain, and global
//! averages, and the assessment lifecycle that feeds it.

pub mod assessment;
pub mod config;
pub mod error;
pub mod framework;
pub mod scoring;
pub mod telemetry;
