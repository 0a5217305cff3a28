use crate::scoring::{HeatmapColors, MaturityBand};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProcessReportEntry {
    pub process_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub display: String,
    pub heatmap: HeatmapColors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub priority: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReportEntry {
    pub category_id: String,
    pub title: String,
    pub score: f64,
    pub display: String,
    /// Live process average, ignoring any override.
    pub computed_score: f64,
    pub overridden: bool,
    pub is_manual: bool,
    pub band: MaturityBand,
    pub band_label: &'static str,
    pub heatmap: HeatmapColors,
    pub scored_processes: usize,
    pub total_processes: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub processes: Vec<ProcessReportEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainReportEntry {
    pub domain_id: String,
    pub title: String,
    pub score: f64,
    pub display: String,
    pub band: MaturityBand,
    pub band_label: &'static str,
    pub heatmap: HeatmapColors,
    pub categories: Vec<CategoryReportEntry>,
}

/// One axis of the domain radar chart.
#[derive(Debug, Clone, Serialize)]
pub struct RadarPoint {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub global_score: f64,
    pub global_display: String,
    pub global_band: MaturityBand,
    pub global_label: &'static str,
    pub completion_percentage: u8,
    pub domains: Vec<DomainReportEntry>,
    pub radar: Vec<RadarPoint>,
}

impl AssessmentReport {
    /// Categories whose displayed score comes from an override.
    pub fn overridden_categories(&self) -> impl Iterator<Item = &CategoryReportEntry> {
        self.domains
            .iter()
            .flat_map(|domain| domain.categories.iter())
            .filter(|category| category.overridden)
    }

    /// Processes the assessor flagged as improvement priorities, in taxonomy order.
    pub fn priority_processes(&self) -> impl Iterator<Item = &ProcessReportEntry> {
        self.domains
            .iter()
            .flat_map(|domain| domain.categories.iter())
            .flat_map(|category| category.processes.iter())
            .filter(|process| process.priority)
    }

    pub fn domain(&self, domain_id: &str) -> Option<&DomainReportEntry> {
        self.domains
            .iter()
            .find(|domain| domain.domain_id == domain_id)
    }
}
