use super::views::{
    AssessmentReport, CategoryReportEntry, DomainReportEntry, ProcessReportEntry, RadarPoint,
};
use crate::assessment::domain::{completion_percentage, Assessment};
use crate::framework::{Category, Domain, Framework};
use crate::scoring::{
    self, find_override, format_aggregate_score, format_process_score, CategoryScoreOverride,
    MaturityBand, ProcessScore,
};

impl Assessment {
    pub fn report(&self, framework: &Framework) -> AssessmentReport {
        build_report(framework, &self.scores, &self.overrides)
    }
}

/// Computes every level of the roll-up for one set of scores and overrides.
pub fn build_report(
    framework: &Framework,
    scores: &[ProcessScore],
    overrides: &[CategoryScoreOverride],
) -> AssessmentReport {
    let domains: Vec<DomainReportEntry> = framework
        .domains()
        .iter()
        .map(|domain| domain_entry(domain, scores, overrides))
        .collect();

    let radar = domains
        .iter()
        .map(|entry| RadarPoint {
            label: entry.title.clone(),
            score: entry.score,
        })
        .collect();

    let global_score = scoring::global_score(scores, framework.domains(), Some(overrides));
    let global_band = MaturityBand::from_score(global_score);

    AssessmentReport {
        global_score,
        global_display: format_aggregate_score(global_score),
        global_band,
        global_label: global_band.label(),
        completion_percentage: completion_percentage(scores, framework),
        domains,
        radar,
    }
}

fn domain_entry(
    domain: &Domain,
    scores: &[ProcessScore],
    overrides: &[CategoryScoreOverride],
) -> DomainReportEntry {
    let score = scoring::domain_score(scores, domain, Some(overrides));
    let band = MaturityBand::from_score(score);

    DomainReportEntry {
        domain_id: domain.id.clone(),
        title: domain.title.clone(),
        score,
        display: format_aggregate_score(score),
        band,
        band_label: band.label(),
        heatmap: band.heatmap(),
        categories: domain
            .categories
            .iter()
            .map(|category| category_entry(category, scores, overrides))
            .collect(),
    }
}

fn category_entry(
    category: &Category,
    scores: &[ProcessScore],
    overrides: &[CategoryScoreOverride],
) -> CategoryReportEntry {
    let score = scoring::category_score(scores, category, Some(overrides));
    let computed_score = scoring::category_score(scores, category, None);
    let entry = find_override(overrides, &category.id);
    let band = MaturityBand::from_score(score);

    let processes: Vec<ProcessReportEntry> = category
        .processes
        .iter()
        .map(|process| {
            let value = scoring::process_score(scores, &process.id);
            let recorded = scores.iter().find(|entry| entry.process_id == process.id);
            ProcessReportEntry {
                process_id: process.id.clone(),
                name: process.name.clone(),
                score: (value > 0.0).then_some(value as u8),
                display: format_process_score(value),
                heatmap: MaturityBand::from_score(value).heatmap(),
                notes: recorded.and_then(|entry| entry.notes.clone()),
                priority: recorded.is_some_and(|entry| entry.priority),
            }
        })
        .collect();

    CategoryReportEntry {
        category_id: category.id.clone(),
        title: category.title.clone(),
        score,
        display: format_aggregate_score(score),
        computed_score,
        overridden: entry.is_some_and(|entry| entry.manual_score.is_some()),
        is_manual: entry.is_some_and(|entry| entry.is_manual),
        band,
        band_label: band.label(),
        heatmap: band.heatmap(),
        scored_processes: processes.iter().filter(|p| p.score.is_some()).count(),
        total_processes: processes.len(),
        processes,
    }
}
