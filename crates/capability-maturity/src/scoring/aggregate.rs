//! Roll-up of process ratings into category, domain, and global scores.
//!
//! Every function is pure and rescans its inputs on each call. A result of
//! `0.0` means "no contributing scores" and is excluded from the next level's
//! average. Category scores round half-up to one decimal; domain and global
//! scores round up (ceiling) to one decimal.

use super::overrides::{find_override, CategoryScoreOverride};
use super::value::{ProcessScore, ScoreValue};
use crate::framework::{Category, Domain};

/// Rating of the first entry for `process_id`, or `0.0` when absent or not applicable.
pub fn process_score(scores: &[ProcessScore], process_id: &str) -> f64 {
    scores
        .iter()
        .find(|entry| entry.process_id == process_id)
        .and_then(|entry| entry.score)
        .map_or(0.0, ScoreValue::as_f64)
}

/// Live average of the category's processes unless an override carries a
/// manual score.
///
/// The override wins whenever `manual_score` is present; `is_manual` is not
/// consulted.
pub fn category_score(
    scores: &[ProcessScore],
    category: &Category,
    overrides: Option<&[CategoryScoreOverride]>,
) -> f64 {
    let manual = overrides
        .and_then(|overrides| find_override(overrides, &category.id))
        .and_then(|entry| entry.manual_score);
    if let Some(manual) = manual {
        return manual;
    }

    let rated = category
        .process_ids()
        .map(|process_id| process_score(scores, process_id))
        .filter(|score| *score > 0.0);

    average(rated).map_or(0.0, round_half_up_tenth)
}

pub fn domain_score(
    scores: &[ProcessScore],
    domain: &Domain,
    overrides: Option<&[CategoryScoreOverride]>,
) -> f64 {
    let rated = domain
        .categories
        .iter()
        .map(|category| category_score(scores, category, overrides))
        .filter(|score| *score > 0.0);

    average(rated).map_or(0.0, ceil_tenth)
}

pub fn global_score(
    scores: &[ProcessScore],
    domains: &[Domain],
    overrides: Option<&[CategoryScoreOverride]>,
) -> f64 {
    let rated = domains
        .iter()
        .map(|domain| domain_score(scores, domain, overrides))
        .filter(|score| *score > 0.0);

    average(rated).map_or(0.0, ceil_tenth)
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub(crate) fn round_half_up_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn ceil_tenth(value: f64) -> f64 {
    (value * 10.0).ceil() / 10.0
}
