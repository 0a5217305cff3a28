use super::aggregate::round_half_up_tenth;
use serde::Serialize;

/// Qualitative band a score falls into; drives labels and heatmap colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityBand {
    NotAssessed,
    NeedsImprovement,
    Fair,
    Good,
    Excellent,
}

impl MaturityBand {
    pub fn from_score(score: f64) -> Self {
        if score == 0.0 || score.is_nan() {
            Self::NotAssessed
        } else if score < 2.0 {
            Self::NeedsImprovement
        } else if score < 3.0 {
            Self::Fair
        } else if score < 4.0 {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotAssessed => "Not Assessed",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    pub const fn heatmap(self) -> HeatmapColors {
        match self {
            Self::NotAssessed => HeatmapColors::new("#f8fafc", "#374151"),
            Self::NeedsImprovement => HeatmapColors::new("#fee2e2", "#7f1d1d"),
            Self::Fair => HeatmapColors::new("#fef3c7", "#78350f"),
            Self::Good => HeatmapColors::new("#e6fccf", "#365314"),
            Self::Excellent => HeatmapColors::new("#dcfce7", "#14532d"),
        }
    }
}

/// Background/foreground pair for one heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapColors {
    pub background: &'static str,
    pub text: &'static str,
}

impl HeatmapColors {
    const fn new(background: &'static str, text: &'static str) -> Self {
        Self { background, text }
    }
}

/// Whole-number rendering of a process score, `N/A` when unscored.
pub fn format_process_score(score: f64) -> String {
    if score == 0.0 || score.is_nan() {
        "N/A".to_string()
    } else {
        format!("{}", score.round())
    }
}

/// One-decimal rendering of a category/domain/global score, `N/A` when unscored.
pub fn format_aggregate_score(score: f64) -> String {
    if score == 0.0 || score.is_nan() {
        "N/A".to_string()
    } else {
        format!("{:.1}", round_half_up_tenth(score))
    }
}
