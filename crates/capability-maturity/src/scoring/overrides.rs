use serde::{Deserialize, Serialize};

/// Administrator-entered category score for one assessment.
///
/// Stored uniquely per `(assessment, category)`; writers upsert on that key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScoreOverride {
    pub category_id: String,
    #[serde(default)]
    pub manual_score: Option<f64>,
    #[serde(default)]
    pub is_manual: bool,
}

impl CategoryScoreOverride {
    pub fn manual(category_id: impl Into<String>, score: f64) -> Self {
        Self {
            category_id: category_id.into(),
            manual_score: Some(score),
            is_manual: true,
        }
    }
}

/// First override recorded for `category_id`, if any.
pub fn find_override<'a>(
    overrides: &'a [CategoryScoreOverride],
    category_id: &str,
) -> Option<&'a CategoryScoreOverride> {
    overrides
        .iter()
        .find(|entry| entry.category_id == category_id)
}
