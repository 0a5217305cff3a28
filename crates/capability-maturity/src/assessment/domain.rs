use super::company::CompanyProfile;
use crate::framework::Framework;
use crate::scoring::{self, CategoryScoreOverride, ProcessScore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier wrapper for assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Partial,
    Complete,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Partial => "Partial",
            Self::Complete => "Complete",
        }
    }
}

/// Free-text framing of an assessment engagement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentContext {
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub objectives: Option<String>,
    #[serde(default)]
    pub methodology: Option<String>,
    #[serde(default)]
    pub stakeholders: Option<String>,
    #[serde(default)]
    pub constraints: Option<String>,
}

/// Fields supplied when an assessment is opened for a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    pub company_id: String,
    pub title: String,
    #[serde(default)]
    pub job_code: Option<String>,
    #[serde(default)]
    pub company: Option<CompanyProfile>,
    #[serde(flatten)]
    pub context: AssessmentContext,
}

/// One evaluation pass over the taxonomy for a single company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub company_id: String,
    pub title: String,
    pub job_code: Option<String>,
    pub company: Option<CompanyProfile>,
    pub context: AssessmentContext,
    pub is_open: bool,
    pub status: AssessmentStatus,
    pub completion_percentage: u8,
    pub scores: Vec<ProcessScore>,
    pub overrides: Vec<CategoryScoreOverride>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    pub fn open(id: AssessmentId, draft: AssessmentDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            company_id: draft.company_id,
            title: draft.title,
            job_code: draft.job_code,
            company: draft.company,
            context: draft.context,
            is_open: true,
            status: AssessmentStatus::Partial,
            completion_percentage: 0,
            scores: Vec::new(),
            overrides: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Entry for `process_id`, created unscored when missing.
    pub fn score_entry(&mut self, process_id: &str) -> &mut ProcessScore {
        let index = match self
            .scores
            .iter()
            .position(|entry| entry.process_id == process_id)
        {
            Some(index) => index,
            None => {
                self.scores.push(ProcessScore::new(process_id, None));
                self.scores.len() - 1
            }
        };
        &mut self.scores[index]
    }

    /// Replaces the override for the same category, or appends a new one.
    pub fn upsert_override(&mut self, entry: CategoryScoreOverride) {
        match self
            .overrides
            .iter_mut()
            .find(|existing| existing.category_id == entry.category_id)
        {
            Some(existing) => *existing = entry,
            None => self.overrides.push(entry),
        }
    }

    pub fn refresh_completion(&mut self, framework: &Framework) {
        self.completion_percentage = completion_percentage(&self.scores, framework);
        self.status = if self.completion_percentage == 100 {
            AssessmentStatus::Complete
        } else {
            AssessmentStatus::Partial
        };
    }

    pub fn global_score(&self, framework: &Framework) -> f64 {
        scoring::global_score(&self.scores, framework.domains(), Some(&self.overrides))
    }

    pub fn status_view(&self, framework: &Framework) -> AssessmentStatusView {
        AssessmentStatusView {
            assessment_id: self.id.clone(),
            company_id: self.company_id.clone(),
            title: self.title.clone(),
            is_open: self.is_open,
            status: self.status.label(),
            completion_percentage: self.completion_percentage,
            global_score: self.global_score(framework),
            updated_at: self.updated_at,
        }
    }
}

/// Share of the framework's processes carrying a rating, rounded to a whole percent.
pub fn completion_percentage(scores: &[ProcessScore], framework: &Framework) -> u8 {
    let total = framework.process_count();
    if total == 0 {
        return 0;
    }

    let rated: HashSet<&str> = scores
        .iter()
        .filter(|entry| entry.score.is_some())
        .map(|entry| entry.process_id.as_str())
        .collect();
    let scored = framework
        .processes()
        .filter(|process| rated.contains(process.id.as_str()))
        .count();

    ((scored as f64 / total as f64) * 100.0).round() as u8
}

/// Sanitized summary returned by list and status endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStatusView {
    pub assessment_id: AssessmentId,
    pub company_id: String,
    pub title: String,
    pub is_open: bool,
    pub status: &'static str,
    pub completion_percentage: u8,
    pub global_score: f64,
    pub updated_at: DateTime<Utc>,
}
