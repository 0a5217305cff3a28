use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{Assessment, AssessmentContext, AssessmentDraft, AssessmentId};
use super::report::views::AssessmentReport;
use super::repository::{AssessmentRepository, RepositoryError};
use crate::framework::{Category, Framework};
use crate::scoring::{self, find_override, CategoryScoreOverride, ScoreValue};

/// Service owning the assessment lifecycle over an injected taxonomy.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    framework: Arc<Framework>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, framework: Arc<Framework>) -> Self {
        Self {
            repository,
            framework,
        }
    }

    pub fn framework(&self) -> &Framework {
        &self.framework
    }

    pub fn create(&self, draft: AssessmentDraft) -> Result<Assessment, AssessmentServiceError> {
        if draft.title.trim().is_empty() {
            return Err(AssessmentServiceError::Validation(
                "title must not be blank".to_string(),
            ));
        }
        if draft.company_id.trim().is_empty() {
            return Err(AssessmentServiceError::Validation(
                "company_id must not be blank".to_string(),
            ));
        }
        if let Some(company) = &draft.company {
            company
                .validate()
                .map_err(AssessmentServiceError::Validation)?;
        }

        let assessment = Assessment::open(next_assessment_id(), draft, Utc::now());
        let stored = self.repository.insert(assessment)?;
        info!(assessment_id = %stored.id, company_id = %stored.company_id, "assessment opened");
        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<Assessment, AssessmentServiceError> {
        let assessment = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(assessment)
    }

    pub fn list(&self) -> Result<Vec<Assessment>, AssessmentServiceError> {
        Ok(self.repository.list()?)
    }

    /// Record (or clear, with `None`) the rating for one process.
    ///
    /// Notes and the priority flag of the process are kept. Unless the owning
    /// category carries a manual override, its stored score is refreshed to
    /// the new live average whenever that average is above zero.
    pub fn record_score(
        &self,
        id: &AssessmentId,
        process_id: &str,
        score: Option<ScoreValue>,
    ) -> Result<Assessment, AssessmentServiceError> {
        let (_, category) = self
            .framework
            .locate_process(process_id)
            .ok_or_else(|| AssessmentServiceError::UnknownProcess(process_id.to_string()))?;

        let (assessment, ()) = self.mutate(id, |assessment| {
            assessment.score_entry(process_id).score = score;
            sync_automatic_category(assessment, category);
            Ok(())
        })?;
        Ok(assessment)
    }

    /// Replace the free-text notes of one process; blank notes clear them.
    pub fn annotate_process(
        &self,
        id: &AssessmentId,
        process_id: &str,
        notes: Option<String>,
    ) -> Result<Assessment, AssessmentServiceError> {
        self.ensure_process(process_id)?;
        let (assessment, ()) = self.mutate(id, |assessment| {
            let entry = assessment.score_entry(process_id);
            *entry = entry.clone().with_notes(notes);
            Ok(())
        })?;
        Ok(assessment)
    }

    pub fn set_priority(
        &self,
        id: &AssessmentId,
        process_id: &str,
        priority: bool,
    ) -> Result<Assessment, AssessmentServiceError> {
        self.ensure_process(process_id)?;
        let (assessment, ()) = self.mutate(id, |assessment| {
            assessment.score_entry(process_id).priority = priority;
            Ok(())
        })?;
        debug!(assessment_id = %id, process_id, priority, "process priority changed");
        Ok(assessment)
    }

    pub fn update_context(
        &self,
        id: &AssessmentId,
        context: AssessmentContext,
    ) -> Result<Assessment, AssessmentServiceError> {
        let (assessment, ()) = self.mutate(id, |assessment| {
            assessment.context = context;
            Ok(())
        })?;
        Ok(assessment)
    }

    /// Upsert the override keyed by `(assessment, category)`.
    pub fn set_category_override(
        &self,
        id: &AssessmentId,
        category_id: &str,
        manual_score: Option<f64>,
        is_manual: bool,
    ) -> Result<CategoryScoreOverride, AssessmentServiceError> {
        if self.framework.category(category_id).is_none() {
            return Err(AssessmentServiceError::UnknownCategory(
                category_id.to_string(),
            ));
        }
        if let Some(score) = manual_score {
            if !(0.0..=f64::from(ScoreValue::MAX)).contains(&score) {
                return Err(AssessmentServiceError::InvalidOverride(score));
            }
        }

        let entry = CategoryScoreOverride {
            category_id: category_id.to_string(),
            manual_score,
            is_manual,
        };
        let (_, stored) = self.mutate(id, move |assessment| {
            assessment.upsert_override(entry.clone());
            Ok(entry)
        })?;
        Ok(stored)
    }

    /// Stores the live process average as a non-manual override, or clears the
    /// stored score when no process in the category is rated.
    pub fn reset_category_to_automatic(
        &self,
        id: &AssessmentId,
        category_id: &str,
    ) -> Result<CategoryScoreOverride, AssessmentServiceError> {
        let category = self
            .framework
            .category(category_id)
            .ok_or_else(|| AssessmentServiceError::UnknownCategory(category_id.to_string()))?;

        let (_, entry) = self.mutate(id, |assessment| {
            let computed = scoring::category_score(&assessment.scores, category, None);
            debug!(assessment_id = %id, category_id, computed, "resetting category to automatic");
            let entry = CategoryScoreOverride {
                category_id: category.id.clone(),
                manual_score: (computed > 0.0).then_some(computed),
                is_manual: false,
            };
            assessment.upsert_override(entry.clone());
            Ok(entry)
        })?;
        Ok(entry)
    }

    pub fn close(&self, id: &AssessmentId) -> Result<Assessment, AssessmentServiceError> {
        self.set_open(id, false)
    }

    pub fn reopen(&self, id: &AssessmentId) -> Result<Assessment, AssessmentServiceError> {
        self.set_open(id, true)
    }

    pub fn report(&self, id: &AssessmentId) -> Result<AssessmentReport, AssessmentServiceError> {
        let assessment = self.get(id)?;
        Ok(assessment.report(&self.framework))
    }

    fn ensure_process(&self, process_id: &str) -> Result<(), AssessmentServiceError> {
        match self.framework.process(process_id) {
            Some(_) => Ok(()),
            None => Err(AssessmentServiceError::UnknownProcess(
                process_id.to_string(),
            )),
        }
    }

    fn set_open(
        &self,
        id: &AssessmentId,
        is_open: bool,
    ) -> Result<Assessment, AssessmentServiceError> {
        let (assessment, ()) = self.repository.modify(
            id,
            |assessment| -> Result<(), AssessmentServiceError> {
                assessment.is_open = is_open;
                assessment.updated_at = Utc::now();
                Ok(())
            },
        )?;
        info!(assessment_id = %id, is_open, "assessment state changed");
        Ok(assessment)
    }

    /// Applies `apply` to an open assessment atomically, then refreshes completion.
    fn mutate<T, F>(
        &self,
        id: &AssessmentId,
        apply: F,
    ) -> Result<(Assessment, T), AssessmentServiceError>
    where
        F: FnOnce(&mut Assessment) -> Result<T, AssessmentServiceError>,
    {
        let framework = self.framework.as_ref();
        let update = |assessment: &mut Assessment| -> Result<T, AssessmentServiceError> {
            if !assessment.is_open {
                return Err(AssessmentServiceError::Closed(assessment.id.clone()));
            }
            let output = apply(assessment)?;
            assessment.refresh_completion(framework);
            assessment.updated_at = Utc::now();
            Ok(output)
        };
        let (assessment, output) = self.repository.modify(id, update)?;
        debug!(
            assessment_id = %id,
            completion = assessment.completion_percentage,
            "assessment updated"
        );
        Ok((assessment, output))
    }
}

/// Keeps a non-manual category score in step with its processes.
fn sync_automatic_category(assessment: &mut Assessment, category: &Category) {
    let existing = find_override(&assessment.overrides, &category.id);
    if existing.is_some_and(|entry| entry.is_manual) {
        return;
    }

    let computed = scoring::category_score(&assessment.scores, category, None);
    let manual_score = if computed > 0.0 {
        Some(computed)
    } else if existing.is_some() {
        // last rating cleared; drop the stale snapshot
        None
    } else {
        return;
    };
    assessment.upsert_override(CategoryScoreOverride {
        category_id: category.id.clone(),
        manual_score,
        is_manual: false,
    });
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("assessment {0} is closed")]
    Closed(AssessmentId),
    #[error("unknown process '{0}'")]
    UnknownProcess(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("manual score {0} must be between 0 and 5")]
    InvalidOverride(f64),
    #[error("{0}")]
    Validation(String),
}
