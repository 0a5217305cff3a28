use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{Assessment, AssessmentDraft, AssessmentId};
use crate::assessment::repository::{AssessmentRepository, RepositoryError};
use crate::assessment::service::AssessmentService;
use crate::framework::Framework;

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<AssessmentId, Assessment>>>,
    write_delay: Option<Duration>,
}

impl MemoryRepository {
    /// Holds each write open for `delay` so overlapping writers contend.
    pub(super) fn with_write_delay(delay: Duration) -> Self {
        Self {
            write_delay: Some(delay),
            ..Self::default()
        }
    }
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        Ok(assessment)
    }

    fn modify<T, E, F>(&self, id: &AssessmentId, apply: F) -> Result<(Assessment, T), E>
    where
        F: FnOnce(&mut Assessment) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let mut working = record.clone();
        if let Some(delay) = self.write_delay {
            std::thread::sleep(delay);
        }
        let output = apply(&mut working)?;
        *record = working.clone();
        Ok((working, output))
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|left, right| left.id.cmp(&right.id));
        Ok(records)
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _assessment: Assessment) -> Result<Assessment, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn modify<T, E, F>(&self, _id: &AssessmentId, _apply: F) -> Result<(Assessment, T), E>
    where
        F: FnOnce(&mut Assessment) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("maintenance window".to_string()).into())
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn list(&self) -> Result<Vec<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }
}

pub(super) fn draft() -> AssessmentDraft {
    AssessmentDraft {
        company_id: "acme-industries".to_string(),
        title: "IT capability baseline".to_string(),
        job_code: Some("JC-2025-014".to_string()),
        ..AssessmentDraft::default()
    }
}

pub(super) fn build_service() -> (Arc<AssessmentService<MemoryRepository>>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = Arc::new(AssessmentService::new(
        Arc::new(repository.clone()),
        Arc::new(Framework::standard()),
    ));
    (service, repository)
}

pub(super) async fn response_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
