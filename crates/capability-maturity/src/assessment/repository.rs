use super::domain::{Assessment, AssessmentId};

/// Storage abstraction so the service can run against any backend.
///
/// `modify` must apply the closure and persist its result as one atomic step:
/// concurrent writers to the same assessment never observe or overwrite each
/// other's partial state. When the closure fails nothing is persisted.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError>;
    fn modify<T, E, F>(&self, id: &AssessmentId, apply: F) -> Result<(Assessment, T), E>
    where
        F: FnOnce(&mut Assessment) -> Result<T, E>,
        E: From<RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;
    fn list(&self) -> Result<Vec<Assessment>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
