//! Assessment lifecycle: score and override capture, completion tracking,
//! CSV import, reporting, and the HTTP endpoints that expose them.

pub mod company;
pub mod domain;
pub mod import;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use company::{CompanyProfile, CompanySize, RevenueBand};
pub use domain::{
    completion_percentage, Assessment, AssessmentContext, AssessmentDraft, AssessmentId,
    AssessmentStatus, AssessmentStatusView,
};
pub use import::{ScoreImport, ScoreImportError, ScoreImporter};
pub use report::views::{
    AssessmentReport, CategoryReportEntry, DomainReportEntry, ProcessReportEntry, RadarPoint,
};
pub use repository::{AssessmentRepository, RepositoryError};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
