use super::model::{Domain, Framework};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reasons a custom taxonomy document is rejected.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("failed to read framework file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid framework document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("framework must declare at least one domain")]
    Empty,
    #[error("{level} identifier must not be blank")]
    BlankId { level: &'static str },
    #[error("duplicate {level} identifier '{id}'")]
    DuplicateId { level: &'static str, id: String },
    #[error("category '{0}' has no processes")]
    EmptyCategory(String),
}

#[derive(Debug, Deserialize)]
struct FrameworkDocument {
    domains: Vec<Domain>,
}

impl Framework {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FrameworkError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading framework document");
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FrameworkError> {
        let document: FrameworkDocument = serde_json::from_reader(reader)?;
        Self::new(document.domains)
    }
}

pub(super) fn validate(domains: &[Domain]) -> Result<(), FrameworkError> {
    if domains.is_empty() {
        return Err(FrameworkError::Empty);
    }

    let mut domain_ids = HashSet::new();
    let mut category_ids = HashSet::new();
    let mut process_ids = HashSet::new();

    for domain in domains {
        track("domain", &domain.id, &mut domain_ids)?;
        for category in &domain.categories {
            track("category", &category.id, &mut category_ids)?;
            if category.processes.is_empty() {
                return Err(FrameworkError::EmptyCategory(category.id.clone()));
            }
            for process in &category.processes {
                track("process", &process.id, &mut process_ids)?;
            }
        }
    }

    Ok(())
}

fn track<'a>(
    level: &'static str,
    id: &'a str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), FrameworkError> {
    if id.trim().is_empty() {
        return Err(FrameworkError::BlankId { level });
    }
    if !seen.insert(id) {
        return Err(FrameworkError::DuplicateId {
            level,
            id: id.to_string(),
        });
    }
    Ok(())
}
