use serde::{Deserialize, Serialize};

/// Leaf unit of assessment; the object that receives a maturity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Process {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }
}

/// Macro-process grouping a handful of processes inside one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub processes: Vec<Process>,
}

impl Category {
    pub fn new(id: impl Into<String>, title: impl Into<String>, processes: Vec<Process>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            processes,
        }
    }

    pub fn process_ids(&self) -> impl Iterator<Item = &str> {
        self.processes.iter().map(|process| process.id.as_str())
    }
}

/// Top-level grouping of categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub categories: Vec<Category>,
}

impl Domain {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            categories,
        }
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.categories
            .iter()
            .flat_map(|category| category.processes.iter())
    }
}

/// Immutable taxonomy injected into every aggregation and lifecycle call.
///
/// Construction goes through [`Framework::new`] (or the loaders), which
/// rejects empty or duplicated identifiers, so lookups can assume ids are
/// unique within each level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Framework {
    pub(super) domains: Vec<Domain>,
}

impl Framework {
    pub fn new(domains: Vec<Domain>) -> Result<Self, super::FrameworkError> {
        super::loader::validate(&domains)?;
        Ok(Self { domains })
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.domains
            .iter()
            .flat_map(|domain| domain.categories.iter())
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.domains.iter().flat_map(Domain::processes)
    }

    pub fn domain(&self, id: &str) -> Option<&Domain> {
        self.domains.iter().find(|domain| domain.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories().find(|category| category.id == id)
    }

    pub fn process(&self, id: &str) -> Option<&Process> {
        self.processes().find(|process| process.id == id)
    }

    /// Returns the domain and category that own `process_id`.
    pub fn locate_process(&self, process_id: &str) -> Option<(&Domain, &Category)> {
        self.domains.iter().find_map(|domain| {
            domain
                .categories
                .iter()
                .find(|category| category.process_ids().any(|id| id == process_id))
                .map(|category| (domain, category))
        })
    }

    pub fn process_count(&self) -> usize {
        self.processes().count()
    }
}
