//! CSV intake for process scores and category overrides.

use crate::framework::Framework;
use crate::scoring::{CategoryScoreOverride, ProcessScore, ScoreValue, ScoreValueError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScoreImportError {
    #[error("failed to read score export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: '{value}' is not a whole-number score")]
    InvalidScore { row: usize, value: String },
    #[error("row {row}: {source}")]
    OutOfRange {
        row: usize,
        #[source]
        source: ScoreValueError,
    },
    #[error("row {row}: '{value}' is not a valid manual score")]
    InvalidManualScore { row: usize, value: String },
    #[error("row {row}: '{value}' is not a recognised boolean")]
    InvalidFlag { row: usize, value: String },
}

/// Rows accepted from an import plus the identifiers that did not match the framework.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScoreImport {
    pub scores: Vec<ProcessScore>,
    pub overrides: Vec<CategoryScoreOverride>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScoreRow {
    #[serde(rename = "Process ID")]
    process_id: String,
    #[serde(rename = "Score", default, deserialize_with = "empty_string_as_none")]
    score: Option<String>,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(rename = "Priority", default, deserialize_with = "empty_string_as_none")]
    priority: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverrideRow {
    #[serde(rename = "Category ID")]
    category_id: String,
    #[serde(
        rename = "Manual Score",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    manual_score: Option<String>,
    #[serde(rename = "Is Manual", default, deserialize_with = "empty_string_as_none")]
    is_manual: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(row: usize, value: &str) -> Result<bool, ScoreImportError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(ScoreImportError::InvalidFlag {
            row,
            value: value.to_string(),
        }),
    }
}

fn parse_score(row: usize, value: Option<&str>) -> Result<Option<ScoreValue>, ScoreImportError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let raw = value
        .trim()
        .parse::<i64>()
        .map_err(|_| ScoreImportError::InvalidScore {
            row,
            value: value.to_string(),
        })?;
    ScoreValue::from_raw(raw).map_err(|source| ScoreImportError::OutOfRange { row, source })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Reads `Process ID,Score[,Notes][,Priority]` and `Category ID,Manual Score,Is Manual` exports.
///
/// Unknown identifiers are skipped and reported; a repeated identifier keeps
/// its first row.
pub struct ScoreImporter<'a> {
    framework: &'a Framework,
}

impl<'a> ScoreImporter<'a> {
    pub fn new(framework: &'a Framework) -> Self {
        Self { framework }
    }

    pub fn scores_from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ScoreImport, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        self.scores_from_reader(file)
    }

    pub fn scores_from_reader<R: Read>(&self, reader: R) -> Result<ScoreImport, ScoreImportError> {
        let mut import = ScoreImport::default();
        let mut seen = HashSet::new();

        for (index, record) in csv_reader(reader).deserialize::<ScoreRow>().enumerate() {
            let row = record?;
            let line = index + 2;

            if self.framework.process(&row.process_id).is_none() {
                warn!(process_id = %row.process_id, line, "skipping unknown process");
                import.skipped.push(row.process_id);
                continue;
            }
            if !seen.insert(row.process_id.clone()) {
                debug!(process_id = %row.process_id, line, "ignoring duplicate score row");
                continue;
            }

            let score = parse_score(line, row.score.as_deref())?;
            let priority = match row.priority.as_deref() {
                Some(flag) => parse_flag(line, flag)?,
                None => false,
            };
            import.scores.push(
                ProcessScore::new(row.process_id, score)
                    .with_notes(row.notes)
                    .with_priority(priority),
            );
        }

        Ok(import)
    }

    pub fn overrides_from_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ScoreImport, ScoreImportError> {
        let file = std::fs::File::open(path)?;
        self.overrides_from_reader(file)
    }

    /// `Is Manual` defaults to whether a manual score is present.
    pub fn overrides_from_reader<R: Read>(
        &self,
        reader: R,
    ) -> Result<ScoreImport, ScoreImportError> {
        let mut import = ScoreImport::default();
        let mut seen = HashSet::new();

        for (index, record) in csv_reader(reader).deserialize::<OverrideRow>().enumerate() {
            let row = record?;
            let line = index + 2;

            if self.framework.category(&row.category_id).is_none() {
                warn!(category_id = %row.category_id, line, "skipping unknown category");
                import.skipped.push(row.category_id);
                continue;
            }
            if !seen.insert(row.category_id.clone()) {
                continue;
            }

            let manual_score = row
                .manual_score
                .as_deref()
                .map(|value| {
                    value
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|score| (0.0..=f64::from(ScoreValue::MAX)).contains(score))
                        .ok_or_else(|| ScoreImportError::InvalidManualScore {
                            row: line,
                            value: value.to_string(),
                        })
                })
                .transpose()?;
            let is_manual = match row.is_manual.as_deref() {
                Some(flag) => parse_flag(line, flag)?,
                None => manual_score.is_some(),
            };

            import.overrides.push(CategoryScoreOverride {
                category_id: row.category_id,
                manual_score,
                is_manual,
            });
        }

        Ok(import)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag(2, "Yes").expect("yes"));
        assert!(!parse_flag(2, " false ").expect("false"));
        assert!(matches!(
            parse_flag(3, "maybe"),
            Err(ScoreImportError::InvalidFlag { row: 3, .. })
        ));
    }

    #[test]
    fn scores_keep_first_duplicate_and_skip_unknown_ids() {
        let framework = Framework::standard();
        let csv = "Process ID,Score,Notes\n\
manage-requests,4,first pass\n\
manage-requests,1,\n\
unknown-process,3,\n\
manage-problems,,not applicable\n";

        let import = ScoreImporter::new(&framework)
            .scores_from_reader(Cursor::new(csv))
            .expect("import succeeds");

        assert_eq!(import.scores.len(), 2);
        assert_eq!(import.scores[0].score, ScoreValue::new(4).ok());
        assert_eq!(import.scores[1].score, None);
        assert_eq!(import.skipped, vec!["unknown-process".to_string()]);
    }

    #[test]
    fn scores_carry_notes_and_priority_columns() {
        let framework = Framework::standard();
        let csv = "Process ID,Score,Notes,Priority\n\
manage-requests,4,Ticket backlog under control,no\n\
manage-problems,2,No root cause reviews,yes\n\
allocate-costs,,,\n";

        let import = ScoreImporter::new(&framework)
            .scores_from_reader(Cursor::new(csv))
            .expect("import succeeds");

        assert_eq!(import.scores.len(), 3);
        assert_eq!(
            import.scores[0].notes.as_deref(),
            Some("Ticket backlog under control")
        );
        assert!(!import.scores[0].priority);
        assert!(import.scores[1].priority);
        assert_eq!(import.scores[2].notes, None);
        assert!(!import.scores[2].priority);
    }

    #[test]
    fn scores_reject_unrecognised_priority_flag() {
        let framework = Framework::standard();
        let csv = "Process ID,Score,Notes,Priority\nmanage-requests,3,,urgent\n";
        let error = ScoreImporter::new(&framework)
            .scores_from_reader(Cursor::new(csv))
            .expect_err("invalid flag");
        assert!(matches!(error, ScoreImportError::InvalidFlag { row: 2, .. }));
    }

    #[test]
    fn scores_report_line_of_invalid_value() {
        let framework = Framework::standard();
        let csv = "Process ID,Score\nmanage-requests,high\n";
        let error = ScoreImporter::new(&framework)
            .scores_from_reader(Cursor::new(csv))
            .expect_err("invalid score");
        assert!(matches!(error, ScoreImportError::InvalidScore { row: 2, .. }));
    }

    #[test]
    fn overrides_default_manual_flag_from_score_presence() {
        let framework = Framework::standard();
        let csv = "Category ID,Manual Score,Is Manual\n\
it-strategy,4.2,\n\
portfolio-management,,\n\
data-governance,3.1,false\n";

        let import = ScoreImporter::new(&framework)
            .overrides_from_reader(Cursor::new(csv))
            .expect("import succeeds");

        assert_eq!(import.overrides.len(), 3);
        assert!(import.overrides[0].is_manual);
        assert_eq!(import.overrides[1].manual_score, None);
        assert!(!import.overrides[1].is_manual);
        assert_eq!(import.overrides[2].manual_score, Some(3.1));
        assert!(!import.overrides[2].is_manual);
    }

    #[test]
    fn overrides_reject_scores_above_five() {
        let framework = Framework::standard();
        let csv = "Category ID,Manual Score,Is Manual\nit-strategy,7,true\n";
        let error = ScoreImporter::new(&framework)
            .overrides_from_reader(Cursor::new(csv))
            .expect_err("out of range");
        assert!(matches!(
            error,
            ScoreImportError::InvalidManualScore { row: 2, .. }
        ));
    }

    #[test]
    fn scores_from_path_propagates_io_errors() {
        let framework = Framework::standard();
        let error = ScoreImporter::new(&framework)
            .scores_from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        assert!(matches!(error, ScoreImportError::Io(_)));
    }
}
