//! Source tree of the WCAG criteria dataset.
//!
//! The dataset is read once and treated as read-only for the rest of the
//! process. Only the shape of the tree is enforced here: a document without
//! `principles`, `guidelines` or `successcriteria` arrays is rejected, while
//! incomplete technique records are kept and later filtered by the
//! normalizer.

use crate::level::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub enum DatasetError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "io error: {err}"),
            DatasetError::Parse(err) => write!(f, "malformed dataset: {err}"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<io::Error> for DatasetError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub principles: Vec<Principle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principle {
    pub id: String,
    pub num: String,
    pub handle: String,
    pub guidelines: Vec<Guideline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guideline {
    pub id: String,
    pub num: String,
    pub handle: String,
    pub successcriteria: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub num: String,
    pub handle: String,
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub techniques: Option<TechniqueSet>,
}

/// Raw technique lists attached to a criterion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniqueSet {
    #[serde(default)]
    pub sufficient: Vec<SufficientEntry>,
    #[serde(default)]
    pub advisory: Vec<TechniqueRecord>,
    #[serde(default)]
    pub failure: Vec<TechniqueRecord>,
}

impl TechniqueSet {
    /// All sufficient records, direct and grouped, in document order.
    /// Duplicates are preserved.
    pub fn sufficient_records(&self) -> impl Iterator<Item = &TechniqueRecord> {
        self.sufficient.iter().flat_map(SufficientEntry::records)
    }
}

/// A technique record as it appears in the dataset. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniqueRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TechniqueRecord {
    pub fn new(
        id: impl Into<String>,
        technology: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            technology: Some(technology.into()),
            title: Some(title.into()),
        }
    }

    /// Returns `(id, technology, title)` when all three are present.
    pub fn complete(&self) -> Option<(&str, &str, &str)> {
        match (&self.id, &self.technology, &self.title) {
            (Some(id), Some(technology), Some(title)) => {
                Some((id.as_str(), technology.as_str(), title.as_str()))
            }
            _ => None,
        }
    }
}

/// Named group of sufficient techniques (a "situation" in the dataset).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniqueGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub techniques: Vec<TechniqueRecord>,
}

/// One entry of a `sufficient` list: either a technique listed directly or a
/// group of techniques.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SufficientEntry {
    Grouped(TechniqueGroup),
    Direct(TechniqueRecord),
}

impl SufficientEntry {
    pub fn records(&self) -> std::slice::Iter<'_, TechniqueRecord> {
        match self {
            SufficientEntry::Grouped(group) => group.techniques.iter(),
            SufficientEntry::Direct(record) => std::slice::from_ref(record).iter(),
        }
    }
}

/// A criterion together with the principle and guideline that own it.
#[derive(Debug, Clone, Copy)]
pub struct CriterionContext<'a> {
    pub principle: &'a Principle,
    pub guideline: &'a Guideline,
    pub criterion: &'a Criterion,
}

impl Dataset {
    pub fn from_json_str(input: &str) -> DatasetResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> DatasetResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Walks every criterion in document order.
    pub fn criteria(&self) -> impl Iterator<Item = CriterionContext<'_>> {
        self.principles.iter().flat_map(|principle| {
            principle.guidelines.iter().flat_map(move |guideline| {
                guideline
                    .successcriteria
                    .iter()
                    .map(move |criterion| CriterionContext {
                        principle,
                        guideline,
                        criterion,
                    })
            })
        })
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria().count()
    }
}

pub fn load_dataset<P: AsRef<Path>>(path: P) -> DatasetResult<Dataset> {
    let path = path.as_ref();
    debug!("Loading dataset from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    let dataset: Dataset = serde_json::from_reader(reader)?;
    info!(
        "Loaded {} principles, {} success criteria",
        dataset.principles.len(),
        dataset.criterion_count()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sufficient_entries_accept_direct_and_grouped_forms() {
        let set: TechniqueSet = serde_json::from_value(json!({
            "sufficient": [
                { "id": "G94", "technology": "general", "title": "Short text alternative" },
                { "title": "Situation A", "techniques": [
                    { "id": "H37", "technology": "html", "title": "Using alt attributes" }
                ]}
            ]
        }))
        .unwrap();

        assert!(matches!(set.sufficient[0], SufficientEntry::Direct(_)));
        assert!(matches!(set.sufficient[1], SufficientEntry::Grouped(_)));
        let ids: Vec<_> = set
            .sufficient_records()
            .filter_map(|r| r.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["G94", "H37"]);
    }

    #[test]
    fn missing_guidelines_is_a_parse_error() {
        let err = Dataset::from_json_value(json!({
            "principles": [{ "id": "perceivable", "num": "1", "handle": "Perceivable" }]
        }))
        .unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn empty_numbers_are_tolerated() {
        let dataset = Dataset::from_json_value(json!({
            "principles": [{
                "id": "robust", "num": "", "handle": "Robust",
                "guidelines": [{
                    "id": "compatible", "num": "4.1", "handle": "Compatible",
                    "successcriteria": [
                        { "id": "parsing", "num": "", "handle": "Parsing", "level": "" }
                    ]
                }]
            }]
        }))
        .unwrap();
        assert_eq!(dataset.criterion_count(), 1);
    }

    #[test]
    fn unknown_level_is_unspecified() {
        let criterion: Criterion = serde_json::from_value(json!({
            "id": "parsing", "num": "4.1.1", "handle": "Parsing", "level": ""
        }))
        .unwrap();
        assert_eq!(criterion.level, Level::Unspecified);
        assert!(criterion.techniques.is_none());
    }
}
