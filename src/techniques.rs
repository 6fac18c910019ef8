//! Technique normalizer: flattens a criterion's raw technique lists into
//! uniquely keyed [`TechniqueReference`]s.

use crate::dataset::{TechniqueRecord, TechniqueSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const TECHNIQUES_BASE_URL: &str = "https://www.w3.org/WAI/WCAG22/Techniques";
pub const UNDERSTANDING_BASE_URL: &str = "https://www.w3.org/WAI/WCAG22/Understanding";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechniqueCategory {
    Sufficient,
    Advisory,
    Failure,
}

impl TechniqueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TechniqueCategory::Sufficient => "sufficient",
            TechniqueCategory::Advisory => "advisory",
            TechniqueCategory::Failure => "failure",
        }
    }
}

impl fmt::Display for TechniqueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueReference {
    pub id: String,
    pub technology: String,
    pub title: String,
    pub url: String,
}

impl TechniqueReference {
    fn from_record(record: &TechniqueRecord, category: TechniqueCategory) -> Option<Self> {
        let (id, technology, title) = record.complete()?;
        Some(Self {
            id: id.to_string(),
            technology: technology.to_string(),
            title: title.to_string(),
            url: technique_url(id, technology, category),
        })
    }
}

/// Failures live in their own namespace regardless of technology.
pub fn technique_url(id: &str, technology: &str, category: TechniqueCategory) -> String {
    match category {
        TechniqueCategory::Failure => format!("{TECHNIQUES_BASE_URL}/failures/{id}"),
        TechniqueCategory::Sufficient | TechniqueCategory::Advisory => {
            format!("{TECHNIQUES_BASE_URL}/{technology}/{id}")
        }
    }
}

pub fn understanding_url(criterion_id: &str) -> String {
    format!("{UNDERSTANDING_BASE_URL}/{criterion_id}")
}

/// Normalizes one technique category of a criterion.
///
/// Incomplete records are dropped. Sufficient techniques are deduplicated by
/// id across direct entries and groups, keeping the first occurrence;
/// advisory and failure lists are passed through in order.
pub fn normalize_techniques(
    techniques: Option<&TechniqueSet>,
    category: TechniqueCategory,
) -> Vec<TechniqueReference> {
    let Some(techniques) = techniques else {
        return Vec::new();
    };

    match category {
        TechniqueCategory::Sufficient => {
            let mut seen = HashSet::new();
            techniques
                .sufficient_records()
                .filter_map(|record| TechniqueReference::from_record(record, category))
                .filter(|reference| seen.insert(reference.id.clone()))
                .collect()
        }
        TechniqueCategory::Advisory => references(&techniques.advisory, category),
        TechniqueCategory::Failure => references(&techniques.failure, category),
    }
}

fn references(records: &[TechniqueRecord], category: TechniqueCategory) -> Vec<TechniqueReference> {
    records
        .iter()
        .filter_map(|record| TechniqueReference::from_record(record, category))
        .collect()
}
