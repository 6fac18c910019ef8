use crate::components::ComponentCategory;
use crate::criteria::CriterionScheduleItem;
use crate::results::TestResults;
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage for recorded test results.
pub trait ResultStore {
    fn save_results(&self, results: &TestResults) -> PersistenceResult<()>;
    fn load_results(&self) -> PersistenceResult<Option<TestResults>>;
}

pub fn validate_criterion_schedule(items: &[CriterionScheduleItem]) -> PersistenceResult<()> {
    let mut seen_ids = HashSet::with_capacity(items.len());
    for item in items {
        if !seen_ids.insert(item.id.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate criterion id {}",
                item.id
            )));
        }
    }
    Ok(())
}

pub fn validate_component_schedule(categories: &[ComponentCategory]) -> PersistenceResult<()> {
    let mut seen_names = HashSet::with_capacity(categories.len());
    for category in categories {
        if !seen_names.insert(category.name.as_str()) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate category {}",
                category.name
            )));
        }
        for component in &category.components {
            if component.estimated_time != component.expected_time() {
                return Err(PersistenceError::InvalidData(format!(
                    "component {} has estimated_time {} but {} techniques",
                    component.id,
                    component.estimated_time,
                    component.techniques.len()
                )));
            }
        }
        if category.total_time != category.expected_total() {
            return Err(PersistenceError::InvalidData(format!(
                "category {} total_time {} does not match its components ({})",
                category.name,
                category.total_time,
                category.expected_total()
            )));
        }
    }
    Ok(())
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    JsonResultStore, export_results_csv, load_component_schedule_from_json,
    load_criterion_schedule_from_json, save_component_schedule_to_json,
    save_criterion_schedule_to_json, save_results_csv,
};
