use super::{PersistenceResult, ResultStore};
use crate::{
    ComponentCategory, CriterionScheduleItem, ReportMetadata, ScheduleOptions, TestResults,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Serialize, Deserialize)]
pub struct CriterionScheduleSnapshot {
    pub metadata: ReportMetadata,
    pub options: ScheduleOptions,
    pub items: Vec<CriterionScheduleItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentScheduleSnapshot {
    pub metadata: ReportMetadata,
    pub options: ScheduleOptions,
    pub categories: Vec<ComponentCategory>,
}

pub fn save_criterion_schedule_to_json<P: AsRef<Path>>(
    items: &[CriterionScheduleItem],
    options: &ScheduleOptions,
    metadata: &ReportMetadata,
    path: P,
) -> PersistenceResult<()> {
    super::validate_criterion_schedule(items)?;
    let snapshot = CriterionScheduleSnapshot {
        metadata: metadata.clone(),
        options: options.clone(),
        items: items.to_vec(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_criterion_schedule_from_json<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<CriterionScheduleSnapshot> {
    let file = File::open(path)?;
    let snapshot: CriterionScheduleSnapshot = serde_json::from_reader(file)?;
    super::validate_criterion_schedule(&snapshot.items)?;
    Ok(snapshot)
}

pub fn save_component_schedule_to_json<P: AsRef<Path>>(
    categories: &[ComponentCategory],
    options: &ScheduleOptions,
    metadata: &ReportMetadata,
    path: P,
) -> PersistenceResult<()> {
    super::validate_component_schedule(categories)?;
    let snapshot = ComponentScheduleSnapshot {
        metadata: metadata.clone(),
        options: options.clone(),
        categories: categories.to_vec(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_component_schedule_from_json<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<ComponentScheduleSnapshot> {
    let file = File::open(path)?;
    let snapshot: ComponentScheduleSnapshot = serde_json::from_reader(file)?;
    super::validate_component_schedule(&snapshot.categories)?;
    Ok(snapshot)
}

/// Results kept in a single pretty-printed JSON file.
pub struct JsonResultStore {
    path: PathBuf,
}

impl JsonResultStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultStore for JsonResultStore {
    fn save_results(&self, results: &TestResults) -> PersistenceResult<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, results)?;
        debug!("Saved {} results to {}", results.len(), self.path.display());
        Ok(())
    }

    fn load_results(&self) -> PersistenceResult<Option<TestResults>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let results: TestResults = serde_json::from_reader(file)?;
        Ok(Some(results))
    }
}

#[derive(Serialize)]
struct ResultCsvRecord<'a> {
    #[serde(rename = "Success Criterion")]
    sc_number: &'a str,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Level")]
    level: &'a str,
    #[serde(rename = "Principle")]
    principle: &'a str,
    #[serde(rename = "Guideline")]
    guideline: &'a str,
    #[serde(rename = "Status")]
    status: &'a str,
    #[serde(rename = "Notes")]
    notes: &'a str,
    #[serde(rename = "Tester")]
    tester: &'a str,
    #[serde(rename = "Tested On")]
    tested_on: String,
}

/// Writes one CSV row per schedule item. Criteria without a recorded result
/// are reported as "Not Tested".
pub fn export_results_csv<W: Write>(
    items: &[CriterionScheduleItem],
    results: &TestResults,
    writer: W,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for item in items {
        let result = results.get(&item.id);
        let status = results.status_for(&item.id);
        writer.serialize(ResultCsvRecord {
            sc_number: &item.sc_number,
            title: &item.title,
            level: item.level.as_str(),
            principle: &item.principle,
            guideline: &item.guideline,
            status: status.label(),
            notes: result.map(|r| r.notes.as_str()).unwrap_or(""),
            tester: result.and_then(|r| r.tester.as_deref()).unwrap_or(""),
            tested_on: result
                .and_then(|r| r.tested_on)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_results_csv<P: AsRef<Path>>(
    items: &[CriterionScheduleItem],
    results: &TestResults,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    export_results_csv(items, results, file)
}
