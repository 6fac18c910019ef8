pub mod classifier;
pub mod components;
pub mod criteria;
pub mod dataset;
pub mod export;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod level;
pub mod metadata;
pub mod options;
pub mod persistence;
pub mod results;
pub mod stats;
pub mod techniques;

pub use classifier::{ComponentClass, classify, components_to_test};
pub use components::{
    ComponentCategory, ComponentScheduleItem, RelatedCriterion, TechniqueEntry,
    build_component_schedule, category_for,
};
pub use criteria::{CriterionScheduleItem, build_criterion_schedule, compare_sc_numbers};
pub use dataset::{Dataset, DatasetError, load_dataset};
pub use export::OutputFormat;
pub use level::{Level, LevelFilter};
pub use metadata::ReportMetadata;
pub use options::ScheduleOptions;
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteResultStore;
pub use persistence::{
    JsonResultStore, PersistenceError, ResultStore, export_results_csv,
    load_component_schedule_from_json, load_criterion_schedule_from_json,
    save_component_schedule_to_json, save_criterion_schedule_to_json, save_results_csv,
};
pub use results::{TestResult, TestResults, TestStatus};
pub use stats::{ComponentStatistics, CriterionStatistics};
pub use techniques::{TechniqueCategory, TechniqueReference, normalize_techniques};
