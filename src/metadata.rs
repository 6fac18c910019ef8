use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,
    pub wcag_version: String,
    pub generated_on: NaiveDate,
}

impl ReportMetadata {
    pub fn new(title: impl Into<String>, generated_on: NaiveDate) -> Self {
        Self {
            title: title.into(),
            generated_on,
            ..Self::default()
        }
    }
}

impl Default for ReportMetadata {
    fn default() -> Self {
        Self {
            title: "WCAG Testing Schedule".to_string(),
            wcag_version: "2.2".to_string(),
            generated_on: Local::now().date_naive(),
        }
    }
}
