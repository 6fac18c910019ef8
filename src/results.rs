//! Recorded test outcomes, kept apart from the generated schedules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Pass,
    Fail,
    NotApplicable,
    #[default]
    NotTested,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "pass",
            TestStatus::Fail => "fail",
            TestStatus::NotApplicable => "not_applicable",
            TestStatus::NotTested => "not_tested",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Pass => "Pass",
            TestStatus::Fail => "Fail",
            TestStatus::NotApplicable => "Not Applicable",
            TestStatus::NotTested => "Not Tested",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" | "passed" => Ok(TestStatus::Pass),
            "fail" | "failed" => Ok(TestStatus::Fail),
            "na" | "n/a" | "not_applicable" => Ok(TestStatus::NotApplicable),
            "untested" | "not_tested" => Ok(TestStatus::NotTested),
            other => Err(format!(
                "unknown test status '{other}' (expected pass, fail, na or untested)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tested_on: Option<NaiveDate>,
}

impl TestResult {
    pub fn new(status: TestStatus, notes: impl Into<String>) -> Self {
        Self {
            status,
            notes: notes.into(),
            tester: None,
            tested_on: None,
        }
    }
}

/// Results keyed by success criterion id (for example `non-text-content`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestResults(BTreeMap<String, TestResult>);

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a result, returning the one it replaced.
    pub fn record(&mut self, criterion_id: impl Into<String>, result: TestResult) -> Option<TestResult> {
        self.0.insert(criterion_id.into(), result)
    }

    pub fn get(&self, criterion_id: &str) -> Option<&TestResult> {
        self.0.get(criterion_id)
    }

    pub fn remove(&mut self, criterion_id: &str) -> Option<TestResult> {
        self.0.remove(criterion_id)
    }

    pub fn status_for(&self, criterion_id: &str) -> TestStatus {
        self.get(criterion_id)
            .map(|result| result.status)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestResult)> {
        self.0.iter().map(|(id, result)| (id.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.0.values().filter(|r| r.status == status).count()
    }
}
