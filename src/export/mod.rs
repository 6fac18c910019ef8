//! Report generation for both schedule projections.
//!
//! Supports two output formats:
//! - Markdown: narrative report with headings, technique lists and fenced
//!   instruction blocks, suitable for direct download
//! - JSON: pretty-printed schedule structure that parses back unchanged

pub mod json;
pub mod markdown;

use crate::components::ComponentCategory;
use crate::criteria::CriterionScheduleItem;
use crate::metadata::ReportMetadata;
use crate::options::ScheduleOptions;
use std::fmt;
use std::str::FromStr;

pub use json::{
    component_schedule_from_json, component_schedule_to_json, criterion_schedule_from_json,
    criterion_schedule_to_json,
};
pub use markdown::{component_markdown, criterion_markdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

impl OutputFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

pub fn render_criterion_schedule(
    items: &[CriterionScheduleItem],
    options: &ScheduleOptions,
    metadata: &ReportMetadata,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(criterion_markdown(items, options, metadata)),
        OutputFormat::Json => criterion_schedule_to_json(items),
    }
}

pub fn render_component_schedule(
    categories: &[ComponentCategory],
    options: &ScheduleOptions,
    metadata: &ReportMetadata,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(component_markdown(categories, options, metadata)),
        OutputFormat::Json => component_schedule_to_json(categories),
    }
}
