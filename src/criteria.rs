//! Criterion schedule builder: one test item per success criterion.

use crate::classifier::components_to_test;
use crate::dataset::{CriterionContext, Dataset, Guideline, Principle};
use crate::level::{Level, LevelFilter};
use crate::techniques::{
    TechniqueCategory, TechniqueReference, normalize_techniques, understanding_url,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;
use tracing::debug;

const BASE_MINUTES: u32 = 10;
const SUFFICIENT_MINUTES: u32 = 5;
const ADVISORY_MINUTES: u32 = 3;
const FAILURE_MINUTES: u32 = 2;
const LISTED_STEP_TECHNIQUES: usize = 3;

const HEARING_GUIDELINES: &[&str] = &["time-based-media", "audio-content"];

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScheduleItem {
    pub id: String,
    pub sc_number: String,
    pub title: String,
    pub level: Level,
    pub principle: String,
    pub guideline: String,
    pub description: String,
    pub understanding_url: String,
    pub sufficient_techniques: Vec<TechniqueReference>,
    pub advisory_techniques: Vec<TechniqueReference>,
    pub failure_techniques: Vec<TechniqueReference>,
    pub testing_steps: Vec<String>,
    pub estimated_time: u32,
    pub components_to_test: Vec<String>,
    pub requires_sight: bool,
    pub requires_hearing: bool,
    pub requires_motor: bool,
}

impl CriterionScheduleItem {
    fn from_context(ctx: CriterionContext<'_>) -> Self {
        let CriterionContext {
            principle,
            guideline,
            criterion,
        } = ctx;
        let techniques = criterion.techniques.as_ref();
        let sufficient = normalize_techniques(techniques, TechniqueCategory::Sufficient);
        let advisory = normalize_techniques(techniques, TechniqueCategory::Advisory);
        let failures = normalize_techniques(techniques, TechniqueCategory::Failure);

        let testing_steps = testing_steps(&criterion.num, &criterion.handle, &sufficient, &failures);
        let components = components_to_test(&sufficient);

        Self {
            id: criterion.id.clone(),
            sc_number: criterion.num.clone(),
            title: criterion.handle.clone(),
            level: criterion.level,
            principle: section_heading(&principle.num, &principle.handle),
            guideline: section_heading(&guideline.num, &guideline.handle),
            description: plain_text(criterion.content.as_deref().unwrap_or("")),
            understanding_url: understanding_url(&criterion.id),
            estimated_time: estimate_minutes(sufficient.len(), advisory.len(), failures.len()),
            requires_sight: is_principle(principle, "perceivable"),
            requires_hearing: is_hearing_guideline(guideline),
            requires_motor: is_principle(principle, "operable"),
            sufficient_techniques: sufficient,
            advisory_techniques: advisory,
            failure_techniques: failures,
            testing_steps,
            components_to_test: components,
        }
    }
}

/// Builds the criterion schedule for every criterion whose level passes the
/// filter, sorted by criterion number.
pub fn build_criterion_schedule(
    dataset: &Dataset,
    levels: &LevelFilter,
) -> Vec<CriterionScheduleItem> {
    let mut items: Vec<CriterionScheduleItem> = dataset
        .criteria()
        .filter(|ctx| levels.contains(ctx.criterion.level))
        .map(CriterionScheduleItem::from_context)
        .collect();
    items.sort_by(|a, b| compare_sc_numbers(&a.sc_number, &b.sc_number));
    debug!("Built {} criterion schedule items for levels {}", items.len(), levels);
    items
}

/// `"{num} {handle}"`, the string report sections are keyed on.
pub fn section_heading(num: &str, handle: &str) -> String {
    format!("{num} {handle}")
}

pub fn estimate_minutes(sufficient: usize, advisory: usize, failures: usize) -> u32 {
    BASE_MINUTES
        + SUFFICIENT_MINUTES * sufficient as u32
        + ADVISORY_MINUTES * advisory as u32
        + FAILURE_MINUTES * failures as u32
}

fn is_principle(principle: &Principle, name: &str) -> bool {
    principle.id.eq_ignore_ascii_case(name) || principle.handle.eq_ignore_ascii_case(name)
}

fn is_hearing_guideline(guideline: &Guideline) -> bool {
    HEARING_GUIDELINES
        .iter()
        .any(|id| guideline.id.eq_ignore_ascii_case(id))
}

fn testing_steps(
    sc_number: &str,
    title: &str,
    sufficient: &[TechniqueReference],
    failures: &[TechniqueReference],
) -> Vec<String> {
    let mut steps = vec![
        format!("Review success criterion {sc_number} {title} and its intent"),
        "Locate all page components relevant to this criterion".to_string(),
    ];

    if !sufficient.is_empty() {
        steps.push("Verify that at least one sufficient technique is implemented:".to_string());
        for technique in sufficient.iter().take(LISTED_STEP_TECHNIQUES) {
            steps.push(format!("  - {}: {}", technique.id, technique.title));
        }
    }

    if !failures.is_empty() {
        steps.push("Check that none of the documented failures occur:".to_string());
        for failure in failures.iter().take(LISTED_STEP_TECHNIQUES) {
            steps.push(format!("  - {}: {}", failure.id, failure.title));
        }
    }

    steps.push("Document results with evidence (screenshots, code excerpts)".to_string());
    steps.push("Record the assistive technology and browser used for testing".to_string());
    steps
}

/// Strips tags and decodes `&nbsp; &amp; &lt; &gt; &quot;`. Other entities
/// are left as they are.
pub fn plain_text(html: &str) -> String {
    let stripped = HTML_TAG.replace_all(html, "");
    stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Orders dotted criterion numbers segment by segment, numerically where
/// both segments are numbers, so `1.4.10` follows `1.4.9`.
pub fn compare_sc_numbers(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (x.trim().parse::<u32>(), y.trim().parse::<u32>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}
