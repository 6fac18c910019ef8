use chrono::NaiveDate;
use serde_json::json;
use wcag_schedule::{
    ComponentStatistics, CriterionStatistics, Dataset, LevelFilter, OutputFormat, ReportMetadata,
    ScheduleOptions, build_component_schedule, build_criterion_schedule,
    export::{
        component_markdown, component_schedule_from_json, criterion_markdown,
        criterion_schedule_from_json, render_component_schedule, render_criterion_schedule,
    },
};

fn sample_dataset() -> Dataset {
    Dataset::from_json_str(include_str!("fixtures/wcag_sample.json")).unwrap()
}

fn metadata() -> ReportMetadata {
    ReportMetadata::new(
        "Accessibility Audit",
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
    )
}

fn technique_list(prefix: &str, technology: &str, count: usize) -> serde_json::Value {
    (1..=count)
        .map(|n| json!({ "id": format!("{prefix}{n}"), "technology": technology, "title": format!("technique {n}") }))
        .collect()
}

fn crowded_dataset() -> Dataset {
    Dataset::from_json_value(json!({
        "principles": [{
            "id": "robust",
            "num": "4",
            "handle": "Robust",
            "guidelines": [{
                "id": "compatible",
                "num": "4.1",
                "handle": "Compatible",
                "successcriteria": [{
                    "id": "name-role-value",
                    "num": "4.1.2",
                    "handle": "Name, Role, Value",
                    "level": "A",
                    "techniques": {
                        "sufficient": technique_list("S", "html", 7),
                        "advisory": technique_list("V", "general", 4),
                        "failure": technique_list("F", "failures", 4)
                    }
                }]
            }]
        }]
    }))
    .unwrap()
}

#[test]
fn criterion_report_has_one_section_per_principle() {
    let options = ScheduleOptions::default();
    let items = build_criterion_schedule(&sample_dataset(), &options.levels);
    let report = criterion_markdown(&items, &options, &metadata());

    assert!(report.starts_with("# Accessibility Audit (WCAG 2.2): By Success Criterion"));
    assert!(report.contains("Generated: 2025-03-14"));
    assert_eq!(report.matches("\n## 1 Perceivable\n").count(), 1);
    assert_eq!(report.matches("\n## 2 Operable\n").count(), 1);
    assert_eq!(report.matches("\n### 1.4 Distinguishable\n").count(), 1);
    assert!(report.contains("#### 1.1.1 Non-text Content (Level A)"));
    assert!(report.contains("- Estimated time: 1.7 hours (100 minutes)"));
    assert!(report.contains(
        "- [H37](https://www.w3.org/WAI/WCAG22/Techniques/html/H37): Using alt attributes on img elements"
    ));
    assert!(report.contains("**Tester abilities:** sight, hearing"));
    assert!(report.contains("1. Review success criterion 1.1.1 Non-text Content and its intent"));
    assert!(report.contains("   - H37: Using alt attributes on img elements"));
    assert!(!report.contains("Contrast (Enhanced)"));
}

#[test]
fn long_technique_lists_are_truncated() {
    let options = ScheduleOptions::with_levels(LevelFilter::all());
    let items = build_criterion_schedule(&crowded_dataset(), &options.levels);
    let report = criterion_markdown(&items, &options, &metadata());

    assert!(report.contains("): technique 5\n- ...and 2 more"));
    assert!(!report.contains("[S6]"));
    assert!(report.contains("[V3]"));
    assert!(report.contains("- ...and 1 more"));
    assert!(report.contains("[F4]"));
}

#[test]
fn excluded_technique_kinds_are_left_out_of_the_report() {
    let mut options = ScheduleOptions::default();
    options.include_advisory = false;
    options.include_failures = false;
    let items = build_criterion_schedule(&crowded_dataset(), &options.levels);
    let report = criterion_markdown(&items, &options, &metadata());

    assert!(!report.contains("**Advisory techniques:**"));
    assert!(!report.contains("**Common failures:**"));
    assert!(!report.contains("- Advisory techniques:"));
    assert!(report.contains("**Sufficient techniques:**"));
    // Time estimates always count every technique kind.
    assert!(report.contains("**Estimated time:** 65 minutes"));
}

#[test]
fn component_report_lists_categories_and_instructions() {
    let options = ScheduleOptions::default();
    let categories = build_component_schedule(&sample_dataset(), &options.levels);
    let report = component_markdown(&categories, &options, &metadata());

    assert!(report.starts_with("# Accessibility Audit (WCAG 2.2): By Component"));
    assert_eq!(report.matches("\n## Images & Graphics\n").count(), 1);
    assert!(report.contains("### Images (`img`)"));
    assert!(report.contains("#### H37: Using alt attributes on img elements"));
    assert!(report.contains("1. Locate all img elements on the page"));
}

#[test]
fn statistics_respect_technique_options() {
    let dataset = sample_dataset();
    let mut options = ScheduleOptions::default();
    let items = build_criterion_schedule(&dataset, &options.levels);

    let stats = CriterionStatistics::compute(&items, &options);
    assert_eq!(stats.total_criteria, 6);
    assert_eq!((stats.level_a, stats.level_aa, stats.level_aaa), (4, 2, 0));
    assert_eq!(stats.sufficient_techniques, 7);
    assert_eq!(stats.advisory_techniques, 1);
    assert_eq!(stats.failure_techniques, 1);
    assert_eq!(stats.estimated_minutes, 100);
    assert_eq!(stats.estimated_hours, 1.7);
    assert_eq!(
        (stats.requires_sight, stats.requires_hearing, stats.requires_motor),
        (4, 1, 2)
    );

    options.include_advisory = false;
    let stats = CriterionStatistics::compute(&items, &options);
    assert_eq!(stats.advisory_techniques, 0);
    assert_eq!(stats.failure_techniques, 1);

    let components = ComponentStatistics::compute(&build_component_schedule(&dataset, &options.levels));
    assert_eq!(components.total_categories, 5);
    assert_eq!(components.total_techniques, 7);
    assert_eq!(components.estimated_minutes, 35);
}

#[test]
fn json_output_reads_back_identically() {
    let dataset = sample_dataset();
    let options = ScheduleOptions::default();
    let items = build_criterion_schedule(&dataset, &options.levels);
    let categories = build_component_schedule(&dataset, &options.levels);

    let json = render_criterion_schedule(&items, &options, &metadata(), OutputFormat::Json).unwrap();
    assert!(json.contains("\"scNumber\": \"1.1.1\""));
    assert_eq!(criterion_schedule_from_json(&json).unwrap(), items);

    let json =
        render_component_schedule(&categories, &options, &metadata(), OutputFormat::Json).unwrap();
    assert!(json.contains("\"relatedSC\""));
    assert_eq!(component_schedule_from_json(&json).unwrap(), categories);
}

#[test]
fn output_format_parses_names_and_extensions() {
    assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("html".parse::<OutputFormat>().is_err());
    assert_eq!(OutputFormat::Markdown.file_extension(), "md");
}
