use serde_json::json;
use wcag_schedule::{
    Dataset, Level, LevelFilter, ScheduleOptions, build_component_schedule,
    build_criterion_schedule, criteria::estimate_minutes,
};

fn sample_dataset() -> Dataset {
    Dataset::from_json_str(include_str!("fixtures/wcag_sample.json")).unwrap()
}

fn single_criterion(level: &str, techniques: serde_json::Value) -> Dataset {
    Dataset::from_json_value(json!({
        "principles": [{
            "id": "perceivable",
            "num": "1",
            "handle": "Perceivable",
            "guidelines": [{
                "id": "text-alternatives",
                "num": "1.1",
                "handle": "Text Alternatives",
                "successcriteria": [{
                    "id": "non-text-content",
                    "num": "1.1.1",
                    "handle": "Non-text Content",
                    "level": level,
                    "techniques": techniques
                }]
            }]
        }]
    }))
    .unwrap()
}

#[test]
fn single_level_a_criterion_is_scheduled() {
    let dataset = single_criterion(
        "A",
        json!({
            "sufficient": [
                { "id": "H37", "technology": "html", "title": "img alt text" },
                { "id": "H86", "technology": "html", "title": "img alt text" }
            ]
        }),
    );

    let items = build_criterion_schedule(&dataset, &LevelFilter::new([Level::A]));
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.sc_number, "1.1.1");
    assert_eq!(item.principle, "1 Perceivable");
    assert_eq!(item.guideline, "1.1 Text Alternatives");
    assert_eq!(item.sufficient_techniques.len(), 2);
    assert_eq!(item.estimated_time, 20);
    assert!(item.requires_sight);
    assert!(!item.requires_hearing);
    assert!(!item.requires_motor);
    assert_eq!(item.components_to_test, vec!["Images".to_string()]);
    assert_eq!(
        item.understanding_url,
        "https://www.w3.org/WAI/WCAG22/Understanding/non-text-content"
    );
    assert_eq!(
        item.sufficient_techniques[0].url,
        "https://www.w3.org/WAI/WCAG22/Techniques/html/H37"
    );
}

#[test]
fn excluded_levels_produce_an_empty_schedule() {
    let dataset = single_criterion(
        "AAA",
        json!({ "sufficient": [{ "id": "G17", "technology": "general", "title": "Contrast" }] }),
    );
    assert!(build_criterion_schedule(&dataset, &LevelFilter::default()).is_empty());
    assert_eq!(build_criterion_schedule(&dataset, &LevelFilter::all()).len(), 1);
}

#[test]
fn criteria_without_a_level_are_never_scheduled() {
    let dataset = single_criterion("", json!({ "sufficient": [] }));
    assert!(build_criterion_schedule(&dataset, &LevelFilter::all()).is_empty());
}

#[test]
fn duplicate_sufficient_techniques_across_groups_are_kept_once() {
    let dataset = single_criterion(
        "A",
        json!({
            "sufficient": [
                { "title": "Situation A", "techniques": [
                    { "id": "T1", "technology": "html", "title": "first" },
                    { "id": "T2", "technology": "html", "title": "second" }
                ]},
                { "title": "Situation B", "techniques": [
                    { "id": "T1", "technology": "html", "title": "first again" }
                ]}
            ],
            "advisory": [{ "id": "T3", "technology": "css", "title": "advice" }],
            "failure": [{ "id": "F1", "technology": "failures", "title": "failure" }]
        }),
    );

    let items = build_criterion_schedule(&dataset, &LevelFilter::default());
    let item = &items[0];
    let ids: Vec<&str> = item
        .sufficient_techniques
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["T1", "T2"]);
    assert_eq!(item.sufficient_techniques[0].title, "first");
    assert_eq!(item.estimated_time, 23);
    assert_eq!(
        item.failure_techniques[0].url,
        "https://www.w3.org/WAI/WCAG22/Techniques/failures/F1"
    );
}

#[test]
fn incomplete_technique_records_are_skipped() {
    let dataset = single_criterion(
        "A",
        json!({
            "sufficient": [
                { "id": "G196", "technology": "general" },
                { "id": "G94", "technology": "general", "title": "Short text alternative" }
            ],
            "advisory": [{ "title": "Untitled advice" }]
        }),
    );
    let item = &build_criterion_schedule(&dataset, &LevelFilter::default())[0];
    assert_eq!(item.sufficient_techniques.len(), 1);
    assert!(item.advisory_techniques.is_empty());
    assert_eq!(item.estimated_time, estimate_minutes(1, 0, 0));
}

#[test]
fn schedule_is_sorted_numerically_and_stable() {
    let dataset = sample_dataset();
    let items = build_criterion_schedule(&dataset, &LevelFilter::default());
    let numbers: Vec<&str> = items.iter().map(|i| i.sc_number.as_str()).collect();
    assert_eq!(
        numbers,
        vec!["1.1.1", "1.2.2", "1.4.3", "1.4.10", "2.1.1", "2.4.4"]
    );

    let again = build_criterion_schedule(&dataset, &LevelFilter::default());
    assert_eq!(items, again);
}

#[test]
fn sample_criteria_carry_sensory_flags_and_plain_descriptions() {
    let items = build_criterion_schedule(&sample_dataset(), &LevelFilter::all());
    assert_eq!(items.len(), 7);

    let captions = items.iter().find(|i| i.id == "captions-prerecorded").unwrap();
    assert!(captions.requires_sight);
    assert!(captions.requires_hearing);
    assert_eq!(captions.components_to_test, vec!["Media".to_string()]);

    let keyboard = items.iter().find(|i| i.id == "keyboard").unwrap();
    assert!(keyboard.requires_motor);
    assert!(!keyboard.requires_sight);

    let non_text = items.iter().find(|i| i.id == "non-text-content").unwrap();
    assert_eq!(
        non_text.description,
        "All non-text content has a text alternative & serves the equivalent purpose."
    );
    assert_eq!(non_text.estimated_time, 25);
}

#[test]
fn testing_steps_list_techniques_and_failures() {
    let items = build_criterion_schedule(&sample_dataset(), &LevelFilter::default());
    let steps = &items[0].testing_steps;
    assert!(steps[0].contains("1.1.1 Non-text Content"));
    assert!(steps.contains(&"  - H37: Using alt attributes on img elements".to_string()));
    assert!(steps.iter().any(|s| s.starts_with("  - F65:")));
    assert_eq!(
        steps.last().map(String::as_str),
        Some("Record the assistive technology and browser used for testing")
    );
}

#[test]
fn options_file_levels_never_admit_levelless_criteria() {
    let dataset = Dataset::from_json_value(json!({
        "principles": [{
            "id": "robust",
            "num": "4",
            "handle": "Robust",
            "guidelines": [{
                "id": "compatible",
                "num": "4.1",
                "handle": "Compatible",
                "successcriteria": [
                    { "id": "parsing", "num": "4.1.1", "handle": "Parsing", "level": "" },
                    { "id": "status-messages", "num": "4.1.3", "handle": "Status Messages", "level": "AA" }
                ]
            }]
        }]
    }))
    .unwrap();

    let options: ScheduleOptions = serde_json::from_str(r#"{ "levels": ["A", "aa"] }"#).unwrap();
    let items = build_criterion_schedule(&dataset, &options.levels);
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["status-messages"]);
    assert!(build_component_schedule(&dataset, &options.levels).is_empty());
}
