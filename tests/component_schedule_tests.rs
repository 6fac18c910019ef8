use serde_json::json;
use wcag_schedule::{Dataset, Level, LevelFilter, build_component_schedule};

fn sample_dataset() -> Dataset {
    Dataset::from_json_str(include_str!("fixtures/wcag_sample.json")).unwrap()
}

fn criterion(id: &str, num: &str, sufficient: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "num": num,
        "handle": id,
        "level": "A",
        "techniques": { "sufficient": sufficient }
    })
}

fn dataset_with(criteria: Vec<serde_json::Value>) -> Dataset {
    Dataset::from_json_value(json!({
        "principles": [{
            "id": "perceivable",
            "num": "1",
            "handle": "Perceivable",
            "guidelines": [{
                "id": "text-alternatives",
                "num": "1.1",
                "handle": "Text Alternatives",
                "successcriteria": criteria
            }]
        }]
    }))
    .unwrap()
}

#[test]
fn image_techniques_merge_into_one_component() {
    let dataset = dataset_with(vec![criterion(
        "non-text-content",
        "1.1.1",
        json!([
            { "id": "H37", "technology": "html", "title": "img alt text" },
            { "id": "H86", "technology": "html", "title": "img alt text" }
        ]),
    )]);

    let categories = build_component_schedule(&dataset, &LevelFilter::new([Level::A]));
    assert_eq!(categories.len(), 1);
    let category = &categories[0];
    assert_eq!(category.name, "Images & Graphics");
    assert_eq!(category.components.len(), 1);

    let component = &category.components[0];
    assert_eq!(component.id, "Images_img");
    assert_eq!(component.component, "Images");
    assert_eq!(component.html_element.as_deref(), Some("img"));
    assert_eq!(component.techniques.len(), 2);
    assert_eq!(component.estimated_time, 10);
    assert_eq!(category.total_time, 10);
}

#[test]
fn shared_technique_lists_every_citing_criterion() {
    let dataset = dataset_with(vec![
        criterion(
            "non-text-content",
            "1.1.1",
            json!([{ "id": "H37", "technology": "html", "title": "Using alt attributes on img elements" }]),
        ),
        criterion(
            "images-of-text",
            "1.4.5",
            json!([{ "id": "H37", "technology": "html", "title": "Using alt attributes on img elements" }]),
        ),
    ]);

    let categories = build_component_schedule(&dataset, &LevelFilter::default());
    let component = &categories[0].components[0];
    assert_eq!(component.techniques.len(), 1);
    let related: Vec<&str> = component.techniques[0]
        .related_sc
        .iter()
        .map(|sc| sc.sc_number.as_str())
        .collect();
    assert_eq!(related, vec!["1.1.1", "1.4.5"]);
    assert_eq!(component.estimated_time, 5);
}

#[test]
fn technique_listed_in_two_groups_repeats_the_criterion() {
    let dataset = dataset_with(vec![criterion(
        "non-text-content",
        "1.1.1",
        json!([
            { "techniques": [{ "id": "H37", "technology": "html", "title": "Using alt attributes on img elements" }] },
            { "techniques": [{ "id": "H37", "technology": "html", "title": "Using alt attributes on img elements" }] }
        ]),
    )]);

    let categories = build_component_schedule(&dataset, &LevelFilter::default());
    let entry = &categories[0].components[0].techniques[0];
    assert_eq!(entry.related_sc.len(), 2);
    assert!(entry.related_sc.iter().all(|sc| sc.id == "non-text-content"));
}

#[test]
fn unmatched_titles_fall_back_to_general_content() {
    let dataset = dataset_with(vec![criterion(
        "reflow",
        "1.4.10",
        json!([{ "id": "C32", "technology": "css", "title": "Using CSS to reflow columns" }]),
    )]);

    let categories = build_component_schedule(&dataset, &LevelFilter::default());
    let component = &categories[0].components[0];
    assert_eq!(categories[0].name, "General Content");
    assert_eq!(component.id, "General Content_general");
    assert_eq!(component.html_element, None);
    assert_eq!(
        component.techniques[0].testing_instructions[1],
        "1. Locate all General Content elements on the page"
    );
}

#[test]
fn sample_categories_are_sorted_and_totals_add_up() {
    let categories = build_component_schedule(&sample_dataset(), &LevelFilter::default());
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "General Content",
            "Images & Graphics",
            "Keyboard & Focus",
            "Links & Navigation",
            "Visual Presentation",
        ]
    );

    for category in &categories {
        for component in &category.components {
            assert_eq!(component.estimated_time, component.techniques.len() as u32 * 5);
            assert_eq!(component.category, category.name);
        }
        let sum: u32 = category.components.iter().map(|c| c.estimated_time).sum();
        assert_eq!(category.total_time, sum);
    }

    let images = &categories[1].components[0];
    let h37 = images
        .techniques
        .iter()
        .find(|t| t.technique_id == "H37")
        .unwrap();
    assert_eq!(h37.related_sc.len(), 2);
    assert_eq!(images.techniques.len(), 2);
}

#[test]
fn level_filter_controls_included_techniques() {
    let dataset = sample_dataset();
    let default = build_component_schedule(&dataset, &LevelFilter::default());
    let all = build_component_schedule(&dataset, &LevelFilter::all());

    let visual = |categories: &[wcag_schedule::ComponentCategory]| {
        categories
            .iter()
            .find(|c| c.name == "Visual Presentation")
            .map(|c| c.total_time)
            .unwrap()
    };
    assert_eq!(visual(&default), 5);
    assert_eq!(visual(&all), 10);

    let only_aaa = build_component_schedule(&dataset, &LevelFilter::new([Level::AAA]));
    assert_eq!(only_aaa.len(), 1);
    assert_eq!(only_aaa[0].components[0].techniques[0].technique_id, "G17");
}
