//! Component schedule builder.
//!
//! Every sufficient technique of every filtered criterion is classified and
//! merged into one [`ComponentScheduleItem`] per component/element key. A
//! technique cited by several criteria becomes a single [`TechniqueEntry`]
//! whose `related_sc` lists each citing criterion. Components are then
//! grouped into the fixed categories of [`CATEGORY_TABLE`].
//!
//! Unlike the criterion schedule, sufficient records are not deduplicated
//! across groups here: a technique listed in two groups of the same criterion
//! records that criterion twice in `related_sc`.

use crate::classifier::{ComponentClass, classify};
use crate::dataset::{CriterionContext, Dataset};
use crate::level::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub const MINUTES_PER_TECHNIQUE: u32 = 5;
pub const OTHER_CATEGORY: &str = "Other";
const OTHER_CATEGORY_DESCRIPTION: &str = "Other testing requirements";

pub struct CategoryDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub components: &'static [&'static str],
}

pub const CATEGORY_TABLE: &[CategoryDefinition] = &[
    CategoryDefinition {
        name: "Images & Graphics",
        description: "Images, icons and other non-text content",
        components: &["Images"],
    },
    CategoryDefinition {
        name: "Forms & Controls",
        description: "Form inputs, labels and interactive controls",
        components: &["Form Inputs", "Buttons"],
    },
    CategoryDefinition {
        name: "Links & Navigation",
        description: "Links, menus and navigation mechanisms",
        components: &["Links", "Navigation"],
    },
    CategoryDefinition {
        name: "Structure & Semantics",
        description: "Headings, lists, tables and document structure",
        components: &["Headings", "Lists", "Tables"],
    },
    CategoryDefinition {
        name: "Multimedia",
        description: "Video, audio and time-based media",
        components: &["Media Elements"],
    },
    CategoryDefinition {
        name: "ARIA & Custom Widgets",
        description: "ARIA roles, states, properties and custom components",
        components: &["ARIA Components"],
    },
    CategoryDefinition {
        name: "Visual Presentation",
        description: "Color, contrast, text sizing and typography",
        components: &["Color & Contrast", "Text & Typography"],
    },
    CategoryDefinition {
        name: "Keyboard & Focus",
        description: "Keyboard operation and focus management",
        components: &["Keyboard & Focus"],
    },
    CategoryDefinition {
        name: "General Content",
        description: "Page-wide content requirements",
        components: &["General Content"],
    },
];

/// Category name and description for a component.
pub fn category_for(component: &str) -> (&'static str, &'static str) {
    CATEGORY_TABLE
        .iter()
        .find(|category| category.components.contains(&component))
        .map(|category| (category.name, category.description))
        .unwrap_or((OTHER_CATEGORY, OTHER_CATEGORY_DESCRIPTION))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedCriterion {
    pub id: String,
    pub sc_number: String,
    pub title: String,
    pub level: Level,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueEntry {
    pub technique_id: String,
    pub technology: String,
    pub title: String,
    #[serde(rename = "relatedSC")]
    pub related_sc: Vec<RelatedCriterion>,
    pub testing_instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScheduleItem {
    pub id: String,
    pub component: String,
    pub html_element: Option<String>,
    pub category: String,
    pub techniques: Vec<TechniqueEntry>,
    pub estimated_time: u32,
}

impl ComponentScheduleItem {
    fn new(id: String, class: &ComponentClass) -> Self {
        let (category, _) = category_for(&class.component);
        Self {
            id,
            component: class.component.clone(),
            html_element: class.html_element.clone(),
            category: category.to_string(),
            techniques: Vec::new(),
            estimated_time: 0,
        }
    }

    fn upsert_technique(
        &mut self,
        id: &str,
        technology: &str,
        title: &str,
        class: &ComponentClass,
        related: RelatedCriterion,
    ) {
        match self.techniques.iter_mut().find(|t| t.technique_id == id) {
            Some(entry) => entry.related_sc.push(related),
            None => self.techniques.push(TechniqueEntry {
                technique_id: id.to_string(),
                technology: technology.to_string(),
                title: title.to_string(),
                related_sc: vec![related],
                testing_instructions: testing_instructions(id, title, class),
            }),
        }
    }

    pub fn expected_time(&self) -> u32 {
        self.techniques.len() as u32 * MINUTES_PER_TECHNIQUE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCategory {
    pub name: String,
    pub description: String,
    pub components: Vec<ComponentScheduleItem>,
    pub total_time: u32,
}

impl ComponentCategory {
    pub fn expected_total(&self) -> u32 {
        self.components.iter().map(|c| c.estimated_time).sum()
    }
}

/// Fixed testing instructions for one technique.
pub fn testing_instructions(id: &str, title: &str, class: &ComponentClass) -> Vec<String> {
    let target = class.target();
    vec![
        format!("Technique {id}: {title}"),
        format!("1. Locate all {target} elements on the page"),
        format!("2. Verify each {target} implements {id} as described"),
        "3. Test keyboard access and operation".to_string(),
        "4. Test with a screen reader or other assistive technology".to_string(),
        "5. Document findings, including any failures".to_string(),
    ]
}

/// Insertion-ordered map of component items keyed by merge key.
#[derive(Default)]
struct ComponentIndex {
    items: Vec<ComponentScheduleItem>,
    positions: HashMap<String, usize>,
}

impl ComponentIndex {
    fn entry(&mut self, class: &ComponentClass) -> &mut ComponentScheduleItem {
        let key = class.merge_key();
        let idx = match self.positions.get(&key) {
            Some(idx) => *idx,
            None => {
                self.items.push(ComponentScheduleItem::new(key.clone(), class));
                self.positions.insert(key, self.items.len() - 1);
                self.items.len() - 1
            }
        };
        &mut self.items[idx]
    }

    fn add_criterion(&mut self, ctx: CriterionContext<'_>) {
        let Some(techniques) = ctx.criterion.techniques.as_ref() else {
            return;
        };
        for record in techniques.sufficient_records() {
            let Some((id, technology, title)) = record.complete() else {
                continue;
            };
            let class = classify(id, title);
            let related = RelatedCriterion {
                id: ctx.criterion.id.clone(),
                sc_number: ctx.criterion.num.clone(),
                title: ctx.criterion.handle.clone(),
                level: ctx.criterion.level,
            };
            self.entry(&class)
                .upsert_technique(id, technology, title, &class, related);
        }
    }
}

/// Builds the component schedule for criteria whose level passes the filter.
/// Categories are sorted by name; components keep first-seen order.
pub fn build_component_schedule(dataset: &Dataset, levels: &LevelFilter) -> Vec<ComponentCategory> {
    let mut index = ComponentIndex::default();
    for ctx in dataset
        .criteria()
        .filter(|ctx| levels.contains(ctx.criterion.level))
    {
        index.add_criterion(ctx);
    }

    let mut categories: Vec<ComponentCategory> = Vec::new();
    for mut item in index.items {
        item.estimated_time = item.expected_time();
        let position = match categories.iter().position(|c| c.name == item.category) {
            Some(position) => position,
            None => {
                let (name, description) = category_for(&item.component);
                categories.push(ComponentCategory {
                    name: name.to_string(),
                    description: description.to_string(),
                    components: Vec::new(),
                    total_time: 0,
                });
                categories.len() - 1
            }
        };
        let category = &mut categories[position];
        category.total_time += item.estimated_time;
        category.components.push(item);
    }

    categories.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(
        "Built {} component categories for levels {}",
        categories.len(),
        levels
    );
    categories
}
