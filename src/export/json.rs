use crate::components::ComponentCategory;
use crate::criteria::CriterionScheduleItem;

pub fn criterion_schedule_to_json(items: &[CriterionScheduleItem]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(items)
}

pub fn criterion_schedule_from_json(input: &str) -> serde_json::Result<Vec<CriterionScheduleItem>> {
    serde_json::from_str(input)
}

pub fn component_schedule_to_json(categories: &[ComponentCategory]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(categories)
}

pub fn component_schedule_from_json(input: &str) -> serde_json::Result<Vec<ComponentCategory>> {
    serde_json::from_str(input)
}
