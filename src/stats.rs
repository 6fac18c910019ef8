//! Summary counts over either schedule.

use crate::components::ComponentCategory;
use crate::criteria::CriterionScheduleItem;
use crate::level::Level;
use crate::options::ScheduleOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionStatistics {
    pub total_criteria: usize,
    pub level_a: usize,
    pub level_aa: usize,
    pub level_aaa: usize,
    pub sufficient_techniques: usize,
    pub advisory_techniques: usize,
    pub failure_techniques: usize,
    pub estimated_minutes: u32,
    pub estimated_hours: f64,
    pub requires_sight: usize,
    pub requires_hearing: usize,
    pub requires_motor: usize,
}

impl CriterionStatistics {
    /// Advisory and failure counts honour the option flags.
    pub fn compute(items: &[CriterionScheduleItem], options: &ScheduleOptions) -> Self {
        let mut stats = Self {
            total_criteria: items.len(),
            ..Self::default()
        };
        for item in items {
            match item.level {
                Level::A => stats.level_a += 1,
                Level::AA => stats.level_aa += 1,
                Level::AAA => stats.level_aaa += 1,
                Level::Unspecified => {}
            }
            stats.sufficient_techniques += item.sufficient_techniques.len();
            if options.include_advisory {
                stats.advisory_techniques += item.advisory_techniques.len();
            }
            if options.include_failures {
                stats.failure_techniques += item.failure_techniques.len();
            }
            stats.estimated_minutes += item.estimated_time;
            stats.requires_sight += usize::from(item.requires_sight);
            stats.requires_hearing += usize::from(item.requires_hearing);
            stats.requires_motor += usize::from(item.requires_motor);
        }
        stats.estimated_hours = minutes_to_hours(stats.estimated_minutes);
        stats
    }

    pub fn count_for(&self, level: Level) -> usize {
        match level {
            Level::A => self.level_a,
            Level::AA => self.level_aa,
            Level::AAA => self.level_aaa,
            Level::Unspecified => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub components: usize,
    pub techniques: usize,
    pub minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatistics {
    pub total_categories: usize,
    pub total_components: usize,
    pub total_techniques: usize,
    pub estimated_minutes: u32,
    pub estimated_hours: f64,
    pub categories: Vec<CategoryBreakdown>,
}

impl ComponentStatistics {
    pub fn compute(categories: &[ComponentCategory]) -> Self {
        let breakdown: Vec<CategoryBreakdown> = categories
            .iter()
            .map(|category| CategoryBreakdown {
                name: category.name.clone(),
                components: category.components.len(),
                techniques: category
                    .components
                    .iter()
                    .map(|component| component.techniques.len())
                    .sum(),
                minutes: category.total_time,
            })
            .collect();
        let estimated_minutes = breakdown.iter().map(|c| c.minutes).sum();
        Self {
            total_categories: breakdown.len(),
            total_components: breakdown.iter().map(|c| c.components).sum(),
            total_techniques: breakdown.iter().map(|c| c.techniques).sum(),
            estimated_minutes,
            estimated_hours: minutes_to_hours(estimated_minutes),
            categories: breakdown,
        }
    }
}

/// Hours rounded to one decimal place.
pub fn minutes_to_hours(minutes: u32) -> f64 {
    (f64::from(minutes) / 60.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_round_to_one_decimal() {
        assert_eq!(minutes_to_hours(0), 0.0);
        assert_eq!(minutes_to_hours(90), 1.5);
        assert_eq!(minutes_to_hours(100), 1.7);
    }
}
