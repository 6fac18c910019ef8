use crate::components::ComponentCategory;
use crate::criteria::CriterionScheduleItem;
use crate::level::Level;
use crate::metadata::ReportMetadata;
use crate::options::ScheduleOptions;
use crate::stats::{ComponentStatistics, CriterionStatistics};
use crate::techniques::TechniqueReference;

const SUFFICIENT_LIMIT: usize = 5;
const ADVISORY_LIMIT: usize = 3;

/// Renders the criterion schedule as a Markdown report.
///
/// A `##` section opens whenever the principle string differs from the
/// previous item's, and a `###` section whenever the guideline string does.
pub fn criterion_markdown(
    items: &[CriterionScheduleItem],
    options: &ScheduleOptions,
    metadata: &ReportMetadata,
) -> String {
    let stats = CriterionStatistics::compute(items, options);
    let mut output = String::new();

    output.push_str(&format!(
        "# {} (WCAG {}): By Success Criterion\n\n",
        metadata.title, metadata.wcag_version
    ));
    output.push_str(&format!("Generated: {}\n", metadata.generated_on));
    output.push_str(&format!("Levels: {}\n\n", options.levels));

    output.push_str("## Summary\n\n");
    output.push_str(&format!("- Success criteria: {}\n", stats.total_criteria));
    for level in Level::ALL {
        if options.levels.contains(level) {
            output.push_str(&format!("- Level {}: {}\n", level, stats.count_for(level)));
        }
    }
    output.push_str(&format!(
        "- Sufficient techniques: {}\n",
        stats.sufficient_techniques
    ));
    if options.include_advisory {
        output.push_str(&format!("- Advisory techniques: {}\n", stats.advisory_techniques));
    }
    if options.include_failures {
        output.push_str(&format!("- Failures: {}\n", stats.failure_techniques));
    }
    output.push_str(&format!(
        "- Estimated time: {} hours ({} minutes)\n\n",
        stats.estimated_hours, stats.estimated_minutes
    ));

    let mut current_principle: Option<&str> = None;
    let mut current_guideline: Option<&str> = None;

    for item in items {
        if current_principle != Some(item.principle.as_str()) {
            output.push_str("---\n\n");
            output.push_str(&format!("## {}\n\n", item.principle));
            current_principle = Some(item.principle.as_str());
            current_guideline = None;
        }
        if current_guideline != Some(item.guideline.as_str()) {
            output.push_str(&format!("### {}\n\n", item.guideline));
            current_guideline = Some(item.guideline.as_str());
        }
        push_criterion(&mut output, item, options);
    }

    output
}

fn push_criterion(output: &mut String, item: &CriterionScheduleItem, options: &ScheduleOptions) {
    output.push_str(&format!(
        "#### {} {} (Level {})\n\n",
        item.sc_number, item.title, item.level
    ));
    output.push_str(&format!("**Estimated time:** {} minutes\n", item.estimated_time));

    let mut needs = Vec::new();
    if item.requires_sight {
        needs.push("sight");
    }
    if item.requires_hearing {
        needs.push("hearing");
    }
    if item.requires_motor {
        needs.push("motor");
    }
    if !needs.is_empty() {
        output.push_str(&format!("**Tester abilities:** {}\n", needs.join(", ")));
    }
    output.push_str(&format!("**Understanding:** {}\n\n", item.understanding_url));

    if !item.description.is_empty() {
        output.push_str(&format!("{}\n\n", item.description));
    }

    if !item.components_to_test.is_empty() {
        output.push_str(&format!(
            "**Components to test:** {}\n\n",
            item.components_to_test.join(", ")
        ));
    }

    push_techniques(
        output,
        "Sufficient techniques",
        &item.sufficient_techniques,
        Some(SUFFICIENT_LIMIT),
    );
    if options.include_advisory {
        push_techniques(
            output,
            "Advisory techniques",
            &item.advisory_techniques,
            Some(ADVISORY_LIMIT),
        );
    }
    if options.include_failures {
        push_techniques(output, "Common failures", &item.failure_techniques, None);
    }

    output.push_str("**Testing steps:**\n\n```\n");
    let mut number = 0;
    for step in &item.testing_steps {
        // Technique sub-items stay indented under the preceding step.
        if step.starts_with("  ") {
            output.push_str(&format!("   {}\n", step.trim_start()));
        } else {
            number += 1;
            output.push_str(&format!("{}. {}\n", number, step));
        }
    }
    output.push_str("```\n\n");
}

fn push_techniques(
    output: &mut String,
    heading: &str,
    techniques: &[TechniqueReference],
    limit: Option<usize>,
) {
    if techniques.is_empty() {
        return;
    }
    output.push_str(&format!("**{}:**\n\n", heading));
    let shown = limit.unwrap_or(techniques.len()).min(techniques.len());
    for technique in &techniques[..shown] {
        output.push_str(&format!(
            "- [{}]({}): {}\n",
            technique.id, technique.url, technique.title
        ));
    }
    if shown < techniques.len() {
        output.push_str(&format!("- ...and {} more\n", techniques.len() - shown));
    }
    output.push('\n');
}

/// Renders the component schedule as a Markdown report, one `##` section per
/// category and one `###` section per component.
pub fn component_markdown(
    categories: &[ComponentCategory],
    options: &ScheduleOptions,
    metadata: &ReportMetadata,
) -> String {
    let stats = ComponentStatistics::compute(categories);
    let mut output = String::new();

    output.push_str(&format!(
        "# {} (WCAG {}): By Component\n\n",
        metadata.title, metadata.wcag_version
    ));
    output.push_str(&format!("Generated: {}\n", metadata.generated_on));
    output.push_str(&format!("Levels: {}\n\n", options.levels));

    output.push_str("## Summary\n\n");
    output.push_str(&format!("- Categories: {}\n", stats.total_categories));
    output.push_str(&format!("- Components: {}\n", stats.total_components));
    output.push_str(&format!("- Techniques: {}\n", stats.total_techniques));
    output.push_str(&format!(
        "- Estimated time: {} hours ({} minutes)\n\n",
        stats.estimated_hours, stats.estimated_minutes
    ));

    for category in categories {
        output.push_str("---\n\n");
        output.push_str(&format!("## {}\n\n", category.name));
        output.push_str(&format!("{}\n\n", category.description));
        output.push_str(&format!(
            "**Total time:** {} minutes\n\n",
            category.total_time
        ));

        for component in &category.components {
            match &component.html_element {
                Some(element) => output.push_str(&format!(
                    "### {} (`{}`)\n\n",
                    component.component, element
                )),
                None => output.push_str(&format!("### {}\n\n", component.component)),
            }
            output.push_str(&format!(
                "**Estimated time:** {} minutes ({} techniques)\n\n",
                component.estimated_time,
                component.techniques.len()
            ));

            for technique in &component.techniques {
                output.push_str(&format!(
                    "#### {}: {}\n\n",
                    technique.technique_id, technique.title
                ));
                let related = technique
                    .related_sc
                    .iter()
                    .map(|sc| format!("{} {} ({})", sc.sc_number, sc.title, sc.level))
                    .collect::<Vec<_>>()
                    .join(", ");
                output.push_str(&format!("**Related criteria:** {}\n\n", related));
                output.push_str("```\n");
                for line in &technique.testing_instructions {
                    output.push_str(line);
                    output.push('\n');
                }
                output.push_str("```\n\n");
            }
        }
    }

    output
}
