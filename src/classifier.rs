//! Component classifier.
//!
//! Maps technique records to the UI component they are tested against. Both
//! rule tables are evaluated top to bottom and matched against the
//! lower-cased title; [`classify`] stops at the first match, while
//! [`components_to_test`] collects every match.

use crate::techniques::TechniqueReference;
use serde::{Deserialize, Serialize};

pub const GENERAL_CONTENT: &str = "General Content";

/// Result of classifying one technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentClass {
    pub component: String,
    pub html_element: Option<String>,
}

impl ComponentClass {
    fn new(component: &str, html_element: Option<&str>) -> Self {
        Self {
            component: component.to_string(),
            html_element: html_element.map(str::to_string),
        }
    }

    /// Key under which techniques for this component are merged.
    pub fn merge_key(&self) -> String {
        format!(
            "{}_{}",
            self.component,
            self.html_element.as_deref().unwrap_or("general")
        )
    }

    /// Element name when known, otherwise the component name.
    pub fn target(&self) -> &str {
        self.html_element.as_deref().unwrap_or(&self.component)
    }
}

struct Technique<'a> {
    id: &'a str,
    title: String,
}

impl<'a> Technique<'a> {
    fn new(id: &'a str, title: &str) -> Self {
        Self {
            id,
            title: title.to_lowercase(),
        }
    }

    fn title_has_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.title.contains(needle))
    }

    fn id_starts_with(&self, prefix: &str) -> bool {
        self.id.to_ascii_uppercase().starts_with(prefix)
    }
}

struct ClassificationRule {
    matches: fn(&Technique<'_>) -> bool,
    component: &'static str,
    html_element: Option<&'static str>,
}

const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        matches: |t| t.title_has_any(&["image", "alt"]),
        component: "Images",
        html_element: Some("img"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["input", "label", "form control"]),
        component: "Form Inputs",
        html_element: Some("input"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["select", "dropdown"]),
        component: "Form Inputs",
        html_element: Some("select"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["textarea"]),
        component: "Form Inputs",
        html_element: Some("textarea"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["link", "anchor"]) || t.id.contains("H30"),
        component: "Links",
        html_element: Some("a"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["button"]),
        component: "Buttons",
        html_element: Some("button"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["heading"]),
        component: "Headings",
        html_element: Some("h1-h6"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["table"]),
        component: "Tables",
        html_element: Some("table"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["video", "audio", "media"]),
        component: "Media Elements",
        html_element: Some("video/audio"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["list"]),
        component: "Lists",
        html_element: Some("ul/ol"),
    },
    ClassificationRule {
        matches: |t| t.id_starts_with("ARIA") || t.title_has_any(&["aria-"]),
        component: "ARIA Components",
        html_element: Some("various"),
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["color", "contrast"]),
        component: "Color & Contrast",
        html_element: None,
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["font", "resize", "text size"]),
        component: "Text & Typography",
        html_element: None,
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["navigation", "menu"]),
        component: "Navigation",
        html_element: None,
    },
    ClassificationRule {
        matches: |t| t.title_has_any(&["focus", "keyboard"]),
        component: "Keyboard & Focus",
        html_element: None,
    },
];

/// Classifies a technique by id and title. Falls back to
/// [`GENERAL_CONTENT`] when no rule matches.
pub fn classify(id: &str, title: &str) -> ComponentClass {
    let technique = Technique::new(id, title);
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(&technique))
        .map(|rule| ComponentClass::new(rule.component, rule.html_element))
        .unwrap_or_else(|| ComponentClass::new(GENERAL_CONTENT, None))
}

struct KeywordRule {
    matches: fn(&Technique<'_>) -> bool,
    component: &'static str,
}

const COMPONENT_KEYWORDS: &[KeywordRule] = &[
    KeywordRule {
        matches: |t| t.id_starts_with("H") && t.title_has_any(&["img", "image"]),
        component: "Images",
    },
    KeywordRule {
        matches: |t| t.title_has_any(&["form", "input", "label"]),
        component: "Forms",
    },
    KeywordRule {
        matches: |t| t.id_starts_with("ARIA"),
        component: "ARIA Components",
    },
    KeywordRule {
        matches: |t| t.title_has_any(&["link"]),
        component: "Links",
    },
    KeywordRule {
        matches: |t| t.title_has_any(&["button"]),
        component: "Buttons",
    },
    KeywordRule {
        matches: |t| t.title_has_any(&["heading"]),
        component: "Headings",
    },
    KeywordRule {
        matches: |t| t.title_has_any(&["table"]),
        component: "Tables",
    },
    KeywordRule {
        matches: |t| t.title_has_any(&["video", "audio", "media", "caption"]),
        component: "Media",
    },
];

/// Components a tester should look at for a criterion, in first-seen order.
pub fn components_to_test(sufficient: &[TechniqueReference]) -> Vec<String> {
    let mut components: Vec<String> = Vec::new();
    for reference in sufficient {
        let technique = Technique::new(&reference.id, &reference.title);
        for rule in COMPONENT_KEYWORDS {
            if (rule.matches)(&technique) && !components.iter().any(|c| c == rule.component) {
                components.push(rule.component.to_string());
            }
        }
    }
    components
}
