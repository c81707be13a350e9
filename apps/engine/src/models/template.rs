//! Resume template catalog. Data only; rendering is out of scope.

use serde::{Deserialize, Serialize};

/// Template assigned to every generated draft.
pub const DEFAULT_TEMPLATE_ID: &str = "modern-tech";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStyle {
    Modern,
    Classic,
    Technical,
    Creative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub style: TemplateStyle,
    pub ats_optimized: bool,
}

/// The built-in catalog, in display order.
pub fn builtin_templates() -> Vec<ResumeTemplate> {
    vec![
        ResumeTemplate {
            id: "modern-tech".to_string(),
            name: "Modern Technical".to_string(),
            description: "Clean, modern design optimized for software developers".to_string(),
            style: TemplateStyle::Modern,
            ats_optimized: true,
        },
        ResumeTemplate {
            id: "classic-professional".to_string(),
            name: "Classic Professional".to_string(),
            description: "Traditional format preferred by enterprise companies".to_string(),
            style: TemplateStyle::Classic,
            ats_optimized: true,
        },
        ResumeTemplate {
            id: "technical-focus".to_string(),
            name: "Technical Focus".to_string(),
            description: "Skills-first layout highlighting technical expertise".to_string(),
            style: TemplateStyle::Technical,
            ats_optimized: true,
        },
        ResumeTemplate {
            id: "creative-impact".to_string(),
            name: "Creative Impact".to_string(),
            description: "Eye-catching design for startups and creative roles".to_string(),
            style: TemplateStyle::Creative,
            ats_optimized: false,
        },
    ]
}
