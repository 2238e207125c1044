//! Publicar un trabajo: Details → Scope → Budget → Review.
//!
//! Flujo singleton (un draft por usuario, clave `job_posting_draft`).

use megi_core::model::{FieldKind, FieldSchema, FormData};
use megi_core::step::{ValidationResult, WizardStep};
use megi_core::{WizardDefinition, WizardError};
use once_cell::sync::Lazy;
use serde_json::json;

use crate::rules;

pub const FLOW: &str = "job_posting";
pub const ENDPOINT: &str = "projects";

pub const CATEGORIES: [&str; 6] = ["Web Development",
                                   "Mobile Development",
                                   "Design",
                                   "Writing",
                                   "Marketing",
                                   "Data Science"];

pub const TIMELINES: [&str; 5] = ["Less than 1 week", "1-2 weeks", "2-4 weeks", "1-3 months", "3+ months"];

pub const BUDGET_TYPES: [&str; 2] = ["fixed", "hourly"];

pub const MIN_DESCRIPTION_CHARS: usize = 50;

wizard_step! {
    DetailsStep {
        id: "details",
        title: "Job Details",
        validate(data) {
            ValidationResult::valid()
                .check(rules::present(data, "title"), "title", "Job title is required.")
                .check(rules::one_of(data, "category", &CATEGORIES), "category", "Please select a category.")
        }
    }
}

wizard_step! {
    ScopeStep {
        id: "scope",
        title: "Scope & Skills",
        validate(data) {
            ValidationResult::valid()
                .check(rules::present(data, "description"), "description", "Job description is required.")
                .check(rules::min_chars(data, "description", MIN_DESCRIPTION_CHARS),
                       "description",
                       "Description must be at least 50 characters.")
                .check(rules::non_empty_list(data, "skills"), "skills", "Add at least one skill.")
        }
    }
}

wizard_step! {
    BudgetStep {
        id: "budget",
        title: "Budget & Timeline",
        validate(data) {
            ValidationResult::valid()
                .check(rules::one_of(data, "budgetType", &BUDGET_TYPES), "budgetType", "Please select a budget type.")
                .check(rules::positive(data, "budgetAmount"), "budgetAmount", "Please enter a valid budget amount.")
                .check(rules::one_of(data, "timeline", &TIMELINES), "timeline", "Please select a timeline.")
        }
    }
}

wizard_step! {
    ReviewStep {
        id: "review",
        title: "Review & Publish",
    }
}

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new().field("title", FieldKind::Text)
                      .field("category", FieldKind::choice(CATEGORIES))
                      .field("description", FieldKind::Text)
                      .field("skills", FieldKind::List)
                      .field("budgetType", FieldKind::choice(BUDGET_TYPES))
                      .field("budgetAmount", FieldKind::Number)
                      .field("timeline", FieldKind::choice(TIMELINES))
});

pub fn steps() -> Vec<Box<dyn WizardStep>> {
    vec![Box::new(DetailsStep), Box::new(ScopeStep), Box::new(BudgetStep), Box::new(ReviewStep)]
}

pub fn schema() -> FieldSchema {
    SCHEMA.clone()
}

pub fn defaults() -> FormData {
    FormData::new().with("title", "")
                   .with("category", "")
                   .with("description", "")
                   .with("skills", json!([]))
                   .with("budgetType", "fixed")
                   .with("budgetAmount", "")
                   .with("timeline", "")
}

pub fn definition() -> Result<WizardDefinition, WizardError> {
    WizardDefinition::new(FLOW, steps(), schema())
}
