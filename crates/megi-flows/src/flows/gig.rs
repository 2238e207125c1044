//! Crear un gig (servicio ofrecido por un freelancer):
//! Overview → Pricing → Description → Review.

use megi_core::model::{FieldKind, FieldSchema, FormData};
use megi_core::step::{ValidationResult, WizardStep};
use megi_core::{WizardDefinition, WizardError};
use once_cell::sync::Lazy;
use serde_json::json;

use crate::flows::job_posting::CATEGORIES;
use crate::rules;

pub const FLOW: &str = "gig";
pub const ENDPOINT: &str = "gigs";
pub const MIN_TITLE_CHARS: usize = 10;
pub const MIN_DESCRIPTION_CHARS: usize = 120;
pub const MAX_IMAGES: usize = 5;

wizard_step! {
    OverviewStep {
        id: "overview",
        title: "Overview",
        validate(data) {
            ValidationResult::valid()
                .check(rules::min_chars(data, "title", MIN_TITLE_CHARS),
                       "title",
                       "Gig title must be at least 10 characters.")
                .check(rules::one_of(data, "category", &CATEGORIES), "category", "Please select a category.")
        }
    }
}

wizard_step! {
    PricingStep {
        id: "pricing",
        title: "Pricing",
        validate(data) {
            ValidationResult::valid()
                .check(rules::positive(data, "price"), "price", "Please enter a valid price.")
                .check(rules::whole_at_least(data, "deliveryDays", 1),
                       "deliveryDays",
                       "Please enter a valid delivery time.")
        }
    }
}

wizard_step! {
    DescriptionStep {
        id: "description",
        title: "Description & Gallery",
        validate(data) {
            ValidationResult::valid()
                .check(rules::min_chars(data, "description", MIN_DESCRIPTION_CHARS),
                       "description",
                       "Description must be at least 120 characters.")
                .check(rules::at_most(data, "images", MAX_IMAGES), "images", "You can upload up to 5 images.")
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
                      .field("price", FieldKind::Number)
                      .field("deliveryDays", FieldKind::Number)
                      .field("description", FieldKind::Text)
                      .field("images", FieldKind::List)
});

pub fn steps() -> Vec<Box<dyn WizardStep>> {
    vec![Box::new(OverviewStep), Box::new(PricingStep), Box::new(DescriptionStep), Box::new(ReviewStep)]
}

pub fn schema() -> FieldSchema {
    SCHEMA.clone()
}

pub fn defaults() -> FormData {
    FormData::new().with("title", "")
                   .with("category", "")
                   .with("price", "")
                   .with("deliveryDays", "")
                   .with("description", "")
                   .with("images", json!([]))
}

pub fn definition() -> Result<WizardDefinition, WizardError> {
    WizardDefinition::new(FLOW, steps(), schema())
}
