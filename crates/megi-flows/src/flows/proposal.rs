//! Enviar una propuesta a un trabajo: Cover Letter → Pricing → Review.
//!
//! Un draft por trabajo (`proposal_{job_id}`).

use megi_core::model::{FieldKind, FieldSchema, FormData};
use megi_core::step::{ValidationResult, WizardStep};
use megi_core::{WizardDefinition, WizardError};
use once_cell::sync::Lazy;

use crate::rules;

pub const FLOW: &str = "proposal";
pub const ENDPOINT: &str = "proposals";
pub const MIN_COVER_LETTER_CHARS: usize = 100;

wizard_step! {
    CoverLetterStep {
        id: "cover_letter",
        title: "Cover Letter",
        validate(data) {
            ValidationResult::valid()
                .check(rules::present(data, "coverLetter"), "coverLetter", "Cover letter is required.")
                .check(rules::min_chars(data, "coverLetter", MIN_COVER_LETTER_CHARS),
                       "coverLetter",
                       "Cover letter must be at least 100 characters.")
        }
    }
}

wizard_step! {
    PricingStep {
        id: "pricing",
        title: "Bid & Delivery",
        validate(data) {
            ValidationResult::valid()
                .check(rules::positive(data, "bidAmount"), "bidAmount", "Please enter a valid bid amount.")
                .check(rules::whole_at_least(data, "deliveryDays", 1),
                       "deliveryDays",
                       "Please enter a valid delivery time.")
        }
    }
}

wizard_step! {
    ReviewStep {
        id: "review",
        title: "Review & Submit",
    }
}

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new().field("jobId", FieldKind::Text)
                      .field("coverLetter", FieldKind::Text)
                      .field("bidAmount", FieldKind::Number)
                      .field("deliveryDays", FieldKind::Number)
});

pub fn steps() -> Vec<Box<dyn WizardStep>> {
    vec![Box::new(CoverLetterStep), Box::new(PricingStep), Box::new(ReviewStep)]
}

pub fn schema() -> FieldSchema {
    SCHEMA.clone()
}

/// `job_id` viaja en el payload para que el backend asocie la propuesta.
pub fn defaults(job_id: Option<&str>) -> FormData {
    FormData::new().with("jobId", job_id.unwrap_or_default())
                   .with("coverLetter", "")
                   .with("bidAmount", "")
                   .with("deliveryDays", "")
}

pub fn definition() -> Result<WizardDefinition, WizardError> {
    WizardDefinition::new(FLOW, steps(), schema())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_letter_length() {
        let short = defaults(Some("42")).with("coverLetter", "I can do it.");
        assert_eq!(CoverLetterStep.validate(&short).message("coverLetter"),
                   Some("Cover letter must be at least 100 characters."));
        let long = defaults(Some("42")).with("coverLetter", "x".repeat(100));
        assert!(CoverLetterStep.validate(&long).is_valid());
    }

    #[test]
    fn pricing_requires_whole_delivery_days() {
        let d = defaults(None).with("bidAmount", "250").with("deliveryDays", "2.5");
        let res = PricingStep.validate(&d);
        assert!(!res.has_error("bidAmount"));
        assert_eq!(res.message("deliveryDays"), Some("Please enter a valid delivery time."));
    }
}
