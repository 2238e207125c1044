//! Abrir una disputa sobre un contrato: Contract → Reason → Details → Review.
//!
//! Un draft por contrato (`dispute_{contract_id}`). El paso de revisión sí
//! valida: el usuario debe confirmar que la información es correcta.

use megi_core::model::{FieldKind, FieldSchema, FormData};
use megi_core::step::{ValidationResult, WizardStep};
use megi_core::{WizardDefinition, WizardError};
use once_cell::sync::Lazy;
use serde_json::json;

use crate::rules;

pub const FLOW: &str = "dispute";
pub const ENDPOINT: &str = "disputes";
pub const MIN_DESCRIPTION_CHARS: usize = 50;
pub const MAX_EVIDENCE: usize = 10;

pub const REASONS: [&str; 6] = ["Work not delivered",
                                "Poor quality",
                                "Missed deadline",
                                "Payment issue",
                                "Scope disagreement",
                                "Other"];

wizard_step! {
    ContractStep {
        id: "contract",
        title: "Select Contract",
        validate(data) {
            ValidationResult::valid().check(rules::present(data, "contractId"), "contractId", "Please select a contract.")
        }
    }
}

wizard_step! {
    ReasonStep {
        id: "reason",
        title: "Reason",
        validate(data) {
            ValidationResult::valid()
                .check(rules::one_of(data, "reason", &REASONS), "reason", "Please select a reason for the dispute.")
        }
    }
}

wizard_step! {
    DetailsStep {
        id: "details",
        title: "Details & Evidence",
        validate(data) {
            ValidationResult::valid()
                .check(rules::min_chars(data, "description", MIN_DESCRIPTION_CHARS),
                       "description",
                       "Please describe the issue in at least 50 characters.")
                .check(rules::at_most(data, "evidence", MAX_EVIDENCE), "evidence", "You can attach up to 10 files.")
        }
    }
}

wizard_step! {
    ReviewStep {
        id: "review",
        title: "Review & Submit",
        validate(data) {
            ValidationResult::valid()
                .check(data.flag("acknowledged"), "acknowledged", "You must confirm the information is accurate.")
        }
    }
}

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new().field("contractId", FieldKind::Text)
                      .field("reason", FieldKind::choice(REASONS))
                      .field("description", FieldKind::Text)
                      .field("evidence", FieldKind::List)
                      .field("acknowledged", FieldKind::Flag)
});

pub fn steps() -> Vec<Box<dyn WizardStep>> {
    vec![Box::new(ContractStep), Box::new(ReasonStep), Box::new(DetailsStep), Box::new(ReviewStep)]
}

pub fn schema() -> FieldSchema {
    SCHEMA.clone()
}

/// Con `contract_id` el primer paso llega ya completo.
pub fn defaults(contract_id: Option<&str>) -> FormData {
    FormData::new().with("contractId", contract_id.unwrap_or_default())
                   .with("reason", "")
                   .with("description", "")
                   .with("evidence", json!([]))
                   .with("acknowledged", false)
}

pub fn definition() -> Result<WizardDefinition, WizardError> {
    WizardDefinition::new(FLOW, steps(), schema())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_prefilled_from_instance() {
        assert!(ContractStep.validate(&defaults(Some("c-17"))).is_valid());
        assert_eq!(ContractStep.validate(&defaults(None)).message("contractId"),
                   Some("Please select a contract."));
    }

    #[test]
    fn review_requires_acknowledgement() {
        let d = defaults(Some("c-17"));
        assert!(ReviewStep.validate(&d).has_error("acknowledged"));
        assert!(ReviewStep.validate(&d.with("acknowledged", true)).is_valid());
    }
}
