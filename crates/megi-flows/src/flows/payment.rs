//! Pagar un contrato: Amount → Method → Confirm.
//!
//! El paso de método valida campos condicionales según el método elegido.

use megi_core::model::{FieldKind, FieldSchema, FormData};
use megi_core::step::{ValidationResult, WizardStep};
use megi_core::{WizardDefinition, WizardError};
use once_cell::sync::Lazy;

use crate::rules;

pub const FLOW: &str = "payment";
pub const ENDPOINT: &str = "payments";

pub const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "USDC"];
pub const METHODS: [&str; 3] = ["card", "bank", "crypto"];

wizard_step! {
    AmountStep {
        id: "amount",
        title: "Amount",
        validate(data) {
            ValidationResult::valid()
                .check(rules::positive(data, "amount"), "amount", "Please enter a valid amount.")
                .check(rules::one_of(data, "currency", &CURRENCIES), "currency", "Please select a currency.")
        }
    }
}

wizard_step! {
    MethodStep {
        id: "method",
        title: "Payment Method",
        validate(data) {
            let res = ValidationResult::valid()
                .check(rules::one_of(data, "method", &METHODS), "method", "Please select a payment method.");
            match data.text("method") {
                "card" => res.check(rules::present(data, "cardholderName"),
                                    "cardholderName",
                                    "Cardholder name is required."),
                "bank" => res.check(rules::present(data, "accountNumber"),
                                    "accountNumber",
                                    "Account number is required."),
                "crypto" => res.check(rules::present(data, "walletAddress"),
                                      "walletAddress",
                                      "Wallet address is required."),
                _ => res,
            }
        }
    }
}

wizard_step! {
    ConfirmStep {
        id: "confirm",
        title: "Confirm",
        validate(data) {
            ValidationResult::valid().check(data.flag("confirmed"), "confirmed", "Please confirm the payment.")
        }
    }
}

static SCHEMA: Lazy<FieldSchema> = Lazy::new(|| {
    FieldSchema::new().field("contractId", FieldKind::Text)
                      .field("amount", FieldKind::Number)
                      .field("currency", FieldKind::choice(CURRENCIES))
                      .field("method", FieldKind::choice(METHODS))
                      .field("cardholderName", FieldKind::Text)
                      .field("accountNumber", FieldKind::Text)
                      .field("walletAddress", FieldKind::Text)
                      .field("confirmed", FieldKind::Flag)
});

pub fn steps() -> Vec<Box<dyn WizardStep>> {
    vec![Box::new(AmountStep), Box::new(MethodStep), Box::new(ConfirmStep)]
}

pub fn schema() -> FieldSchema {
    SCHEMA.clone()
}

pub fn defaults(contract_id: Option<&str>) -> FormData {
    FormData::new().with("contractId", contract_id.unwrap_or_default())
                   .with("amount", "")
                   .with("currency", "USD")
                   .with("method", "")
                   .with("confirmed", false)
}

pub fn definition() -> Result<WizardDefinition, WizardError> {
    WizardDefinition::new(FLOW, steps(), schema())
}
