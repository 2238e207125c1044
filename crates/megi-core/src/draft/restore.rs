//! Restauración de drafts sobre los defaults del caller.
//!
//! Reglas:
//! - Cada campo del draft se fusiona sobre los defaults, uno por uno.
//! - Un campo ausente en el draft conserva su default.
//! - Un campo declarado en el `FieldSchema` cuyo valor no cumple la forma
//!   (opción desconocida, tipo JSON equivocado) vuelve al default del caller,
//!   o al valor vacío del `FieldKind` si el caller no dio default. Nunca se
//!   "adivina" un valor válido.
//! - Los campos no declarados se aceptan tal cual.
//! - Si el draft entero no es un objeto, se ignora y se usan los defaults.

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::model::{FieldSchema, FormData};

/// Resumen de qué se tomó del draft y qué se descartó.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub restored: Vec<String>,
    pub rejected: Vec<String>,
    /// El draft no era un objeto JSON y se descartó completo.
    pub discarded: bool,
}

pub fn restore_fields(defaults: &FormData, draft_data: &Value, schema: &FieldSchema) -> (FormData, RestoreReport) {
    let mut data = defaults.clone();
    let mut report = RestoreReport::default();

    let Some(fields) = draft_data.as_object() else {
        warn!("restore: draft payload is not an object, using defaults");
        report.discarded = true;
        return (data, report);
    };

    for (name, value) in fields {
        match schema.kind_of(name) {
            Some(kind) if !kind.accepts(value) => {
                let fallback = defaults.get(name).cloned().unwrap_or_else(|| kind.empty_value());
                data.set(name.clone(), fallback);
                report.rejected.push(name.clone());
            }
            _ => {
                data.set(name.clone(), value.clone());
                report.restored.push(name.clone());
            }
        }
    }
    if !report.rejected.is_empty() {
        warn!("restore: rejected malformed draft fields {:?}", report.rejected);
    }
    (data, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;
    use serde_json::json;

    fn schema() -> FieldSchema {
        FieldSchema::new().field("category", FieldKind::choice(["Web Development", "Design"]))
                          .field("skills", FieldKind::List)
                          .field("budgetAmount", FieldKind::Number)
    }

    #[test]
    fn draft_fields_override_defaults_field_by_field() {
        let defaults = FormData::new().with("title", "").with("category", "").with("skills", json!([]));
        let draft = json!({"title": "Build a CRM", "skills": ["rust"]});
        let (data, report) = restore_fields(&defaults, &draft, &schema());
        assert_eq!(data.text("title"), "Build a CRM");
        assert_eq!(data.list_len("skills"), 1);
        // ausente en el draft: conserva el default
        assert_eq!(data.text("category"), "");
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn unknown_choice_resets_to_default_not_to_a_valid_option() {
        let defaults = FormData::new().with("category", "");
        let draft = json!({"category": "Underwater Basket Weaving", "title": "ok"});
        let (data, report) = restore_fields(&defaults, &draft, &schema());
        assert_eq!(data.text("category"), "");
        assert_eq!(data.text("title"), "ok");
        assert_eq!(report.rejected, vec!["category".to_string()]);
    }

    #[test]
    fn wrong_shape_without_default_uses_kind_empty_value() {
        let draft = json!({"skills": "rust, go", "budgetAmount": "lots"});
        let (data, report) = restore_fields(&FormData::new(), &draft, &schema());
        assert_eq!(data.get("skills"), Some(&json!([])));
        assert_eq!(data.get("budgetAmount"), Some(&Value::Null));
        assert_eq!(report.rejected.len(), 2);
    }

    #[test]
    fn non_object_draft_is_discarded() {
        let defaults = FormData::new().with("title", "");
        let (data, report) = restore_fields(&defaults, &json!("garbage"), &schema());
        assert_eq!(data, defaults);
        assert!(report.discarded);
    }
}
