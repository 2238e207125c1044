//! Predicados de validación compartidos por los flujos.
//!
//! Todos devuelven `bool`; los mensajes viven en cada paso para que cada
//! flujo hable con su propio vocabulario.

use megi_core::model::FormData;

/// Texto no vacío tras recortar espacios.
pub fn present(data: &FormData, field: &str) -> bool {
    !data.trimmed(field).is_empty()
}

/// Al menos `min` caracteres (no bytes) tras recortar.
pub fn min_chars(data: &FormData, field: &str, min: usize) -> bool {
    data.trimmed(field).chars().count() >= min
}

/// Número finito estrictamente positivo.
pub fn positive(data: &FormData, field: &str) -> bool {
    data.number(field).is_some_and(|n| n > 0.0)
}

/// Entero >= `min` (acepta "7" y 7.0, no 7.5).
pub fn whole_at_least(data: &FormData, field: &str, min: u32) -> bool {
    data.number(field).is_some_and(|n| n.fract() == 0.0 && n >= f64::from(min))
}

/// El campo es exactamente una de las opciones.
pub fn one_of(data: &FormData, field: &str, options: &[&str]) -> bool {
    let v = data.text(field);
    options.iter().any(|o| *o == v)
}

pub fn non_empty_list(data: &FormData, field: &str) -> bool {
    data.list_len(field) > 0
}

pub fn at_most(data: &FormData, field: &str, max: usize) -> bool {
    data.list_len(field) <= max
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_rules_accept_strings() {
        let d = FormData::new().with("a", "12.5").with("b", 0).with("c", "abc").with("days", "7");
        assert!(positive(&d, "a"));
        assert!(!positive(&d, "b"));
        assert!(!positive(&d, "c"));
        assert!(!positive(&d, "missing"));
        assert!(whole_at_least(&d, "days", 1));
        assert!(!whole_at_least(&d, "a", 1));
    }

    #[test]
    fn text_rules_trim_and_count_chars() {
        let d = FormData::new().with("t", "   ").with("u", "ñandú");
        assert!(!present(&d, "t"));
        assert!(min_chars(&d, "u", 5));
        assert!(!min_chars(&d, "u", 6));
    }

    #[test]
    fn list_rules() {
        let d = FormData::new().with("skills", json!(["rust"])).with("none", json!([]));
        assert!(non_empty_list(&d, "skills"));
        assert!(!non_empty_list(&d, "none"));
        assert!(at_most(&d, "skills", 1));
        assert!(at_most(&d, "missing", 0));
    }
}
