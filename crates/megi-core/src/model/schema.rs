//! Esquema de campos de un wizard.
//!
//! El esquema no valida pasos (eso lo hacen los validadores). Sólo describe
//! la forma esperada de cada campo para que la restauración de un draft
//! persistido descarte valores corruptos: un `Choice` con una opción
//! desconocida, un número que no parsea, un tipo JSON equivocado.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    /// Número JSON o string numérico; también vacío ("" / null) mientras el
    /// usuario no lo completa.
    Number,
    Flag,
    List,
    /// Una de las opciones dadas, o "" (sin selección).
    Choice(Vec<String>),
}

impl FieldKind {
    pub fn choice<I, S>(options: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        FieldKind::Choice(options.into_iter().map(Into::into).collect())
    }

    /// Indica si `value` tiene la forma esperada.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Number => match value {
                Value::Null => true,
                Value::Number(n) => n.as_f64().is_some_and(f64::is_finite),
                Value::String(s) => {
                    let s = s.trim();
                    s.is_empty() || s.parse::<f64>().is_ok_and(f64::is_finite)
                }
                _ => false,
            },
            FieldKind::Flag => value.is_boolean(),
            FieldKind::List => value.is_array(),
            FieldKind::Choice(options) => match value.as_str() {
                Some("") => true,
                Some(s) => options.iter().any(|o| o == s),
                None => false,
            },
        }
    }

    /// Valor "vacío" seguro cuando no hay default del caller.
    pub fn empty_value(&self) -> Value {
        match self {
            FieldKind::Text | FieldKind::Choice(_) => Value::String(String::new()),
            FieldKind::Number => Value::Null,
            FieldKind::Flag => Value::Bool(false),
            FieldKind::List => Value::Array(vec![]),
        }
    }
}

/// Mapa ordenado campo → `FieldKind`. Los campos no declarados se aceptan
/// tal cual (la bolsa de datos es abierta).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    fields: IndexMap<String, FieldKind>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.insert(name.into(), kind);
        self
    }

    pub fn kind_of(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldKind)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
