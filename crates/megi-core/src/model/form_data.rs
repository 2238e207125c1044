//! `FormData`: respuestas acumuladas de todos los pasos.
//!
//! Es un objeto JSON abierto: cada paso agrega sus campos y el motor nunca
//! elimina claves (salvo reset explícito de la sesión). El merge es shallow y
//! last-write-wins por campo de primer nivel.
//!
//! Los lectores tipados (`text`, `number`, `flag`, `list_len`) toleran lo que
//! envía un formulario web: números como strings, campos ausentes, etc. Nunca
//! fallan; un valor inutilizable se lee como vacío.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(Map<String, Value>);

impl FormData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Construye desde un `Value`. Sólo los objetos son válidos.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Variante encadenable de `set`, útil para defaults y tests.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Merge shallow: cada campo de `partial` reemplaza al existente.
    /// Devuelve los nombres de los campos escritos, en el orden de `partial`.
    pub fn merge(&mut self, partial: FormData) -> Vec<String> {
        let mut written = Vec::with_capacity(partial.len());
        for (k, v) in partial.0 {
            written.push(k.clone());
            self.0.insert(k, v);
        }
        written
    }

    /// Texto del campo; "" si falta o no es string.
    pub fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }

    /// Texto sin espacios en los extremos.
    pub fn trimmed(&self, field: &str) -> &str {
        self.text(field).trim()
    }

    /// Número del campo. Acepta números JSON y strings numéricos; descarta
    /// NaN/infinito.
    pub fn number(&self, field: &str) -> Option<f64> {
        let n = match self.0.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        n.is_finite().then_some(n)
    }

    /// Booleano del campo (`true` o `"true"`).
    pub fn flag(&self, field: &str) -> bool {
        match self.0.get(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Cantidad de elementos si el campo es un arreglo; 0 en otro caso.
    pub fn list_len(&self, field: &str) -> usize {
        self.0.get(field).and_then(Value::as_array).map(Vec::len).unwrap_or(0)
    }
}

impl From<Map<String, Value>> for FormData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for FormData {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
