//! Modelos neutrales del wizard: la bolsa de respuestas (`FormData`) y el
//! esquema de campos usado al restaurar drafts.

pub mod form_data;
pub mod schema;

pub use form_data::FormData;
pub use schema::{FieldKind, FieldSchema};
