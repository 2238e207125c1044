//! Constantes del motor de wizards.
//!
//! `ENGINE_VERSION` participa en el `definition_hash`: un cambio de versión
//! invalida la correspondencia entre drafts viejos y la definición actual
//! (los campos se siguen restaurando uno a uno, ver `draft::restore`).

/// Versión lógica del motor. Mantener estable mientras no cambie la semántica
/// de navegación o de restauración de drafts.
pub const ENGINE_VERSION: &str = "W1.0";

/// Versión del sobre (`Draft`) que se persiste en los stores.
pub const DRAFT_SCHEMA_VERSION: u32 = 1;
