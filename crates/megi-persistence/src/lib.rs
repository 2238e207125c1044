//! megi-persistence
//!
//! Backends durables de `DraftStore` para el motor de wizards.
//!
//! Módulos:
//! - `pg`: drafts en Postgres (Diesel + r2d2), upsert por clave.
//! - `fs`: drafts como archivos JSON en un directorio.
//! - `migrations`: runner embebido de migraciones Diesel.
//! - `config`: carga de configuración desde .env.
//! - `schema`: tabla Diesel `wizard_drafts`.

pub mod config;
pub mod error;
pub mod fs;
pub mod migrations;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use fs::FileDraftStore;
pub use pg::{build_dev_pool_from_env, build_pool, ConnectionProvider, PgDraftStore, PgPool, PoolProvider};
