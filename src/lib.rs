//! MegiLance Wizard
//!
//! Librería de la CLI `megilance-wizard`:
//! - `config`: backend de drafts y API, desde el entorno.
//! - `errors`: errores de la aplicación con su código de salida.
//! - `app`: apertura del store y ejecución de un wizard desde un archivo de
//!   respuestas.
//!
//! El motor vive en `megi-core`; los flujos concretos en `megi-flows`.

pub mod app;
pub mod config;
pub mod errors;

pub use app::{open_store, parse_answers, read_answers, run_flow, RunOutcome, RunReport};
pub use config::{AppConfig, DraftBackend, CONFIG};
pub use errors::AppError;
