//! megi-client: cliente HTTP de envío para los wizards.
//!
//! Implementa `megi_core::SubmissionClient` con reqwest. La configuración
//! (URL base, token, timeout) sale del entorno o se arma a mano.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpSubmissionClient;
