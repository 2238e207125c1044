use thiserror::Error;

/// Errores al construir el cliente (no al enviar; esos son `SubmissionError`).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http client build error: {0}")]
    Build(#[from] reqwest::Error),
}
