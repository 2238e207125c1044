//! Configuración del cliente HTTP desde variables de entorno.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::error::ClientError;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv();
});

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// URL base de la API (`https://api.example.com/api`), sin `/` final.
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string(),
               token: None,
               timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `MEGILANCE_API_URL` (obligatoria), `MEGILANCE_API_TOKEN`,
    /// `MEGILANCE_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ClientError> {
        Lazy::force(&DOTENV_LOADED);
        let base_url = env::var("MEGILANCE_API_URL").map_err(|_| ClientError::Config("MEGILANCE_API_URL no definido".into()))?;
        let mut cfg = Self::new(base_url);
        if let Ok(token) = env::var("MEGILANCE_API_TOKEN") {
            if !token.trim().is_empty() {
                cfg.token = Some(token);
            }
        }
        if let Some(secs) = env::var("MEGILANCE_API_TIMEOUT_SECS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }
}
