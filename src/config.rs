//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) una vez y decide qué backend de drafts
//! y qué cliente de envío usa la CLI.
use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

use megi_client::ClientConfig;

static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
});

/// Dónde viven los drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftBackend {
    /// `DATABASE_URL` presente.
    Postgres,
    /// `MEGILANCE_DRAFT_DIR` presente (y sin `DATABASE_URL`).
    Directory(PathBuf),
    /// Sin configuración: drafts sólo durante el proceso.
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub drafts: DraftBackend,
    /// `None` si no hay `MEGILANCE_API_URL`; `run` sólo puede usar `--dry-run`.
    pub api: Option<ClientConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let drafts = if env::var("DATABASE_URL").is_ok_and(|v| !v.trim().is_empty()) {
            DraftBackend::Postgres
        } else if let Some(dir) = env::var_os("MEGILANCE_DRAFT_DIR").filter(|d| !d.is_empty()) {
            DraftBackend::Directory(PathBuf::from(dir))
        } else {
            DraftBackend::Memory
        };
        let api = ClientConfig::from_env().ok();
        Self { drafts, api }
    }
}

/// Instancia global perezosa, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
