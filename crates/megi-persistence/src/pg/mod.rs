//! Implementación Postgres (Diesel) de `DraftStore`.
//!
//! - Una fila por clave en `wizard_drafts`; `save` hace upsert sobre
//!   `draft_key` y reemplaza payload, hash y timestamp.
//! - `clear` borra la fila; borrar una clave inexistente no es error.
//! - Reintento con backoff corto ante errores transitorios (pool, conflictos
//!   de serialización, desconexiones).

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::upsert::excluded;
use log::{debug, warn};
use serde_json::Value;

use megi_core::draft::{Draft, DraftKey, DraftStore, DraftStoreError};

use crate::error::PersistenceError;
use crate::migrations::run_pending_migrations;
use crate::schema::wizard_drafts;

/// Pool r2d2 de conexiones Postgres.
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones (pool real o doble de test).
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError>;
}

pub struct PoolProvider {
    pub pool: PgPool,
}

impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

#[derive(Queryable, Debug)]
pub struct DraftRow {
    pub draft_key: String,
    pub flow: String,
    pub definition_hash: String,
    pub payload: Value,
    pub schema_version: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = wizard_drafts)]
pub struct NewDraftRow<'a> {
    pub draft_key: &'a str,
    pub flow: &'a str,
    pub definition_hash: &'a str,
    pub payload: &'a Value,
    pub schema_version: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<DraftRow> for Draft {
    fn from(row: DraftRow) -> Self {
        Draft { key: DraftKey::from_raw(row.draft_key),
                flow: row.flow,
                definition_hash: row.definition_hash,
                data: row.payload,
                saved_at: row.updated_at,
                schema_version: u32::try_from(row.schema_version).unwrap_or(0) }
    }
}

/// Determina si un error es transitorio (conviene reintentar).
pub(crate) fn is_retryable(e: &PersistenceError) -> bool {
    match e {
        PersistenceError::SerializationConflict => true,
        PersistenceError::TransientIo(_) => true,
        PersistenceError::Unknown(msg) => {
            let m = msg.to_lowercase();
            m.contains("deadlock detected")
            || m.contains("terminating connection due to administrator command")
            || m.contains("connection closed")
            || m.contains("connection refused")
            || m.contains("timeout")
        }
        _ => false,
    }
}

/// Hasta 3 reintentos con backoff 15ms, 30ms, 45ms; `warn!` por intento.
pub(crate) fn with_retry<F, T>(mut f: F) -> Result<T, PersistenceError>
    where F: FnMut() -> Result<T, PersistenceError>
{
    let mut attempts = 0;
    loop {
        match f() {
            Err(e) if is_retryable(&e) && attempts < 3 => {
                let delay_ms = 15 * ((attempts + 1) as u64);
                warn!("retryable error (attempt {}): {:?} -> sleeping {}ms",
                      attempts + 1,
                      e,
                      delay_ms);
                std::thread::sleep(std::time::Duration::from_millis(delay_ms));
                attempts += 1;
            }
            r => return r,
        }
    }
}

/// `DraftStore` respaldado por Postgres.
pub struct PgDraftStore<P: ConnectionProvider> {
    pub provider: P,
}

impl<P: ConnectionProvider> PgDraftStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn load_row(&self, key: &str) -> Result<Option<DraftRow>, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            wizard_drafts::table.find(key)
                                .first::<DraftRow>(&mut conn)
                                .optional()
                                .map_err(PersistenceError::from)
        })
    }

    fn upsert(&self, draft: &Draft) -> Result<(), PersistenceError> {
        let schema_version = i32::try_from(draft.schema_version).map_err(|_| {
                                                                     PersistenceError::Config(format!("schema_version {} out of range",
                                                                                                      draft.schema_version))
                                                                 })?;
        let row = NewDraftRow { draft_key: draft.key.as_str(),
                                flow: &draft.flow,
                                definition_hash: &draft.definition_hash,
                                payload: &draft.data,
                                schema_version,
                                updated_at: draft.saved_at };
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::insert_into(wizard_drafts::table).values(&row)
                                                     .on_conflict(wizard_drafts::draft_key)
                                                     .do_update()
                                                     .set((wizard_drafts::flow.eq(excluded(wizard_drafts::flow)),
                                                           wizard_drafts::definition_hash
                                                               .eq(excluded(wizard_drafts::definition_hash)),
                                                           wizard_drafts::payload.eq(excluded(wizard_drafts::payload)),
                                                           wizard_drafts::schema_version
                                                               .eq(excluded(wizard_drafts::schema_version)),
                                                           wizard_drafts::updated_at.eq(excluded(wizard_drafts::updated_at))))
                                                     .execute(&mut conn)
                                                     .map(|_| ())
                                                     .map_err(PersistenceError::from)
        })
    }

    fn delete(&self, key: &str) -> Result<usize, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            diesel::delete(wizard_drafts::table.find(key)).execute(&mut conn)
                                                          .map_err(PersistenceError::from)
        })
    }

    /// Claves guardadas para un flujo (diagnóstico desde la CLI).
    pub fn keys_for_flow(&self, flow: &str) -> Result<Vec<String>, PersistenceError> {
        with_retry(|| {
            let mut conn = self.provider.connection()?;
            wizard_drafts::table.filter(wizard_drafts::flow.eq(flow))
                                .order(wizard_drafts::draft_key.asc())
                                .select(wizard_drafts::draft_key)
                                .load::<String>(&mut conn)
                                .map_err(PersistenceError::from)
        })
    }
}

impl<P: ConnectionProvider> DraftStore for PgDraftStore<P> {
    fn load(&self, key: &DraftKey) -> Result<Option<Draft>, DraftStoreError> {
        debug!("load:start key={key}");
        let row = self.load_row(key.as_str())?;
        debug!("load:done key={key} found={}", row.is_some());
        Ok(row.map(Draft::from))
    }

    fn save(&mut self, draft: &Draft) -> Result<(), DraftStoreError> {
        debug!("save key={} flow={}", draft.key, draft.flow);
        self.upsert(draft).map_err(DraftStoreError::from)
    }

    fn clear(&mut self, key: &DraftKey) -> Result<(), DraftStoreError> {
        let removed = self.delete(key.as_str())?;
        debug!("clear key={key} removed={removed}");
        Ok(())
    }
}

/// Construye un pool r2d2 y corre las migraciones pendientes.
///
/// Si `min_size > max_size` se usa `min = max`. Tamaños 0 se elevan a 1.
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_min = min_size.max(1);
    let validated_max = max_size.max(1);
    if validated_min > validated_max {
        warn!("min_size > max_size ({validated_min} > {validated_max}), ajustando min=max");
    }
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(validated_min.min(validated_max)))
                                    .max_size(validated_max)
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    {
        let mut conn = pool.get()
                           .map_err(|e| PersistenceError::TransientIo(format!("pool get for migrations: {e}")))?;
        run_pending_migrations(&mut conn)?;
    }
    Ok(pool)
}

/// Carga `.env`, lee `DbConfig` y construye un pool ya migrado.
pub fn build_dev_pool_from_env() -> Result<PgPool, PersistenceError> {
    crate::config::init_dotenv();
    let cfg = crate::config::DbConfig::from_env()?;
    build_pool(&cfg.url, cfg.min_connections, cfg.max_connections)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(is_retryable(&PersistenceError::SerializationConflict));
        assert!(is_retryable(&PersistenceError::Unknown("Connection refused (os error 111)".into())));
        assert!(!is_retryable(&PersistenceError::CheckViolation("wizard_drafts_key_prefix".into())));
    }

    #[test]
    fn with_retry_gives_up_after_three_retries() {
        let mut calls = 0;
        let res: Result<(), _> = with_retry(|| {
            calls += 1;
            Err(PersistenceError::TransientIo("pool".into()))
        });
        assert!(res.is_err());
        assert_eq!(calls, 4);
    }

    #[test]
    fn with_retry_does_not_repeat_permanent_errors() {
        let mut calls = 0;
        let res: Result<(), _> = with_retry(|| {
            calls += 1;
            Err(PersistenceError::Config("bad".into()))
        });
        assert!(res.is_err());
        assert_eq!(calls, 1);
    }
}
