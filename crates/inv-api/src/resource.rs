//! Resource descriptors
//!
//! A [`Resource`] tells the generic handlers how one entity is read, keyed,
//! written and enriched with its parent rows.

use async_trait::async_trait;
use inv_core::{Entity, Id, Identifiable, ValidationErrors};
use inv_db::{params, DbResult, Params, Record, SqlParam};
use inv_services::{Service, Services};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use validator::Validate;

/// A value that identifies one row in URLs and existence checks
pub trait ResourceKey: Clone + Display + Into<SqlParam> + Send + Sync + 'static {
    fn parse(raw: &str) -> Option<Self>;
}

impl ResourceKey for Id {
    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ResourceKey for String {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        (!raw.is_empty()).then(|| raw.to_string())
    }
}

/// A write statement: plain SQL or a stored procedure
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    Sql { sql: &'static str, params: Params },
    Procedure { name: &'static str, params: Params },
}

impl Write {
    pub fn sql(sql: &'static str, params: Params) -> Self {
        Write::Sql { sql, params }
    }

    pub fn procedure(name: &'static str, params: Params) -> Self {
        Write::Procedure { name, params }
    }

    /// Run through `service`; returns the rows touched
    pub async fn run<T>(self, service: &Arc<dyn Service<T>>) -> DbResult<Vec<T>> {
        match self {
            Write::Sql { sql, params } => {
                service.execute(sql, params).await?;
                Ok(Vec::new())
            }
            Write::Procedure { name, params } => service.call_procedure(name, params).await,
        }
    }
}

/// An entity exposed under `/api/<PATH>`
#[async_trait]
pub trait Resource:
    Record + Entity + Identifiable + Serialize + DeserializeOwned + Validate + Clone
{
    type Key: ResourceKey;

    /// Route segment, e.g. `paises`
    const PATH: &'static str;

    /// Plural used in messages, e.g. `countries`
    const PLURAL: &'static str;

    const SELECT_ALL: &'static str;

    /// Single `$1` parameter: the key
    const SELECT_BY_KEY: &'static str;

    fn service(services: &Services) -> &Arc<dyn Service<Self>>;

    fn key(&self) -> Self::Key;

    fn insert(&self) -> Write;

    fn update(&self) -> Write;

    fn delete(&self) -> Write;

    /// Rules that only apply to a row that does not exist yet
    fn check_new(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    async fn create(&self, services: &Services) -> DbResult<()> {
        let service = Self::service(services);
        self.insert().run(service).await?;
        if self.assigned_id().is_some() {
            sync_identity(service).await?;
        }
        Ok(())
    }

    async fn modify(&self, services: &Services) -> DbResult<()> {
        self.update().run(Self::service(services)).await?;
        Ok(())
    }

    async fn remove(&self, services: &Services) -> DbResult<()> {
        self.delete().run(Self::service(services)).await?;
        Ok(())
    }

    /// Resolve parent rows. Runs one lookup per row and parent, in sequence.
    async fn hydrate(_services: &Services, _rows: &mut [Self]) -> DbResult<()> {
        Ok(())
    }
}

/// Row of `T` with the given surrogate id, if any
pub async fn lookup<T>(service: &Arc<dyn Service<T>>, id: Id) -> DbResult<Option<T>>
where
    T: Entity,
{
    let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE_NAME);
    Ok(service.query(&sql, params![id]).await?.into_iter().next())
}

/// Move the identity sequence of `T`'s table past every stored id.
///
/// Needed after an insert that supplied its own id, which the sequence does
/// not see. Never moves the sequence backwards.
pub async fn sync_identity<T>(service: &Arc<dyn Service<T>>) -> DbResult<u64>
where
    T: Entity,
{
    service.execute(&identity_sync_sql(T::TABLE_NAME), params![]).await
}

fn identity_sync_sql(table: &str) -> String {
    format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
         GREATEST((SELECT max(id) FROM {table}), \
         pg_sequence_last_value(pg_get_serial_sequence('{table}', 'id')::regclass), 1))"
    )
}
