//! Generic repository
//!
//! Runs raw SQL text or stored procedures and maps result rows onto any
//! record type by column name. Every call opens its own connection through
//! the [`ConnectionProvider`] and returns it before handing back the result.

use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use std::sync::Arc;

use crate::error::{DbError, DbResult};
use crate::params::Params;
use crate::pool::ConnectionProvider;

/// Anything a result row can be mapped onto
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {}

impl<T> Record for T where T: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {}

/// Optionally schema-qualified SQL identifier
static PROCEDURE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .unwrap_or_else(|e| panic!("invalid procedure name pattern: {e}"))
});

/// Data access over raw SQL
#[derive(Clone)]
pub struct Repository {
    provider: Arc<dyn ConnectionProvider>,
}

impl Repository {
    pub fn new(provider: Arc<dyn ConnectionProvider>) -> Self {
        Self { provider }
    }

    /// Run a read statement and map every row onto `T`
    pub async fn query<T: Record>(&self, sql: &str, params: Params) -> DbResult<Vec<T>> {
        tracing::debug!(sql, params = params.len(), "query");

        let mut conn = self.provider.open().await?;
        let rows = sqlx::query_as_with::<_, T, _>(sql, params.to_arguments())
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows)
    }

    /// Run a statement expected to produce one row; zero rows is `NotFound`
    pub async fn scalar<T: Record>(&self, sql: &str, params: Params) -> DbResult<T> {
        tracing::debug!(sql, params = params.len(), "scalar");

        let mut conn = self.provider.open().await?;
        sqlx::query_as_with::<_, T, _>(sql, params.to_arguments())
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| DbError::NotFound(sql.to_string()))
    }

    /// Run a write statement and return the number of affected rows
    pub async fn execute(&self, sql: &str, params: Params) -> DbResult<u64> {
        tracing::debug!(sql, params = params.len(), "execute");

        let mut conn = self.provider.open().await?;
        let result = sqlx::query_with(sql, params.to_arguments())
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Invoke a set-returning function and map its rows onto `T`
    pub async fn call_procedure<T: Record>(&self, name: &str, params: Params) -> DbResult<Vec<T>> {
        let sql = procedure_call(name, &params)?;
        tracing::debug!(procedure = name, params = params.len(), "call_procedure");

        let mut conn = self.provider.open().await?;
        let rows = sqlx::query_as_with::<_, T, _>(&sql, params.to_arguments())
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows)
    }
}

/// `SELECT * FROM name($1..$n)`, refusing anything that is not an identifier
pub fn procedure_call(name: &str, params: &Params) -> DbResult<String> {
    if !PROCEDURE_NAME.is_match(name) {
        return Err(DbError::InvalidProcedure(name.to_string()));
    }
    Ok(format!("SELECT * FROM {}({})", name, params.placeholders()))
}
