//! Per-entity application service

use async_trait::async_trait;
use inv_db::{DbResult, Params, Record, Repository};
use std::marker::PhantomData;
use std::sync::Arc;

/// Data operations available for records of type `T`
#[async_trait]
pub trait Service<T>: Send + Sync {
    /// Rows of a read statement
    async fn query(&self, sql: &str, params: Params) -> DbResult<Vec<T>>;

    /// The single row of a statement; `NotFound` when there is none
    async fn scalar(&self, sql: &str, params: Params) -> DbResult<T>;

    /// Affected row count of a write statement
    async fn execute(&self, sql: &str, params: Params) -> DbResult<u64>;

    /// Rows returned by a stored procedure
    async fn call_procedure(&self, name: &str, params: Params) -> DbResult<Vec<T>>;
}

/// [`Service`] backed by the shared [`Repository`]
pub struct AppService<T> {
    repository: Arc<Repository>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> AppService<T> {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self {
            repository,
            _record: PhantomData,
        }
    }

    /// Boxed for storage in the registry
    pub fn shared(repository: Arc<Repository>) -> Arc<dyn Service<T>> {
        Arc::new(Self::new(repository))
    }
}

#[async_trait]
impl<T: Record> Service<T> for AppService<T> {
    async fn query(&self, sql: &str, params: Params) -> DbResult<Vec<T>> {
        self.repository.query(sql, params).await
    }

    async fn scalar(&self, sql: &str, params: Params) -> DbResult<T> {
        self.repository.scalar(sql, params).await
    }

    async fn execute(&self, sql: &str, params: Params) -> DbResult<u64> {
        self.repository.execute(sql, params).await
    }

    async fn call_procedure(&self, name: &str, params: Params) -> DbResult<Vec<T>> {
        self.repository.call_procedure(name, params).await
    }
}
