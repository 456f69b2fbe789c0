//! In-memory stand-ins for the entity services, used by the handler tests

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use inv_core::Identifiable;
use inv_db::{DbError, DbResult, Params, SqlParam};
use inv_services::{Service, Services};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::extractors::AppState;
use crate::resource::Resource;
use crate::routes::router;

type Writer<T> = Box<dyn Fn(&str, &Params, &mut Vec<T>) -> Vec<T> + Send + Sync>;

/// A table held in memory.
///
/// Reads understand `... WHERE <column> = $1 ...` for registered columns and
/// return every row otherwise. Writes (statements and procedures other than
/// `*_select*`) are handed to the `on_write` closure, which returns the rows
/// it touched.
pub struct TableFake<T> {
    rows: Mutex<Vec<T>>,
    columns: Vec<(&'static str, fn(&T) -> SqlParam)>,
    writer: Option<Writer<T>>,
    log: Mutex<Vec<String>>,
    failing: bool,
}

impl<T: Clone + Send + Sync + 'static> TableFake<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
            columns: Vec::new(),
            writer: None,
            log: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// Every call fails like an exhausted pool would
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn column(mut self, name: &'static str, extract: fn(&T) -> SqlParam) -> Self {
        self.columns.push((name, extract));
        self
    }

    pub fn on_write(
        mut self,
        writer: impl Fn(&str, &Params, &mut Vec<T>) -> Vec<T> + Send + Sync + 'static,
    ) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn rows(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }

    /// SQL text and procedure names seen so far, in order
    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn enter(&self, statement: &str) -> DbResult<()> {
        self.log.lock().unwrap().push(statement.to_string());
        if self.failing {
            return Err(DbError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn select(&self, column: Option<&str>, params: &Params) -> Vec<T> {
        let rows = self.rows();
        let Some(column) = column else {
            return rows;
        };
        if rows.is_empty() {
            return rows;
        }

        let extract = self
            .columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, extract)| *extract)
            .unwrap_or_else(|| panic!("column `{}` is not registered on this fake", column));
        rows.into_iter()
            .filter(|row| params.get(0) == Some(&extract(row)))
            .collect()
    }

    fn write(&self, statement: &str, params: &Params) -> Vec<T> {
        let writer = self
            .writer
            .as_ref()
            .unwrap_or_else(|| panic!("unexpected write: {}", statement));
        let mut rows = self.rows.lock().unwrap();
        writer(statement, params, &mut *rows)
    }
}

/// Read-only table for `R` that answers lookups by its key and by id
pub fn keyed<R: Resource>(rows: Vec<R>) -> Arc<TableFake<R>> {
    let column = where_column(R::SELECT_BY_KEY).unwrap_or("id");
    let table = TableFake::new(rows).column(column, |row: &R| row.key().into());
    if column == "id" {
        return table.shared();
    }
    table.column("id", |row: &R| row.id().into()).shared()
}

fn where_column(sql: &str) -> Option<&str> {
    let (_, condition) = sql.split_once(" WHERE ")?;
    condition.split_once(" = $1").map(|(column, _)| column.trim())
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Service<T> for TableFake<T> {
    async fn query(&self, sql: &str, params: Params) -> DbResult<Vec<T>> {
        self.enter(sql)?;
        Ok(self.select(where_column(sql), &params))
    }

    async fn scalar(&self, sql: &str, params: Params) -> DbResult<T> {
        self.query(sql, params)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound(sql.to_string()))
    }

    async fn execute(&self, sql: &str, params: Params) -> DbResult<u64> {
        self.enter(sql)?;
        Ok(self.write(sql, &params).len() as u64)
    }

    async fn call_procedure(&self, name: &str, params: Params) -> DbResult<Vec<T>> {
        self.enter(name)?;
        if name.ends_with("_select_id") {
            return Ok(self.select(Some("id"), &params));
        }
        if name.ends_with("_select") {
            return Ok(self.rows());
        }
        Ok(self.write(name, &params))
    }
}

/// Registry where every table is empty and read-only
pub fn services() -> Services {
    fn empty<T: Clone + Send + Sync + 'static>() -> Arc<dyn Service<T>> {
        TableFake::new(Vec::new()).shared()
    }

    Services {
        countries: empty(),
        departments: empty(),
        cities: empty(),
        measurement_units: empty(),
        movement_types: empty(),
        categories: empty(),
        statuses: empty(),
        articles: empty(),
        people: empty(),
        roles: empty(),
        users: empty(),
        payments: empty(),
        billing_records: empty(),
        billing_lines: empty(),
        consecutives: empty(),
    }
}

pub fn app(services: Services) -> Router {
    router().with_state(AppState::new(services))
}

/// Send one request and decode the JSON response
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Text parameter `$index + 1`, empty when NULL
pub fn text(params: &Params, index: usize) -> String {
    params
        .get(index)
        .and_then(SqlParam::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Integer parameter `$index + 1`, zero when NULL
pub fn int(params: &Params, index: usize) -> i32 {
    params.get(index).and_then(SqlParam::as_i32).unwrap_or_default()
}

/// Next free surrogate id
pub fn next_id<T>(rows: &[T], id: impl Fn(&T) -> i32) -> i32 {
    rows.iter().map(id).max().unwrap_or(0) + 1
}
