//! # inv-db
//!
//! Database layer for Inventario RS.
//!
//! This crate provides PostgreSQL access using SQLx:
//!
//! - Connection provider over a pooled `PgPool`
//! - Generic repository running raw SQL and stored procedures
//! - Typed statement parameters
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```ignore
//! use inv_db::{params, Database, DatabaseConfig, Repository};
//!
//! let db = Database::connect(&DatabaseConfig::with_url(url)).await?;
//! let repo = Repository::new(Arc::new(db));
//!
//! let countries: Vec<Country> = repo
//!     .query("SELECT * FROM paises WHERE id = $1", params![7])
//!     .await?;
//! ```

pub mod error;
pub mod params;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use params::{Params, SqlParam};
pub use pool::{ConnectionProvider, Database, DatabaseConfig};
pub use repository::{Record, Repository};
