//! # inv-services
//!
//! Application services for Inventario RS.
//!
//! [`Service`] exposes the repository operations for one record type, and
//! [`Services`] holds one service per entity. The registry is built once at
//! startup and passed to the HTTP layer explicitly, so tests can swap any
//! entry for a fake.

pub mod registry;
pub mod service;

pub use registry::{Provides, Services};
pub use service::{AppService, Service};
