//! # inv-api
//!
//! REST API handlers for Inventario RS.
//!
//! Each entity is described once by a [`resource::Resource`] implementation
//! and served by the generic handlers in [`handlers`]. Errors are rendered as
//! `{ "error": { "code", "message" } }` by [`error::ApiError`].

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod resource;
pub mod resources;
pub mod routes;

#[cfg(test)]
mod testing;

pub use extractors::AppState;
pub use routes::router;
