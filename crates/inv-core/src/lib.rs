//! # inv-core
//!
//! Core types, traits, and configuration for Inventario RS.
//!
//! This crate provides the building blocks shared by every layer:
//! - Validation error collection
//! - Core traits (Entity, Identifiable)
//! - Environment-driven configuration

pub mod config;
pub mod error;
pub mod traits;

pub use error::*;
pub use traits::*;
