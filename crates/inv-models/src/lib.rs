//! # inv-models
//!
//! Domain records for Inventario RS.
//!
//! Every record is a flat mapping of one table row: fields are named after the
//! columns (so `sqlx::FromRow` maps them by name) and serialize as camelCase.
//! Parent rows resolved at read time live in `Option` fields that are skipped
//! by the row mapper and left `None` when the parent does not exist.

/// Implements `Identifiable` and `Entity` for a record with an `id` column
macro_rules! entity {
    ($ty:ty, $table:literal, $name:literal) => {
        impl inv_core::Identifiable for $ty {
            fn id(&self) -> inv_core::Id {
                self.id
            }
        }

        impl inv_core::Entity for $ty {
            const TABLE_NAME: &'static str = $table;
            const TYPE_NAME: &'static str = $name;
        }
    };
}

pub(crate) use entity;

pub mod billing;
pub mod general;
pub mod inventory;
pub mod security;

pub use billing::{BillingLine, BillingRecord, Consecutive, Payment};
pub use general::{City, Country, Department, MeasurementUnit, MovementType};
pub use inventory::{Article, Category, Status};
pub use security::{Person, Role, User};
