//! People, roles and user accounts

use inv_core::Id;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::entity;

/// Natural person (customer, employee, ...) identified by a national ID
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub id: Id,

    /// National identification number
    #[validate(length(min = 1, max = 20, message = "can't be blank"))]
    pub identificacion: String,

    #[validate(length(min = 1, max = 50))]
    pub primer_nombre: String,

    #[serde(default)]
    pub segundo_nombre: String,

    #[validate(length(min = 1, max = 50))]
    pub primer_apellido: String,

    #[serde(default)]
    pub segundo_apellido: String,

    #[serde(default)]
    pub telefono: String,

    #[serde(default)]
    pub direccion: String,

    #[serde(default)]
    #[validate(custom = "optional_email")]
    pub correo: String,
}

entity!(Person, "personas", "Person");


/// Blank is allowed; anything else has to look like an address
fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || validator::validate_email(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("email");
    error.message = Some("is not a valid email".into());
    Err(error)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 50))]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,
}

entity!(Role, "roles", "Role");

/// User account. The password is write-only: it is read from request bodies
/// and rows but never rendered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[serde(skip_serializing, default)]
    pub password: String,

    pub rol_id: Id,

    pub persona_id: Id,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub rol: Option<Role>,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub persona: Option<Person>,
}

entity!(User, "usuarios", "User");

impl User {
    /// The password sent with the request. `None` when left blank, which
    /// keeps the stored one on update.
    pub fn password_change(&self) -> Option<&str> {
        (!self.password.trim().is_empty()).then_some(self.password.as_str())
    }
}
