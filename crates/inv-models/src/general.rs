//! Geography and shared catalog records
//!
//! Tables: paises, departamentos, ciudades, unidades_medida, tipos_movimiento

use inv_core::Id;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::entity;

/// Country
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    /// ISO 3166-1 alpha-2 code
    #[validate(length(equal = 2))]
    pub codigo_iso2: String,

    /// ISO 3166-1 alpha-3 code
    #[validate(length(equal = 3))]
    pub codigo_iso3: String,
}

entity!(Country, "paises", "Country");

/// Department (first-level administrative division of a country)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    pub pais_id: Id,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub pais: Option<Country>,
}

entity!(Department, "departamentos", "Department");

/// City
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    pub departamento_id: Id,

    pub pais_id: Id,

    /// Official city code (e.g. DANE code)
    #[serde(default)]
    #[validate(length(max = 20))]
    pub codigo: String,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub departamento: Option<Department>,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub pais: Option<Country>,
}

entity!(City, "ciudades", "City");

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementUnit {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 50))]
    pub nombre: String,

    #[serde(default)]
    #[validate(length(max = 10))]
    pub abreviatura: String,
}

entity!(MeasurementUnit, "unidades_medida", "Measurement unit");

/// Inventory movement type, identified by its code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MovementType {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 10, message = "can't be blank"))]
    pub codigo: String,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,
}

entity!(MovementType, "tipos_movimiento", "Movement type");
