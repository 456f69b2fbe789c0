//! Billing records, their detail lines, payments and document consecutives

use chrono::{DateTime, Utc};
use inv_core::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::entity;
use crate::general::MovementType;
use crate::inventory::{non_negative, Article};
use crate::security::Person;

/// Billing record header (invoice, quote, ...)
///
/// `detalles` is filled from `registros_detalles` at read time and, on create,
/// carries the lines to insert after the header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    #[serde(default)]
    pub id: Id,

    #[serde(default = "Utc::now")]
    pub fecha: DateTime<Utc>,

    pub responsable_id: Id,

    pub cliente_id: Id,

    #[validate(length(min = 1, max = 20))]
    pub tipo_registro: String,

    #[serde(default)]
    #[validate(custom = "non_negative")]
    pub total: Decimal,

    #[serde(default)]
    pub comentario: String,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub responsable: Option<Person>,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub cliente: Option<Person>,

    #[sqlx(skip)]
    #[serde(default)]
    #[validate]
    pub detalles: Vec<BillingLine>,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub pago: Option<Payment>,
}

entity!(BillingRecord, "registros", "Billing record");

/// One article line of a billing record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillingLine {
    #[serde(default)]
    pub id: Id,

    /// Owning record; ignored on create, where the new header id is used
    #[serde(default)]
    pub registro_id: Id,

    pub articulo_id: Id,

    #[validate(range(min = 0))]
    pub cantidad: i32,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub articulo: Option<Article>,
}

entity!(BillingLine, "registros_detalles", "Billing line");

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    pub id: Id,

    #[serde(default = "Utc::now")]
    pub fecha: DateTime<Utc>,

    #[validate(custom = "non_negative")]
    pub monto: Decimal,

    pub registro_id: Id,

    /// Payment method code (cash, card, transfer, ...)
    #[validate(length(min = 1, max = 20))]
    pub medio_pago_id: String,
}

entity!(Payment, "pagos", "Payment");

/// Running document number per movement type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Consecutive {
    #[serde(default)]
    pub id: Id,

    #[validate(custom = "non_negative")]
    pub consecutivo: Decimal,

    pub tipo_movimiento_id: Id,

    #[serde(default)]
    pub descripcion: String,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub tipo_movimiento: Option<MovementType>,
}

entity!(Consecutive, "consecutivos", "Consecutive");
