//! Inventory records: categories, statuses and articles

use inv_core::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::entity;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,
}

entity!(Category, "categorias", "Category");

/// Lifecycle status an article can be in (active, discontinued, ...)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 50))]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,
}

entity!(Status, "estados", "Status");

/// Stock-keeping article, looked up by its code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: Id,

    #[validate(length(min = 1, max = 50, message = "can't be blank"))]
    pub codigo: String,

    #[validate(length(min = 1, max = 150))]
    pub nombre: String,

    #[serde(default)]
    pub descripcion: String,

    #[serde(default)]
    #[validate(custom = "non_negative")]
    pub precio_compra: Decimal,

    #[serde(default)]
    #[validate(custom = "non_negative")]
    pub precio_venta: Decimal,

    #[serde(default)]
    #[validate(custom = "non_negative")]
    pub stock: Decimal,

    pub categoria_id: Id,

    pub unidad_medida_id: Option<Id>,

    pub estado_id: Option<Id>,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub categoria: Option<Category>,
}

entity!(Article, "articulos", "Article");

pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("must not be negative".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn article() -> Article {
        Article {
            codigo: "A-001".into(),
            nombre: "Tornillo".into(),
            precio_compra: Decimal::from_str("120.50").unwrap(),
            precio_venta: Decimal::from_str("180").unwrap(),
            stock: Decimal::from(40),
            categoria_id: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_article() {
        assert!(article().validate().is_ok());
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let mut article = article();
        article.stock = Decimal::from(-1);

        let errors = article.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn test_prices_serialize_as_strings() {
        let json = serde_json::to_value(article()).unwrap();

        assert_eq!(json["precioCompra"], "120.50");
        assert_eq!(json["categoriaId"], 2);
        assert!(json["categoria"].is_null());
    }

    #[test]
    fn test_prices_accept_numbers() {
        let article: Article = serde_json::from_value(serde_json::json!({
            "codigo": "A-002",
            "nombre": "Tuerca",
            "precioVenta": 99.9,
            "categoriaId": 1
        }))
        .unwrap();

        assert_eq!(article.precio_venta, Decimal::from_str("99.9").unwrap());
        assert_eq!(article.stock, Decimal::ZERO);
    }
}
