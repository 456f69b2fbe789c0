//! Statement parameters
//!
//! Values are bound positionally to `$1..$n`; nothing is ever spliced into
//! the SQL text.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// A single bindable value. `None` payloads bind as typed SQL `NULL`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(Option<i32>),
    Text(Option<String>),
    Decimal(Option<Decimal>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlParam {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => *v,
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Self::Int(v) => v.is_none(),
            Self::Text(v) => v.is_none(),
            Self::Decimal(v) => v.is_none(),
            Self::Timestamp(v) => v.is_none(),
        }
    }

    fn bind(&self, args: &mut PgArguments) {
        match self {
            Self::Int(v) => args.add(*v),
            Self::Text(v) => args.add(v.clone()),
            Self::Decimal(v) => args.add(*v),
            Self::Timestamp(v) => args.add(*v),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for SqlParam {
            fn from(value: $ty) -> Self {
                Self::$variant(Some(value.into()))
            }
        }

        impl From<Option<$ty>> for SqlParam {
            fn from(value: Option<$ty>) -> Self {
                Self::$variant(value.map(Into::into))
            }
        }
    };
}

impl_from!(Int, i32);
impl_from!(Text, String);
impl_from!(Text, &str);
impl_from!(Decimal, Decimal);
impl_from!(Timestamp, DateTime<Utc>);

impl From<&String> for SqlParam {
    fn from(value: &String) -> Self {
        Self::Text(Some(value.clone()))
    }
}

/// Ordered parameter list for one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<SqlParam>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value; it binds to the next `$n`
    pub fn with(mut self, value: impl Into<SqlParam>) -> Self {
        self.0.push(value.into());
        self
    }

    /// Zero-based access: `get(0)` is `$1`
    pub fn get(&self, index: usize) -> Option<&SqlParam> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SqlParam> {
        self.0.iter()
    }

    /// `$1, $2, ..., $n` for this list
    pub fn placeholders(&self) -> String {
        (1..=self.0.len())
            .map(|n| format!("${n}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn to_arguments(&self) -> PgArguments {
        let mut args = PgArguments::default();
        for param in &self.0 {
            param.bind(&mut args);
        }
        args
    }
}

impl From<Vec<SqlParam>> for Params {
    fn from(values: Vec<SqlParam>) -> Self {
        Self(values)
    }
}

/// Build a [`Params`] list from values convertible into [`SqlParam`]
///
/// ```ignore
/// let params = params![country.id, "Colombia", None::<String>];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Params::from(vec![$($crate::SqlParam::from($value)),+])
    };
}
