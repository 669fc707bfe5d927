//! Field values and tri-state PATCH fields.
//!
//! Update payloads carry heterogeneous scalars (text, numbers, booleans,
//! explicit SQL NULL). [`FieldValue`] models that as one tagged union that
//! binds directly as a positional query parameter, keeping NULL a
//! first-class value distinct from "field not supplied" — the latter is
//! [`Patch::Absent`].

use bytes::BytesMut;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A single update or filter value, ready for positional binding.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// 64-bit integer value (narrowed to the target column width on bind)
    Int(i64),
    /// Double precision value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Exact-precision numeric value (Postgres NUMERIC)
    Numeric(Decimal),
    /// SQL NULL
    Null,
}

impl ToSql for FieldValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            FieldValue::Null => Ok(IsNull::Yes),
            FieldValue::Text(v) => v.to_sql(ty, out),
            FieldValue::Int(v) => {
                // The server infers the parameter type from the target
                // column; narrow to match it.
                if *ty == Type::INT2 {
                    i16::try_from(*v)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*v)?.to_sql(ty, out)
                } else if *ty == Type::NUMERIC {
                    Decimal::from(*v).to_sql(ty, out)
                } else {
                    v.to_sql(ty, out)
                }
            }
            FieldValue::Float(v) => {
                if *ty == Type::FLOAT4 {
                    (*v as f32).to_sql(ty, out)
                } else {
                    v.to_sql(ty, out)
                }
            }
            FieldValue::Bool(v) => v.to_sql(ty, out),
            FieldValue::Numeric(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // Heterogeneous by design; mismatches surface when the variant's
        // underlying encoder runs.
        true
    }

    to_sql_checked!();
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        FieldValue::Numeric(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => FieldValue::Null,
        }
    }
}

/// Borrow a value sequence as driver parameters for `$1..$n`.
pub fn as_params(values: &[FieldValue]) -> Vec<&(dyn ToSql + Sync)> {
    values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

/// A tri-state PATCH field: not supplied, explicit SQL NULL, or a value.
///
/// `Option<T>` cannot tell a missing JSON key from an explicit `null`, and a
/// partial update must treat them differently: a missing key leaves the
/// column alone, a `null` writes SQL NULL. Payload structs mark every field
/// `#[serde(default)]` so missing keys become [`Patch::Absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not present in the payload.
    Absent,
    /// Field was present as an explicit `null`.
    Null,
    /// Field was present with a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the field was not supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
