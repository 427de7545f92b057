use crate::{Error, Result, Value};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::any;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// It is what moves entity fields into bound parameters (`as_value`) and row
/// cells back into entity fields (`try_from_value`).
///
/// # Conversion contract
/// - `as_value` never fails and never performs lossy transformations.
/// - `try_from_value` accepts the canonical variant of the type and, for
///   integers, any other integer variant whose value fits (range checked).
/// - A NULL converts only into `Option<T>`; every other type reports an error.
///
/// # Examples
/// ```rust
/// use sluice_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert_eq!(v, Value::Int32(Some(42)));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The typed NULL of this type.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(Some(value.into()))
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>(),
    ))
}

macro_rules! impl_as_value_integer {
    ($source:ty, $destination:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let converted = match &value {
                    $destination(Some(v)) => return Ok(*v),
                    #[allow(unreachable_patterns)]
                    Value::Int8(Some(v)) => <$source>::try_from(*v).ok(),
                    #[allow(unreachable_patterns)]
                    Value::Int16(Some(v)) => <$source>::try_from(*v).ok(),
                    #[allow(unreachable_patterns)]
                    Value::Int32(Some(v)) => <$source>::try_from(*v).ok(),
                    #[allow(unreachable_patterns)]
                    Value::Int64(Some(v)) => <$source>::try_from(*v).ok(),
                    #[allow(unreachable_patterns)]
                    Value::UInt8(Some(v)) => <$source>::try_from(*v).ok(),
                    #[allow(unreachable_patterns)]
                    Value::UInt16(Some(v)) => <$source>::try_from(*v).ok(),
                    #[allow(unreachable_patterns)]
                    Value::UInt32(Some(v)) => <$source>::try_from(*v).ok(),
                    #[allow(unreachable_patterns)]
                    Value::UInt64(Some(v)) => <$source>::try_from(*v).ok(),
                    Value::Decimal(Some(v)) if v.is_integer() => {
                        v.to_i128().and_then(|v| <$source>::try_from(v).ok())
                    }
                    _ => return Err(conversion_error::<Self>(&value)),
                };
                converted.ok_or_else(|| {
                    Error::msg(format!(
                        "Value {value:?} is out of range for {}",
                        any::type_name::<Self>(),
                    ))
                })
            }
        }
    };
}
impl_as_value_integer!(i8, Value::Int8);
impl_as_value_integer!(i16, Value::Int16);
impl_as_value_integer!(i32, Value::Int32);
impl_as_value_integer!(i64, Value::Int64);
impl_as_value_integer!(u8, Value::UInt8);
impl_as_value_integer!(u16, Value::UInt16);
impl_as_value_integer!(u32, Value::UInt32);
impl_as_value_integer!(u64, Value::UInt64);

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $destination(None)
            }
            fn as_value(self) -> Value {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    _ => Err(conversion_error::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(
    bool,
    Value::Boolean,
    Value::Int8(Some(v)) => Ok(v != 0),
    Value::Int32(Some(v)) => Ok(v != 0),
    Value::Int64(Some(v)) => Ok(v != 0),
    Value::UInt8(Some(v)) => Ok(v != 0),
    Value::UInt64(Some(v)) => Ok(v != 0),
);
impl_as_value!(
    f32,
    Value::Float32,
    Value::Float64(Some(v)) => {
        let result = v as f32;
        if v.is_finite() && result as f64 != v {
            return Err(Error::msg(format!("Value {v}: f64 does not fit into f32")));
        }
        Ok(result)
    },
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v)) => Ok(v as f64),
    Value::Decimal(Some(v)) => v
        .to_f64()
        .ok_or_else(|| Error::msg(format!("Value {v}: Decimal does not fit into f64"))),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Int64(Some(v)) => Ok(Decimal::from(v)),
    Value::UInt64(Some(v)) => Ok(Decimal::from(v)),
    Value::Varchar(Some(ref v)) => v
        .parse::<Decimal>()
        .map_err(|e| Error::new(e).context(format!("Cannot parse `{v}` as Decimal"))),
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Blob(Some(v)) => String::from_utf8(v.into_vec())
        .map_err(|e| Error::new(e).context("The blob is not a valid UTF-8 string")),
);
impl_as_value!(
    Vec<u8>,
    Value::Blob,
    Value::Varchar(Some(v)) => Ok(v.into_bytes()),
);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(
    OffsetDateTime,
    Value::TimestampWithTimezone,
    Value::Timestamp(Some(v)) => Ok(v.assume_utc()),
);
impl_as_value!(
    Uuid,
    Value::Uuid,
    Value::Varchar(Some(ref v)) => Uuid::parse_str(v)
        .map_err(|e| Error::new(e).context(format!("Cannot parse `{v}` as Uuid"))),
    Value::Blob(Some(ref v)) => Uuid::from_slice(v)
        .map_err(|e| Error::new(e).context("The blob is not a valid Uuid")),
);

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}
