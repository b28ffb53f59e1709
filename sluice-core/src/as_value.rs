use crate::{Error, Interval, Result, Value};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::{any, borrow::Cow, fmt::Display};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between native Rust types and the typed [`Value`] representation
/// used for bound parameters and decoded parameter values.
///
/// # Conversion contract
/// - `as_empty_value` returns the NULL value of the type, it never allocates.
/// - `try_from_value` accepts the canonical variant of the type and, for
///   integers, any other integer width as long as the value is in range.
/// - NULL values only convert into `Option<T>`.
///
/// # Examples
/// ```rust
/// use sluice_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i64 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue<'a>: Sized {
    /// The NULL value of the type.
    fn as_empty_value() -> Value<'a>;
    /// Convert into the canonical [`Value`] variant.
    fn as_value(self) -> Value<'a>;
    /// Convert a [`Value`] back into `Self`.
    fn try_from_value(value: Value<'a>) -> Result<Self>;
}

impl<'a, T: AsValue<'a>> From<T> for Value<'a> {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {value:?} to {}",
        any::type_name::<T>()
    ))
}

fn narrow_integer<S, T>(value: S) -> Result<T>
where
    S: Copy + Display,
    T: TryFrom<S>,
{
    T::try_from(value).map_err(|_| {
        Error::msg(format!(
            "Value {value} is out of range for {}",
            any::type_name::<T>()
        ))
    })
}

macro_rules! impl_as_value_integer {
    ($($source:ty => $destination:path, $to_primitive:ident;)+) => {$(
        impl<'a> AsValue<'a> for $source {
            fn as_empty_value() -> Value<'a> {
                $destination(None)
            }
            fn as_value(self) -> Value<'a> {
                $destination(Some(self))
            }
            fn try_from_value(value: Value<'a>) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v),
                    #[allow(unreachable_patterns)]
                    Value::Int8(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::Int16(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::Int32(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::Int64(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::Int128(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt8(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt16(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt32(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt64(Some(v)) => narrow_integer(v),
                    #[allow(unreachable_patterns)]
                    Value::UInt128(Some(v)) => narrow_integer(v),
                    Value::Decimal(Some(v), ..) => {
                        let error = Error::msg(format!(
                            "Value {v}: Decimal does not fit into {}",
                            any::type_name::<Self>()
                        ));
                        if !v.is_integer() {
                            return Err(error.context("The value is not a integer"));
                        }
                        v.$to_primitive().ok_or(error)
                    }
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    )+};
}
impl_as_value_integer! {
    i8 => Value::Int8, to_i8;
    i16 => Value::Int16, to_i16;
    i32 => Value::Int32, to_i32;
    i64 => Value::Int64, to_i64;
    i128 => Value::Int128, to_i128;
    u8 => Value::UInt8, to_u8;
    u16 => Value::UInt16, to_u16;
    u32 => Value::UInt32, to_u32;
    u64 => Value::UInt64, to_u64;
    u128 => Value::UInt128, to_u128;
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl<'a> AsValue<'a> for $source {
            fn as_empty_value() -> Value<'a> {
                $destination(None)
            }
            fn as_value(self) -> Value<'a> {
                $destination(Some(self.into()))
            }
            fn try_from_value(value: Value<'a>) -> Result<Self> {
                match value {
                    $destination(Some(v)) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(
    bool,
    Value::Boolean,
    Value::Int8(Some(v)) => Ok(v != 0),
    Value::Int16(Some(v)) => Ok(v != 0),
    Value::Int32(Some(v)) => Ok(v != 0),
    Value::Int64(Some(v)) => Ok(v != 0),
    Value::UInt8(Some(v)) => Ok(v != 0),
    Value::UInt16(Some(v)) => Ok(v != 0),
    Value::UInt32(Some(v)) => Ok(v != 0),
    Value::UInt64(Some(v)) => Ok(v != 0),
);
impl_as_value!(
    f32,
    Value::Float32,
    Value::Float64(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v), ..) => Ok(v.try_into()?),
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Float32(Some(v)) => Ok(v as _),
    Value::Decimal(Some(v), ..) => Ok(v.try_into()?),
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Char(Some(v)) => Ok(v.into()),
);
impl_as_value!(Vec<u8>, Value::Blob);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(
    PrimitiveDateTime,
    Value::Timestamp,
    Value::TimestampWithTimezone(Some(v)) => {
        let v = v.to_utc();
        Ok(PrimitiveDateTime::new(v.date(), v.time()))
    },
);
impl_as_value!(
    OffsetDateTime,
    Value::TimestampWithTimezone,
    Value::Timestamp(Some(v)) => Ok(v.assume_utc()),
);
impl_as_value!(Interval, Value::Interval);
impl_as_value!(Uuid, Value::Uuid);

impl<'a> AsValue<'a> for Decimal {
    fn as_empty_value() -> Value<'a> {
        Value::Decimal(None, 0, 0)
    }
    fn as_value(self) -> Value<'a> {
        Value::Decimal(Some(self), 0, 0)
    }
    fn try_from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Decimal(Some(v), ..) => Ok(v),
            Value::Int8(Some(v)) => Ok(v.into()),
            Value::Int16(Some(v)) => Ok(v.into()),
            Value::Int32(Some(v)) => Ok(v.into()),
            Value::Int64(Some(v)) => Ok(v.into()),
            Value::UInt8(Some(v)) => Ok(v.into()),
            Value::UInt16(Some(v)) => Ok(v.into()),
            Value::UInt32(Some(v)) => Ok(v.into()),
            Value::UInt64(Some(v)) => Ok(v.into()),
            Value::Float64(Some(v)) => Ok(v.try_into()?),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<'a> AsValue<'a> for char {
    fn as_empty_value() -> Value<'a> {
        Value::Char(None)
    }
    fn as_value(self) -> Value<'a> {
        Value::Char(Some(self))
    }
    fn try_from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Char(Some(v)) => Ok(v),
            Value::Varchar(Some(ref v)) => {
                let mut chars = v.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<'a> AsValue<'a> for Cow<'a, str> {
    fn as_empty_value() -> Value<'a> {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value<'a> {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            Value::Char(Some(v)) => Ok(Cow::Owned(v.into())),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<'a> AsValue<'a> for Cow<'a, [u8]> {
    fn as_empty_value() -> Value<'a> {
        Value::Blob(None)
    }
    fn as_value(self) -> Value<'a> {
        Value::Blob(Some(self))
    }
    fn try_from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<'a> AsValue<'a> for &'a str {
    fn as_empty_value() -> Value<'a> {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value<'a> {
        Value::Varchar(Some(Cow::Borrowed(self)))
    }
    fn try_from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Varchar(Some(Cow::Borrowed(v))) => Ok(v),
            _ => Err(mismatch::<Self>(&value).context("Only values borrowing their text can be converted to &str, use String instead")),
        }
    }
}

impl<'a> AsValue<'a> for &'a [u8] {
    fn as_empty_value() -> Value<'a> {
        Value::Blob(None)
    }
    fn as_value(self) -> Value<'a> {
        Value::Blob(Some(Cow::Borrowed(self)))
    }
    fn try_from_value(value: Value<'a>) -> Result<Self> {
        match value {
            Value::Blob(Some(Cow::Borrowed(v))) => Ok(v),
            _ => Err(mismatch::<Self>(&value).context("Only values borrowing their bytes can be converted to &[u8], use Vec<u8> instead")),
        }
    }
}

impl<'a, T: AsValue<'a>> AsValue<'a> for Option<T> {
    fn as_empty_value() -> Value<'a> {
        T::as_empty_value()
    }
    fn as_value(self) -> Value<'a> {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value<'a>) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}
