use crate::{Interval, LogicalType};
use rust_decimal::Decimal;
use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// A typed parameter value, as handed to generated code.
///
/// Each variant corresponds to exactly one [`LogicalType`], the payload is
/// `None` when the value is SQL NULL. Text and binary payloads borrow from the
/// runtime parameter buffer they were decoded from, use
/// [`Value::into_owned`] to detach them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    Int128(Option<i128>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    UInt128(Option<u128>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>, /* precision: */ u8, /* scale: */ u8),
    Char(Option<char>),
    Varchar(Option<Cow<'a, str>>),
    Blob(Option<Cow<'a, [u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Interval(Option<Interval>),
    Uuid(Option<Uuid>),
}

impl<'a> Value<'a> {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Value::Boolean(..) => LogicalType::Boolean,
            Value::Int8(..) => LogicalType::TinyInt,
            Value::Int16(..) => LogicalType::SmallInt,
            Value::Int32(..) => LogicalType::Integer,
            Value::Int64(..) => LogicalType::BigInt,
            Value::Int128(..) => LogicalType::HugeInt,
            Value::UInt8(..) => LogicalType::UTinyInt,
            Value::UInt16(..) => LogicalType::USmallInt,
            Value::UInt32(..) => LogicalType::UInteger,
            Value::UInt64(..) => LogicalType::UBigInt,
            Value::UInt128(..) => LogicalType::UHugeInt,
            Value::Float32(..) => LogicalType::Float,
            Value::Float64(..) => LogicalType::Double,
            Value::Decimal(.., precision, scale) => LogicalType::Decimal {
                precision: *precision,
                scale: *scale,
            },
            Value::Char(..) => LogicalType::Char,
            Value::Varchar(..) => LogicalType::Varchar,
            Value::Blob(..) => LogicalType::Blob,
            Value::Date(..) => LogicalType::Date,
            Value::Time(..) => LogicalType::Time,
            Value::Timestamp(..) => LogicalType::Timestamp,
            Value::TimestampWithTimezone(..) => LogicalType::TimestampTz,
            Value::Interval(..) => LogicalType::Interval,
            Value::Uuid(..) => LogicalType::Uuid,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::Int128(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::UInt128(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v, ..) => v.is_none(),
            Value::Char(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Interval(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
        }
    }

    pub fn same_type(&self, other: &Value) -> bool {
        self.logical_type() == other.logical_type()
    }

    /// Detach the value from the buffer it borrows from.
    pub fn into_owned(self) -> Value<'static> {
        let value = self;
        macro_rules! owned {
            ($($variant:ident),+ $(,)?) => {
                match value {
                    $(Value::$variant(v) => Value::$variant(v),)+
                    Value::Decimal(v, precision, scale) => Value::Decimal(v, precision, scale),
                    Value::Varchar(v) => Value::Varchar(v.map(|v| Cow::Owned(v.into_owned()))),
                    Value::Blob(v) => Value::Blob(v.map(|v| Cow::Owned(v.into_owned()))),
                }
            };
        }
        owned!(
            Boolean,
            Int8,
            Int16,
            Int32,
            Int64,
            Int128,
            UInt8,
            UInt16,
            UInt32,
            UInt64,
            UInt128,
            Float32,
            Float64,
            Char,
            Date,
            Time,
            Timestamp,
            TimestampWithTimezone,
            Interval,
            Uuid,
        )
    }
}

/// Renders the value as a SQL literal.
impl Display for Value<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            v if v.is_null() => f.write_str("NULL"),
            Value::Boolean(Some(v)) => f.write_str(["false", "true"][*v as usize]),
            Value::Int8(Some(v)) => write!(f, "{v}"),
            Value::Int16(Some(v)) => write!(f, "{v}"),
            Value::Int32(Some(v)) => write!(f, "{v}"),
            Value::Int64(Some(v)) => write!(f, "{v}"),
            Value::Int128(Some(v)) => write!(f, "{v}"),
            Value::UInt8(Some(v)) => write!(f, "{v}"),
            Value::UInt16(Some(v)) => write!(f, "{v}"),
            Value::UInt32(Some(v)) => write!(f, "{v}"),
            Value::UInt64(Some(v)) => write!(f, "{v}"),
            Value::UInt128(Some(v)) => write!(f, "{v}"),
            Value::Float32(Some(v)) => write_float(f, *v as f64, "FLOAT"),
            Value::Float64(Some(v)) => write_float(f, *v, "DOUBLE"),
            Value::Decimal(Some(v), ..) => write!(f, "{v}"),
            Value::Char(Some(v)) => {
                let mut buf = [0u8; 4];
                write_string(f, v.encode_utf8(&mut buf))
            }
            Value::Varchar(Some(v)) => write_string(f, v),
            Value::Blob(Some(v)) => {
                f.write_str("'")?;
                for b in v.iter() {
                    write!(f, "\\x{:02X}", b)?;
                }
                f.write_str("'")
            }
            Value::Date(Some(v)) => {
                f.write_str("'")?;
                write_date(f, v)?;
                f.write_str("'")
            }
            Value::Time(Some(v)) => {
                f.write_str("'")?;
                write_time(f, v)?;
                f.write_str("'")
            }
            Value::Timestamp(Some(v)) => write_timestamp(f, v),
            Value::TimestampWithTimezone(Some(v)) => {
                let v = v.to_utc();
                write_timestamp(f, &PrimitiveDateTime::new(v.date(), v.time()))
            }
            Value::Interval(Some(v)) => write_interval(f, v),
            Value::Uuid(Some(v)) => write!(f, "'{v}'"),
            _ => unreachable!("Non null values are all covered above"),
        }
    }
}

fn write_float(f: &mut Formatter<'_>, value: f64, sql_type: &str) -> fmt::Result {
    if value.is_nan() {
        write!(f, "CAST('NaN' AS {sql_type})")
    } else if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        write!(f, "CAST('{sign}inf' AS {sql_type})")
    } else {
        write!(f, "{value}")
    }
}

fn write_string(f: &mut Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("'")?;
    let mut pos = 0;
    for (i, c) in value.char_indices() {
        if c == '\'' {
            f.write_str(&value[pos..i])?;
            f.write_str("''")?;
            pos = i + 1;
        } else if c == '\n' {
            f.write_str(&value[pos..i])?;
            f.write_str("\\n")?;
            pos = i + 1;
        }
    }
    f.write_str(&value[pos..])?;
    f.write_str("'")
}

fn write_date(f: &mut Formatter<'_>, value: &Date) -> fmt::Result {
    write!(
        f,
        "{:04}-{:02}-{:02}",
        value.year(),
        value.month() as u8,
        value.day()
    )
}

fn write_time(f: &mut Formatter<'_>, value: &Time) -> fmt::Result {
    let mut subsecond = value.nanosecond();
    let mut width = 9;
    while width > 1 && subsecond % 10 == 0 {
        subsecond /= 10;
        width -= 1;
    }
    write!(
        f,
        "{:02}:{:02}:{:02}.{:0width$}",
        value.hour(),
        value.minute(),
        value.second(),
        subsecond
    )
}

fn write_timestamp(f: &mut Formatter<'_>, value: &PrimitiveDateTime) -> fmt::Result {
    f.write_str("'")?;
    write_date(f, &value.date())?;
    f.write_str("T")?;
    write_time(f, &value.time())?;
    f.write_str("'")
}

fn write_interval(f: &mut Formatter<'_>, value: &Interval) -> fmt::Result {
    const UNITS: &[(&str, i128)] = &[
        ("DAY", Interval::NANOS_IN_DAY),
        ("HOUR", Interval::NANOS_IN_SEC * 3600),
        ("MINUTE", Interval::NANOS_IN_SEC * 60),
        ("SECOND", Interval::NANOS_IN_SEC),
        ("MICROSECOND", 1_000),
        ("NANOSECOND", 1),
    ];
    let mut first = true;
    let mut write_unit = |f: &mut Formatter<'_>, value: i128, unit: &str| -> fmt::Result {
        if !first {
            f.write_str(" ")?;
        }
        first = false;
        write!(f, "{} {}{}", value, unit, if value != 1 { "S" } else { "" })
    };
    f.write_str("INTERVAL '")?;
    if value.is_zero() {
        f.write_str("0 SECONDS")?;
    }
    let mut months = value.months;
    if months != 0 {
        if months > 48 || months % 12 == 0 {
            write_unit(f, (months / 12) as i128, "YEAR")?;
            months %= 12;
        }
        if months != 0 {
            write_unit(f, months as i128, "MONTH")?;
        }
    }
    let mut nanos = value.nanos + value.days as i128 * Interval::NANOS_IN_DAY;
    for &(name, factor) in UNITS {
        if nanos == 0 {
            break;
        }
        let rem = nanos % factor;
        if rem == 0 || factor / rem > 1_000_000 {
            let value = nanos / factor;
            if value != 0 {
                write_unit(f, value, name)?;
                nanos = rem;
            }
        }
    }
    f.write_str("'")
}
