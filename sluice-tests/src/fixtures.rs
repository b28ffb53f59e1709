use rust_decimal::Decimal;
use sluice::{Interval, LogicalType, ParameterInfo, ParameterMap, Value};
use std::borrow::Cow;
use time::macros::{date, datetime, time};
use uuid::Uuid;

/// One parameter of every logical type, paired with a value that survives the
/// runtime encoding unchanged (times carry at most microseconds).
pub fn all_types() -> Vec<(ParameterInfo, Value<'static>)> {
    let decimal = LogicalType::Decimal {
        precision: 10,
        scale: 2,
    };
    vec![
        (
            ParameterInfo::new(LogicalType::Boolean, false),
            Value::Boolean(Some(true)),
        ),
        (
            ParameterInfo::new(LogicalType::TinyInt, true),
            Value::Int8(Some(-8)),
        ),
        (
            ParameterInfo::new(LogicalType::SmallInt, false),
            Value::Int16(Some(-1600)),
        ),
        (
            ParameterInfo::new(LogicalType::Integer, true),
            Value::Int32(Some(42)),
        ),
        (
            ParameterInfo::new(LogicalType::BigInt, false),
            Value::Int64(Some(-9_876_543_210)),
        ),
        (
            ParameterInfo::new(LogicalType::HugeInt, true),
            Value::Int128(Some(i128::MIN + 1)),
        ),
        (
            ParameterInfo::new(LogicalType::UTinyInt, false),
            Value::UInt8(Some(255)),
        ),
        (
            ParameterInfo::new(LogicalType::USmallInt, true),
            Value::UInt16(Some(65_000)),
        ),
        (
            ParameterInfo::new(LogicalType::UInteger, false),
            Value::UInt32(Some(4_000_000_000)),
        ),
        (
            ParameterInfo::new(LogicalType::UBigInt, true),
            Value::UInt64(Some(u64::MAX)),
        ),
        (
            ParameterInfo::new(LogicalType::UHugeInt, false),
            Value::UInt128(Some(u128::MAX)),
        ),
        (
            ParameterInfo::new(LogicalType::Float, true),
            Value::Float32(Some(1.5)),
        ),
        (
            ParameterInfo::new(LogicalType::Double, false),
            Value::Float64(Some(-2.25e100)),
        ),
        (
            ParameterInfo::new(decimal, true),
            Value::Decimal(Some(Decimal::new(-12345, 2)), 10, 2),
        ),
        (
            ParameterInfo::new(LogicalType::Char, false),
            Value::Char(Some('ß')),
        ),
        (
            ParameterInfo::new(LogicalType::Varchar, true),
            Value::Varchar(Some(Cow::Borrowed("Hello, wörld! It's me"))),
        ),
        (
            ParameterInfo::new(LogicalType::Blob, false),
            Value::Blob(Some(Cow::Owned(vec![0x00, 0x01, 0x7F, 0xFF]))),
        ),
        (
            ParameterInfo::new(LogicalType::Date, true),
            Value::Date(Some(date!(2024 - 02 - 29))),
        ),
        (
            ParameterInfo::new(LogicalType::Time, false),
            Value::Time(Some(time!(13:45:07.123456))),
        ),
        (
            ParameterInfo::new(LogicalType::Timestamp, true),
            Value::Timestamp(Some(datetime!(1969-07-20 20:17:40.5))),
        ),
        (
            ParameterInfo::new(LogicalType::TimestampTz, false),
            Value::TimestampWithTimezone(Some(datetime!(2025-10-18 09:30:00.000001 +02:00))),
        ),
        (
            ParameterInfo::new(LogicalType::Interval, true),
            Value::Interval(Some(Interval::new(14, -3, 5_400_000_000_000))),
        ),
        (
            ParameterInfo::new(LogicalType::Uuid, false),
            Value::Uuid(Some(Uuid::from_u128(
                0x5e915574_bb30_4430_98cf_c5854f61fbbd,
            ))),
        ),
    ]
}

pub fn all_types_map() -> ParameterMap {
    all_types().into_iter().map(|(info, _)| info).collect()
}
