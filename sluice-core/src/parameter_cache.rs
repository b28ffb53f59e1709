use crate::{
    Error, LogicalType, ParameterInfo, ParameterLayout, ParameterMap, Result, RuntimeParameters,
    Value,
    conversions::{
        days_to_date, mantissa_to_decimal, micros_to_time, micros_to_timestamp,
        micros_to_timestamptz, parts_to_interval,
    },
};
use std::borrow::Cow;
use time::PrimitiveDateTime;
use uuid::Uuid;

/// Typed values of the parameters of one query compilation, derived on first
/// use and reused for every later reference.
///
/// A cache belongs to a single compilation pass: it borrows the
/// [`ParameterMap`] of the statement and the [`RuntimeParameters`] of the
/// invocation, and is dropped with the pass. Text and binary values borrow
/// the runtime buffer instead of copying it.
///
/// # Examples
/// ```rust
/// use sluice_core::*;
/// let map = ParameterMap::from_type_names([("INTEGER", false), ("VARCHAR", true)])?;
/// let mut buffer = ParameterBuffer::new(&map);
/// buffer.bind(42)?.bind(None::<String>)?;
/// let mut cache = ParameterCache::new(&map, buffer.as_runtime());
/// assert_eq!(cache.get_value(0)?, &Value::Int32(Some(42)));
/// assert!(cache.get_value(1)?.is_null());
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug)]
pub struct ParameterCache<'m, 'a> {
    map: &'m ParameterMap,
    parameters: RuntimeParameters<'a>,
    values: Vec<Option<Value<'a>>>,
    derived: usize,
}

impl<'m, 'a> ParameterCache<'m, 'a> {
    pub fn new(map: &'m ParameterMap, parameters: RuntimeParameters<'a>) -> Self {
        Self {
            map,
            parameters,
            values: vec![None; map.len()],
            derived: 0,
        }
    }

    /// Typed value of parameter `index`.
    ///
    /// The value is derived from the runtime buffer the first time it is
    /// requested, the same value is returned afterwards without reading the
    /// buffer again. A failed derivation caches nothing.
    ///
    /// # Panics
    /// If `index` is not in the parameter map, see [`ParameterMap::get`].
    pub fn get_value(&mut self, index: u32) -> Result<&Value<'a>> {
        let map = self.map;
        let info = *map.get(index);
        let parameters = self.parameters;
        let entry = &mut self.values[index as usize];
        let value = match entry {
            Some(value) => {
                log::trace!("Parameter {} served from the cache", index);
                value
            }
            None => {
                let value = derive_parameter_value(&parameters, map.layout(), index, &info)
                    .map_err(|e| {
                        let error = e.context(format!(
                            "While deriving the value of parameter {} ({})",
                            index, info.logical_type
                        ));
                        log::error!("{:#}", error);
                        error
                    })?;
                log::trace!(
                    "Derived parameter {} as {}{}",
                    index,
                    info.logical_type,
                    if value.is_null() { " (NULL)" } else { "" }
                );
                self.derived += 1;
                entry.insert(value)
            }
        };
        Ok(value)
    }

    /// The value of parameter `index` if it was already derived.
    pub fn cached(&self, index: u32) -> Option<&Value<'a>> {
        self.values.get(index as usize).and_then(Option::as_ref)
    }

    /// How many values were derived from the runtime buffer so far.
    pub fn derived_count(&self) -> usize {
        self.derived
    }

    pub fn map(&self) -> &'m ParameterMap {
        self.map
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decode parameter `index` from the runtime buffer according to its declared type.
fn derive_parameter_value<'a>(
    parameters: &RuntimeParameters<'a>,
    layout: &ParameterLayout,
    index: u32,
    info: &ParameterInfo,
) -> Result<Value<'a>> {
    if parameters.is_null(index)? {
        if !info.nullable {
            return Err(Error::msg(format!(
                "Parameter {} is NULL but its type {} is not nullable",
                index, info.logical_type
            )));
        }
        return Ok(info.logical_type.empty_value());
    }
    let slot = layout.offset(index);
    macro_rules! fixed {
        ($ty:ty) => {
            <$ty>::from_le_bytes(parameters.read_array(slot)?)
        };
        ($ty:ty, $offset:expr) => {
            <$ty>::from_le_bytes(parameters.read_array(slot + $offset)?)
        };
    }
    Ok(match info.logical_type {
        LogicalType::Boolean => Value::Boolean(Some(match fixed!(u8) {
            0 => false,
            1 => true,
            v => return Err(Error::msg(format!("Byte {v} is not a valid boolean"))),
        })),
        LogicalType::TinyInt => Value::Int8(Some(fixed!(i8))),
        LogicalType::SmallInt => Value::Int16(Some(fixed!(i16))),
        LogicalType::Integer => Value::Int32(Some(fixed!(i32))),
        LogicalType::BigInt => Value::Int64(Some(fixed!(i64))),
        LogicalType::HugeInt => Value::Int128(Some(fixed!(i128))),
        LogicalType::UTinyInt => Value::UInt8(Some(fixed!(u8))),
        LogicalType::USmallInt => Value::UInt16(Some(fixed!(u16))),
        LogicalType::UInteger => Value::UInt32(Some(fixed!(u32))),
        LogicalType::UBigInt => Value::UInt64(Some(fixed!(u64))),
        LogicalType::UHugeInt => Value::UInt128(Some(fixed!(u128))),
        LogicalType::Float => Value::Float32(Some(fixed!(f32))),
        LogicalType::Double => Value::Float64(Some(fixed!(f64))),
        LogicalType::Decimal { precision, scale } => Value::Decimal(
            Some(mantissa_to_decimal(fixed!(i128), scale)?),
            precision,
            scale,
        ),
        LogicalType::Char => {
            let code = fixed!(u32);
            Value::Char(Some(char::from_u32(code).ok_or_else(|| {
                Error::msg(format!("Code point {code:#x} is not a valid character"))
            })?))
        }
        LogicalType::Varchar => {
            let bytes = parameters.read_variable(slot)?;
            let text = std::str::from_utf8(bytes)
                .map_err(|e| Error::new(e).context("The text parameter is not valid UTF-8"))?;
            Value::Varchar(Some(Cow::Borrowed(text)))
        }
        LogicalType::Blob => Value::Blob(Some(Cow::Borrowed(parameters.read_variable(slot)?))),
        LogicalType::Date => Value::Date(Some(days_to_date(fixed!(i32))?)),
        LogicalType::Time => Value::Time(Some(micros_to_time(fixed!(i64))?)),
        LogicalType::Timestamp => {
            let v = micros_to_timestamp(fixed!(i64))?;
            Value::Timestamp(Some(PrimitiveDateTime::new(v.date(), v.time())))
        }
        LogicalType::TimestampTz => Value::TimestampWithTimezone(Some(micros_to_timestamptz(
            fixed!(i64),
            fixed!(i32, 8),
        )?)),
        LogicalType::Interval => Value::Interval(Some(parts_to_interval(
            fixed!(i32),
            fixed!(i32, 4),
            fixed!(i64, 8),
        ))),
        LogicalType::Uuid => Value::Uuid(Some(Uuid::from_bytes(parameters.read_array(slot)?))),
    })
}
