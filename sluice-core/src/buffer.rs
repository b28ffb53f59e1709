use crate::{
    Error, LogicalType, ParameterInfo, ParameterMap, Prepared, Result, Value,
    conversions::{
        date_to_days, decimal_to_mantissa, interval_to_parts, time_to_micros, timestamp_to_micros,
    },
};
use std::{
    borrow::Cow,
    fmt::{self, Display},
};

/// Read-only view over the parameters of one invocation, as handed over by
/// the runtime: the packed parameter bytes and the null bitmap.
///
/// Bit `i` of the bitmap (least significant bit first) is set when
/// parameter `i` is NULL.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeParameters<'a> {
    data: &'a [u8],
    nulls: &'a [u8],
}

impl<'a> RuntimeParameters<'a> {
    pub const fn new(data: &'a [u8], nulls: &'a [u8]) -> Self {
        Self { data, nulls }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn nulls(&self) -> &'a [u8] {
        self.nulls
    }

    /// The `len` bytes starting at `offset`.
    pub fn read(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| {
                Error::msg(format!(
                    "Read of {} bytes at offset {} is outside the parameter buffer ({} bytes)",
                    len,
                    offset,
                    self.data.len()
                ))
            })
    }

    pub fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let mut result = [0; N];
        result.copy_from_slice(self.read(offset, N)?);
        Ok(result)
    }

    /// The bytes referenced by the variable-length descriptor stored at `slot`.
    pub fn read_variable(&self, slot: usize) -> Result<&'a [u8]> {
        let offset = u64::from_le_bytes(self.read_array(slot)?);
        let len = u64::from_le_bytes(self.read_array(slot + 8)?);
        let (Ok(offset), Ok(len)) = (usize::try_from(offset), usize::try_from(len)) else {
            return Err(Error::msg(format!(
                "Descriptor (offset: {offset}, length: {len}) does not fit the address space"
            )));
        };
        self.read(offset, len)
    }

    pub fn is_null(&self, index: u32) -> Result<bool> {
        let Some(byte) = self.nulls.get(index as usize / 8) else {
            return Err(Error::msg(format!(
                "The null bitmap ({} bytes) has no entry for parameter {}",
                self.nulls.len(),
                index
            )));
        };
        Ok(byte & (1 << (index % 8)) != 0)
    }
}

/// Owned runtime buffer of a statement invocation, filled by binding values.
///
/// Each bound value is checked against the [`ParameterMap`] and written in its
/// canonical encoding, [`ParameterBuffer::as_runtime`] then exposes the result
/// as the [`RuntimeParameters`] a compiled query reads.
#[derive(Debug, Clone)]
pub struct ParameterBuffer<'m> {
    map: &'m ParameterMap,
    data: Vec<u8>,
    nulls: Vec<u8>,
    bound: Vec<bool>,
    index: u32,
}

impl<'m> ParameterBuffer<'m> {
    pub fn new(map: &'m ParameterMap) -> Self {
        let layout = map.layout();
        Self {
            map,
            data: vec![0; layout.fixed_size()],
            nulls: vec![0; layout.nulls_size()],
            bound: vec![false; map.len()],
            index: 0,
        }
    }

    pub fn map(&self) -> &'m ParameterMap {
        self.map
    }

    /// True when every parameter has a value (possibly NULL).
    pub fn is_complete(&self) -> bool {
        self.bound.iter().all(|v| *v)
    }

    pub fn as_runtime(&self) -> RuntimeParameters<'_> {
        RuntimeParameters::new(&self.data, &self.nulls)
    }

    /// Take the raw buffers, the packed parameter bytes and the null bitmap.
    pub fn into_inner(self) -> (Vec<u8>, Vec<u8>) {
        (self.data, self.nulls)
    }

    fn put(&mut self, slot: usize, bytes: &[u8]) {
        self.data[slot..slot + bytes.len()].copy_from_slice(bytes);
    }

    fn put_variable(&mut self, slot: usize, bytes: &[u8]) {
        let offset = self.data.len() as u64;
        self.data.extend_from_slice(bytes);
        self.put(slot, &offset.to_le_bytes());
        self.put(slot + 8, &(bytes.len() as u64).to_le_bytes());
    }

    fn set_null(&mut self, index: u32, is_null: bool) {
        let (byte, bit) = (index as usize / 8, 1u8 << (index % 8));
        if is_null {
            self.nulls[byte] |= bit;
        } else {
            self.nulls[byte] &= !bit;
        }
    }

    /// True when parameter `index` currently references bytes of the variable region.
    fn holds_variable(&self, index: u32, info: &ParameterInfo) -> bool {
        info.logical_type.is_variable_length()
            && self.bound[index as usize]
            && self.nulls[index as usize / 8] & (1 << (index % 8)) == 0
    }

    /// Rebuild the variable region without the bytes of parameter `index`.
    fn release_variable(&mut self, index: u32) -> Result<()> {
        let map = self.map;
        let layout = map.layout();
        let runtime = self.as_runtime();
        let retained = (0..map.len() as u32)
            .zip(map.iter())
            .filter(|(i, info)| *i != index && self.holds_variable(*i, info))
            .map(|(i, _)| {
                let slot = layout.offset(i);
                runtime.read_variable(slot).map(|v| (slot, v.to_vec()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.data.truncate(layout.fixed_size());
        for (slot, bytes) in retained {
            self.put_variable(slot, &bytes);
        }
        Ok(())
    }

    fn write(&mut self, index: u32, info: ParameterInfo, value: Value) -> Result<()> {
        let encoded = encode(index, &info, value)?;
        if self.holds_variable(index, &info) {
            self.release_variable(index)?;
        }
        let slot = self.map.layout().offset(index);
        match encoded {
            Encoded::Fixed(bytes, len) => {
                self.put(slot, &bytes[..len]);
                self.set_null(index, false);
            }
            Encoded::Variable(bytes) => {
                self.put_variable(slot, &bytes);
                self.set_null(index, false);
            }
            Encoded::Null => {
                let width = info.logical_type.slot_width();
                self.data[slot..slot + width].fill(0);
                self.set_null(index, true);
            }
        }
        Ok(())
    }
}

/// A value in its slot encoding, produced before the buffer is modified.
enum Encoded<'v> {
    Fixed([u8; 16], usize),
    Variable(Cow<'v, [u8]>),
    Null,
}

impl Encoded<'_> {
    fn fixed(parts: &[&[u8]]) -> Self {
        let mut bytes = [0; 16];
        let mut len = 0;
        for part in parts {
            bytes[len..len + part.len()].copy_from_slice(part);
            len += part.len();
        }
        Encoded::Fixed(bytes, len)
    }
}

fn encode<'v>(index: u32, info: &ParameterInfo, value: Value<'v>) -> Result<Encoded<'v>> {
    let declared = info.logical_type;
    let compatible = match (declared, value.logical_type()) {
        (LogicalType::Decimal { .. }, LogicalType::Decimal { .. }) => true,
        (a, b) => a == b,
    };
    if !compatible {
        return Err(Error::msg(format!(
            "Cannot bind a {} value to a parameter of type {}",
            value.logical_type(),
            declared
        )));
    }
    Ok(match value {
        Value::Boolean(Some(v)) => Encoded::fixed(&[&[v as u8]]),
        Value::Int8(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::Int16(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::Int32(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::Int64(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::Int128(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::UInt8(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::UInt16(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::UInt32(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::UInt64(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::UInt128(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::Float32(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::Float64(Some(v)) => Encoded::fixed(&[&v.to_le_bytes()]),
        Value::Decimal(Some(v), ..) => {
            let LogicalType::Decimal { precision, scale } = declared else {
                return Err(Error::msg(format!("Parameter of type {declared} is not a decimal")));
            };
            Encoded::fixed(&[&decimal_to_mantissa(&v, precision, scale)?.to_le_bytes()])
        }
        Value::Char(Some(v)) => Encoded::fixed(&[&(v as u32).to_le_bytes()]),
        Value::Varchar(Some(v)) => Encoded::Variable(match v {
            Cow::Borrowed(v) => Cow::Borrowed(v.as_bytes()),
            Cow::Owned(v) => Cow::Owned(v.into_bytes()),
        }),
        Value::Blob(Some(v)) => Encoded::Variable(v),
        Value::Date(Some(v)) => Encoded::fixed(&[&date_to_days(&v).to_le_bytes()]),
        Value::Time(Some(v)) => Encoded::fixed(&[&time_to_micros(&v).to_le_bytes()]),
        Value::Timestamp(Some(v)) => {
            Encoded::fixed(&[&timestamp_to_micros(&v.assume_utc()).to_le_bytes()])
        }
        Value::TimestampWithTimezone(Some(v)) => Encoded::fixed(&[
            &timestamp_to_micros(&v).to_le_bytes(),
            &v.offset().whole_seconds().to_le_bytes(),
        ]),
        Value::Interval(Some(v)) => {
            let (months, days, micros) = interval_to_parts(&v)?;
            Encoded::fixed(&[
                &months.to_le_bytes(),
                &days.to_le_bytes(),
                &micros.to_le_bytes(),
            ])
        }
        Value::Uuid(Some(v)) => Encoded::fixed(&[v.as_bytes()]),
        _ => {
            if !info.nullable {
                return Err(Error::msg(format!(
                    "Parameter {index} of type {declared} is not nullable"
                )));
            }
            Encoded::Null
        }
    })
}

impl Display for ParameterBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParameterBuffer[bound: {}/{}, bytes: {}]",
            self.bound.iter().filter(|v| **v).count(),
            self.bound.len(),
            self.data.len()
        )
    }
}

impl Prepared for ParameterBuffer<'_> {
    fn clear_bindings(&mut self) -> &mut Self {
        let layout = self.map.layout();
        self.data.clear();
        self.data.resize(layout.fixed_size(), 0);
        self.nulls.fill(0);
        self.bound.fill(false);
        self.index = 0;
        self
    }

    fn bind<'v, V: Into<Value<'v>>>(&mut self, value: V) -> Result<&mut Self> {
        self.bind_index(value, self.index)
    }

    /// Binding an index again replaces its value. A failed binding leaves the
    /// previous value in place, and the bytes of a replaced text or blob are
    /// reclaimed.
    fn bind_index<'v, V: Into<Value<'v>>>(&mut self, value: V, index: u32) -> Result<&mut Self> {
        let Some(info) = self.map.try_get(index).copied() else {
            let error = Error::msg(format!(
                "Parameter index {} is out of range, the statement has {} parameters",
                index,
                self.map.len()
            ));
            log::error!("{:#}", error);
            return Err(error);
        };
        if let Err(e) = self.write(index, info, value.into()) {
            let error = e.context(format!("While trying to bind the parameter {}", index));
            log::error!("{:#}", error);
            return Err(error);
        }
        self.bound[index as usize] = true;
        self.index = index + 1;
        Ok(self)
    }
}
