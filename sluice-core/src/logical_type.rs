use crate::{Error, Result, Value};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// The closed set of SQL types a parameter can resolve to.
///
/// Every variant has a fixed slot in the runtime parameter buffer (see
/// [`LogicalType::slot_width`]). Variable-length types store a 16 bytes
/// descriptor in their slot: a little-endian `u64` offset followed by a `u64`
/// length, both referring to the variable region of the same buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    HugeInt,
    UTinyInt,
    USmallInt,
    UInteger,
    UBigInt,
    UHugeInt,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    Char,
    Varchar,
    Blob,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
    Uuid,
}

impl LogicalType {
    /// Largest scale representable by `rust_decimal`.
    pub const MAX_DECIMAL_SCALE: u8 = 28;
    /// Resolution of a `DECIMAL` declared without precision and scale.
    pub const DEFAULT_DECIMAL: LogicalType = LogicalType::Decimal {
        precision: 18,
        scale: 3,
    };

    /// Size in bytes of the slot reserved for this type in the fixed region.
    pub const fn slot_width(&self) -> usize {
        match self {
            LogicalType::Boolean | LogicalType::TinyInt | LogicalType::UTinyInt => 1,
            LogicalType::SmallInt | LogicalType::USmallInt => 2,
            LogicalType::Integer
            | LogicalType::UInteger
            | LogicalType::Float
            | LogicalType::Char
            | LogicalType::Date => 4,
            LogicalType::BigInt
            | LogicalType::UBigInt
            | LogicalType::Double
            | LogicalType::Time
            | LogicalType::Timestamp => 8,
            LogicalType::TimestampTz => 12,
            LogicalType::HugeInt
            | LogicalType::UHugeInt
            | LogicalType::Decimal { .. }
            | LogicalType::Varchar
            | LogicalType::Blob
            | LogicalType::Interval
            | LogicalType::Uuid => 16,
        }
    }

    pub const fn is_variable_length(&self) -> bool {
        matches!(self, LogicalType::Varchar | LogicalType::Blob)
    }

    /// The NULL value of this type.
    pub fn empty_value(&self) -> Value<'static> {
        match *self {
            LogicalType::Boolean => Value::Boolean(None),
            LogicalType::TinyInt => Value::Int8(None),
            LogicalType::SmallInt => Value::Int16(None),
            LogicalType::Integer => Value::Int32(None),
            LogicalType::BigInt => Value::Int64(None),
            LogicalType::HugeInt => Value::Int128(None),
            LogicalType::UTinyInt => Value::UInt8(None),
            LogicalType::USmallInt => Value::UInt16(None),
            LogicalType::UInteger => Value::UInt32(None),
            LogicalType::UBigInt => Value::UInt64(None),
            LogicalType::UHugeInt => Value::UInt128(None),
            LogicalType::Float => Value::Float32(None),
            LogicalType::Double => Value::Float64(None),
            LogicalType::Decimal { precision, scale } => Value::Decimal(None, precision, scale),
            LogicalType::Char => Value::Char(None),
            LogicalType::Varchar => Value::Varchar(None),
            LogicalType::Blob => Value::Blob(None),
            LogicalType::Date => Value::Date(None),
            LogicalType::Time => Value::Time(None),
            LogicalType::Timestamp => Value::Timestamp(None),
            LogicalType::TimestampTz => Value::TimestampWithTimezone(None),
            LogicalType::Interval => Value::Interval(None),
            LogicalType::Uuid => Value::Uuid(None),
        }
    }

    /// Build a `DECIMAL(precision, scale)`, `(0, 0)` meaning unspecified.
    ///
    /// An unspecified decimal parameter is bound and decoded at scale 0 with
    /// no precision check, type names resolve to [`Self::DEFAULT_DECIMAL`] instead.
    pub fn decimal(precision: u8, scale: u8) -> Result<Self> {
        if (precision, scale) != (0, 0)
            && (precision == 0
                || precision > 38
                || scale > precision
                || scale > Self::MAX_DECIMAL_SCALE)
        {
            return Err(Error::msg(format!(
                "DECIMAL({precision},{scale}) is not supported, precision must be in 1..=38 and scale in 0..={}",
                Self::MAX_DECIMAL_SCALE.min(precision)
            )));
        }
        Ok(LogicalType::Decimal { precision, scale })
    }
}

impl Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogicalType::Boolean => "BOOLEAN",
            LogicalType::TinyInt => "TINYINT",
            LogicalType::SmallInt => "SMALLINT",
            LogicalType::Integer => "INTEGER",
            LogicalType::BigInt => "BIGINT",
            LogicalType::HugeInt => "HUGEINT",
            LogicalType::UTinyInt => "UTINYINT",
            LogicalType::USmallInt => "USMALLINT",
            LogicalType::UInteger => "UINTEGER",
            LogicalType::UBigInt => "UBIGINT",
            LogicalType::UHugeInt => "UHUGEINT",
            LogicalType::Float => "FLOAT",
            LogicalType::Double => "DOUBLE",
            LogicalType::Decimal { precision, scale } => {
                f.write_str("DECIMAL")?;
                if (precision, scale) != (&0, &0) {
                    write!(f, "({},{})", precision, scale)?;
                }
                return Ok(());
            }
            LogicalType::Char => "CHAR(1)",
            LogicalType::Varchar => "VARCHAR",
            LogicalType::Blob => "BLOB",
            LogicalType::Date => "DATE",
            LogicalType::Time => "TIME",
            LogicalType::Timestamp => "TIMESTAMP",
            LogicalType::TimestampTz => "TIMESTAMPTZ",
            LogicalType::Interval => "INTERVAL",
            LogicalType::Uuid => "UUID",
        })
    }
}

impl FromStr for LogicalType {
    type Err = Error;

    /// Parse a SQL type name, accepting the common aliases of each type.
    fn from_str(input: &str) -> Result<Self> {
        let normalized = input
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        let (name, args) = match normalized.split_once('(') {
            Some((name, rest)) => {
                let Some(args) = rest.strip_suffix(')') else {
                    return Err(Error::msg(format!(
                        "Unbalanced parenthesis in type `{}`",
                        input
                    )));
                };
                let args = args
                    .split(',')
                    .map(|v| {
                        v.trim().parse::<u32>().map_err(|e| {
                            Error::new(e).context(format!(
                                "Type `{}` has a non numeric type argument",
                                input
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                (name.trim_end(), args)
            }
            None => (normalized.as_str(), Vec::new()),
        };
        let no_args = |result: LogicalType| {
            if !args.is_empty() {
                return Err(Error::msg(format!(
                    "Type `{}` does not accept type arguments",
                    input
                )));
            }
            Ok(result)
        };
        match name {
            "BOOLEAN" | "BOOL" | "LOGICAL" => no_args(LogicalType::Boolean),
            "TINYINT" | "INT1" => no_args(LogicalType::TinyInt),
            "SMALLINT" | "INT2" | "SHORT" => no_args(LogicalType::SmallInt),
            "INTEGER" | "INT" | "INT4" | "SIGNED" => no_args(LogicalType::Integer),
            "BIGINT" | "INT8" | "LONG" => no_args(LogicalType::BigInt),
            "HUGEINT" | "INT128" => no_args(LogicalType::HugeInt),
            "UTINYINT" => no_args(LogicalType::UTinyInt),
            "USMALLINT" => no_args(LogicalType::USmallInt),
            "UINTEGER" => no_args(LogicalType::UInteger),
            "UBIGINT" => no_args(LogicalType::UBigInt),
            "UHUGEINT" => no_args(LogicalType::UHugeInt),
            "FLOAT" | "REAL" | "FLOAT4" => no_args(LogicalType::Float),
            "DOUBLE" | "DOUBLE PRECISION" | "FLOAT8" => no_args(LogicalType::Double),
            "DECIMAL" | "NUMERIC" => match args.as_slice() {
                [] => Ok(Self::DEFAULT_DECIMAL),
                [precision] => LogicalType::decimal(narrow(*precision, input)?, 0),
                [precision, scale] => {
                    LogicalType::decimal(narrow(*precision, input)?, narrow(*scale, input)?)
                }
                _ => Err(Error::msg(format!(
                    "Type `{}` accepts at most precision and scale",
                    input
                ))),
            },
            "CHAR" | "CHARACTER" | "BPCHAR" => match args.as_slice() {
                [] | [1] => Ok(LogicalType::Char),
                [_] => Ok(LogicalType::Varchar),
                _ => Err(Error::msg(format!("Type `{}` accepts one length", input))),
            },
            "VARCHAR" | "TEXT" | "STRING" | "CHARACTER VARYING" => match args.as_slice() {
                [] | [_] => Ok(LogicalType::Varchar),
                _ => Err(Error::msg(format!("Type `{}` accepts one length", input))),
            },
            "BLOB" | "BYTEA" | "BINARY" | "VARBINARY" => no_args(LogicalType::Blob),
            "DATE" => no_args(LogicalType::Date),
            "TIME" => no_args(LogicalType::Time),
            "TIMESTAMP" | "DATETIME" => no_args(LogicalType::Timestamp),
            "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => no_args(LogicalType::TimestampTz),
            "INTERVAL" => no_args(LogicalType::Interval),
            "UUID" => no_args(LogicalType::Uuid),
            _ => Err(Error::msg(format!(
                "Unsupported logical type `{}`, no decode rule exists for it",
                input
            ))),
        }
    }
}

fn narrow(value: u32, input: &str) -> Result<u8> {
    u8::try_from(value).map_err(|e| {
        Error::new(e).context(format!("Type argument {value} of `{input}` is too large"))
    })
}

#[cfg(test)]
mod tests {
    use super::LogicalType;

    #[test]
    fn slot_widths() {
        assert_eq!(LogicalType::Boolean.slot_width(), 1);
        assert_eq!(LogicalType::Integer.slot_width(), 4);
        assert_eq!(LogicalType::TimestampTz.slot_width(), 12);
        assert_eq!(LogicalType::Varchar.slot_width(), 16);
        assert!(LogicalType::Blob.is_variable_length());
        assert!(!LogicalType::Uuid.is_variable_length());
    }

    #[test]
    fn parse_names() {
        assert_eq!("int".parse::<LogicalType>().unwrap(), LogicalType::Integer);
        assert_eq!(
            "double  precision".parse::<LogicalType>().unwrap(),
            LogicalType::Double
        );
        assert_eq!(
            "numeric(10, 2)".parse::<LogicalType>().unwrap(),
            LogicalType::Decimal {
                precision: 10,
                scale: 2
            }
        );
        assert_eq!(
            "VARCHAR(255)".parse::<LogicalType>().unwrap(),
            LogicalType::Varchar
        );
        assert_eq!("char".parse::<LogicalType>().unwrap(), LogicalType::Char);
        assert_eq!(
            "char(8)".parse::<LogicalType>().unwrap(),
            LogicalType::Varchar
        );
        assert_eq!(
            "decimal".parse::<LogicalType>().unwrap(),
            LogicalType::DEFAULT_DECIMAL
        );
        assert!("GEOMETRY".parse::<LogicalType>().is_err());
        assert!("INTEGER(4)".parse::<LogicalType>().is_err());
        assert!("DECIMAL(3,5)".parse::<LogicalType>().is_err());
        assert!("DECIMAL(10,2".parse::<LogicalType>().is_err());
    }

    #[test]
    fn display_names() {
        assert_eq!(LogicalType::UHugeInt.to_string(), "UHUGEINT");
        assert_eq!(
            LogicalType::Decimal {
                precision: 12,
                scale: 4
            }
            .to_string(),
            "DECIMAL(12,4)"
        );
        assert_eq!(
            LogicalType::Decimal {
                precision: 0,
                scale: 0
            }
            .to_string(),
            "DECIMAL"
        );
    }
}
