use crate::{Error, Interval, Result};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, Time, UtcOffset};

const UNIX_EPOCH_JULIAN_DAY: i32 = 2_440_588;
const MICROS_IN_DAY: i64 = 86_400_000_000;

pub(crate) fn date_to_days(v: &Date) -> i32 {
    v.to_julian_day() - UNIX_EPOCH_JULIAN_DAY
}

pub(crate) fn days_to_date(days: i32) -> Result<Date> {
    days.checked_add(UNIX_EPOCH_JULIAN_DAY)
        .ok_or_else(|| Error::msg(format!("Day {days} is out of range for a date")))
        .and_then(|v| {
            Date::from_julian_day(v).map_err(|e| {
                Error::new(e).context(format!("Day {days} since 1970-01-01 is not a valid date"))
            })
        })
}

pub(crate) fn time_to_micros(v: &Time) -> i64 {
    (*v - Time::MIDNIGHT).whole_microseconds() as i64
}

pub(crate) fn micros_to_time(micros: i64) -> Result<Time> {
    if !(0..MICROS_IN_DAY).contains(&micros) {
        return Err(Error::msg(format!(
            "Value {micros} is not a valid number of microseconds since midnight"
        )));
    }
    Time::from_hms_micro(
        (micros / 3_600_000_000) as u8,
        (micros / 60_000_000 % 60) as u8,
        (micros / 1_000_000 % 60) as u8,
        (micros % 1_000_000) as u32,
    )
    .map_err(|e| Error::new(e).context("Error while decoding a time value"))
}

/// Microseconds since the epoch, sub-microsecond parts round toward the past.
pub(crate) fn timestamp_to_micros(v: &OffsetDateTime) -> i64 {
    v.unix_timestamp_nanos().div_euclid(1_000) as i64
}

pub(crate) fn micros_to_timestamp(micros: i64) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(micros as i128 * 1_000)
        .map_err(|e| Error::new(e).context("Error while decoding a timestamp value"))
}

pub(crate) fn micros_to_timestamptz(micros: i64, offset: i32) -> Result<OffsetDateTime> {
    let offset = UtcOffset::from_whole_seconds(offset).map_err(|e| {
        Error::new(e).context(format!("Offset of {offset} seconds is not a valid timezone"))
    })?;
    micros_to_timestamp(micros)?
        .checked_to_offset(offset)
        .ok_or_else(|| Error::msg("The timestamp is out of range once shifted to its offset"))
}

/// Mantissa of `v` once rescaled to `scale`, checked against `precision`
/// (a zero precision is not checked).
///
/// Raising the scale multiplies the mantissa in `i128`, lowering it rounds.
pub(crate) fn decimal_to_mantissa(v: &Decimal, precision: u8, scale: u8) -> Result<i128> {
    let out_of_range =
        || Error::msg(format!("Value {v} does not fit into DECIMAL({precision},{scale})"));
    let target = scale as u32;
    let mantissa = if target >= v.scale() {
        10i128
            .checked_pow(target - v.scale())
            .and_then(|factor| v.mantissa().checked_mul(factor))
            .ok_or_else(out_of_range)?
    } else {
        let mut rescaled = *v;
        rescaled.rescale(target);
        if rescaled.scale() != target {
            return Err(out_of_range());
        }
        rescaled.mantissa()
    };
    if precision > 0 && mantissa.unsigned_abs() >= 10u128.pow(precision as u32) {
        return Err(out_of_range());
    }
    Ok(mantissa)
}

/// Decimal with the given mantissa and scale. Trailing zeros are dropped
/// when the mantissa is wider than 96 bits, the value is unchanged.
pub(crate) fn mantissa_to_decimal(mantissa: i128, scale: u8) -> Result<Decimal> {
    let (mut m, mut s) = (mantissa, scale as u32);
    while s > 0 && m % 10 == 0 && m.unsigned_abs() > Decimal::MAX.mantissa() as u128 {
        m /= 10;
        s -= 1;
    }
    Decimal::try_from_i128_with_scale(m, s).map_err(|e| {
        Error::new(e).context(format!(
            "Mantissa {mantissa} with scale {scale} is not a valid decimal"
        ))
    })
}

/// Interval as `(months, days, microseconds)`. Whole days held in `nanos`
/// are carried into the days, the remainder is truncated to microseconds.
pub(crate) fn interval_to_parts(v: &Interval) -> Result<(i32, i32, i64)> {
    let months = i32::try_from(v.months)
        .map_err(|e| Error::new(e).context(format!("{} months do not fit an interval", v.months)))?;
    let days = i128::from(v.days) + v.nanos / Interval::NANOS_IN_DAY;
    let days = i32::try_from(days)
        .map_err(|e| Error::new(e).context(format!("{} days do not fit an interval", days)))?;
    let micros = i64::try_from(v.nanos % Interval::NANOS_IN_DAY / 1_000).map_err(|e| {
        Error::new(e).context(format!("{} nanoseconds do not fit an interval", v.nanos))
    })?;
    Ok((months, days, micros))
}

pub(crate) fn parts_to_interval(months: i32, days: i32, micros: i64) -> Interval {
    Interval::new(months as _, days as _, micros as i128 * 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn dates() {
        assert_eq!(date_to_days(&date!(1970 - 01 - 01)), 0);
        assert_eq!(date_to_days(&date!(1970 - 01 - 31)), 30);
        assert_eq!(date_to_days(&date!(1969 - 12 - 31)), -1);
        assert_eq!(days_to_date(19_000).unwrap(), date!(2022 - 01 - 08));
        assert!(days_to_date(i32::MAX).is_err());
    }

    #[test]
    fn times() {
        assert_eq!(time_to_micros(&time!(00:00:01)), 1_000_000);
        assert_eq!(
            micros_to_time(time_to_micros(&time!(23:59:59.999999))).unwrap(),
            time!(23:59:59.999999)
        );
        assert!(micros_to_time(-1).is_err());
        assert!(micros_to_time(MICROS_IN_DAY).is_err());
    }

    #[test]
    fn timestamps() {
        let value = datetime!(2024-02-29 12:30:00.25 UTC);
        assert_eq!(timestamp_to_micros(&value), 1_709_209_800_250_000);
        assert_eq!(micros_to_timestamp(1_709_209_800_250_000).unwrap(), value);
        let shifted = micros_to_timestamptz(1_709_209_800_250_000, 3_600).unwrap();
        assert_eq!(shifted, value);
        assert_eq!(shifted.offset().whole_seconds(), 3_600);
        assert!(micros_to_timestamptz(0, 200_000).is_err());
        assert_eq!(
            timestamp_to_micros(&datetime!(1969-12-31 23:59:59.9999995 UTC)),
            -1
        );
        assert_eq!(timestamp_to_micros(&datetime!(1969-12-31 23:59:59.999999 UTC)), -1);
        assert_eq!(timestamp_to_micros(&datetime!(1970-01-01 00:00:00.0000005 UTC)), 0);
    }

    #[test]
    fn decimals() {
        let value = Decimal::new(12345, 2);
        assert_eq!(decimal_to_mantissa(&value, 10, 4).unwrap(), 1_234_500);
        assert_eq!(mantissa_to_decimal(1_234_500, 4).unwrap(), value);
        assert!(decimal_to_mantissa(&value, 4, 2).is_err());
        assert_eq!(decimal_to_mantissa(&value, 0, 2).unwrap(), 12345);

        // 1e20 at scale 10 needs a mantissa wider than 96 bits
        let large = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        let mantissa = decimal_to_mantissa(&large, 38, 10).unwrap();
        assert_eq!(mantissa, 10i128.pow(30));
        assert_eq!(mantissa_to_decimal(mantissa, 10).unwrap(), large);
        assert!(decimal_to_mantissa(&Decimal::MAX, 38, 10).is_err());
        assert!(decimal_to_mantissa(&Decimal::MAX, 0, 28).is_err());
        assert!(mantissa_to_decimal(i128::MAX, 0).is_err());
    }

    #[test]
    fn intervals() {
        let value = Interval::new(1, 2, 3_000_999);
        assert_eq!(interval_to_parts(&value).unwrap(), (1, 2, 3_000));
        let overflowing = Interval::new(0, 0, (i64::MAX as i128 + 1) * 1_000);
        let (months, days, micros) = interval_to_parts(&overflowing).unwrap();
        assert_eq!((months, days), (0, 106_751_991));
        assert!(micros >= 0);
        assert_eq!(parts_to_interval(months, days, micros), overflowing);
        let negative = Interval::new(0, 1, -Interval::NANOS_IN_DAY - 5_000);
        assert_eq!(interval_to_parts(&negative).unwrap(), (0, 0, -5));
        assert!(interval_to_parts(&Interval::new(i32::MAX as i64 + 1, 0, 0)).is_err());
        assert!(interval_to_parts(&Interval::new(0, i32::MAX as i64, Interval::NANOS_IN_DAY)).is_err());
    }
}
