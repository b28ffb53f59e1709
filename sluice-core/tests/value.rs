#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sluice_core::{AsValue, Interval, LogicalType, Value};
    use std::borrow::Cow;
    use time::macros::{date, datetime, time};
    use uuid::Uuid;

    #[test]
    fn value_null() {
        assert!(Value::Int32(None).is_null());
        assert!(!Value::Int32(Some(0)).is_null());
        assert_ne!(Value::Int32(None), Value::Int64(None));
        assert_eq!(<Option<String> as AsValue>::as_empty_value(), Value::Varchar(None));
        assert!(Value::Varchar(None).same_type(&Value::Varchar(Some("x".into()))));
        assert!(!Value::Varchar(None).same_type(&Value::Blob(None)));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(None));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        let var: bool = AsValue::try_from_value(val).unwrap();
        assert!(var);
        assert!(bool::try_from_value(Value::Int32(Some(3))).unwrap());
        assert!(!bool::try_from_value(Value::UInt8(Some(0))).unwrap());
        assert!(bool::try_from_value((0.5 as f32).into()).is_err());
    }

    #[test]
    fn value_integers() {
        let val: Value = (127 as i8).into();
        assert_eq!(val, Value::Int8(Some(127)));
        assert_eq!(i8::try_from_value(val).unwrap(), 127);
        assert_eq!(i8::try_from_value((99 as u8).into()).unwrap(), 99);
        assert!(i8::try_from_value((300 as i16).into()).is_err());
        assert!(i8::try_from_value((0.1 as f64).into()).is_err());

        assert_eq!(i32::try_from_value((-31 as i8).into()).unwrap(), -31);
        assert_eq!(i32::try_from_value((1001 as u32).into()).unwrap(), 1001);
        assert!(u32::try_from_value((-1 as i32).into()).is_err());
        assert_eq!(
            i64::try_from_value((12345678901234 as u64).into()).unwrap(),
            12345678901234
        );
        assert_eq!(
            i128::try_from_value((170141183460469231731687303715884105727 as u128).into())
                .unwrap(),
            i128::MAX
        );
        assert!(i128::try_from_value(u128::MAX.into()).is_err());
        assert_eq!(u16::try_from_value(Decimal::new(700, 0).into()).unwrap(), 700);
        assert!(u16::try_from_value(Decimal::new(25, 1).into()).is_err());
        assert!(i32::try_from_value(Value::Int32(None)).is_err());
    }

    #[test]
    fn value_floats() {
        let val: Value = 1.5f32.into();
        assert_eq!(val, Value::Float32(Some(1.5)));
        assert_eq!(f64::try_from_value(val).unwrap(), 1.5);
        assert_eq!(f32::try_from_value((2.25 as f64).into()).unwrap(), 2.25);
        assert_eq!(f64::try_from_value(Decimal::new(125, 2).into()).unwrap(), 1.25);
        assert!(f64::try_from_value(Value::Int32(Some(1))).is_err());
    }

    #[test]
    fn value_decimal() {
        let val: Value = Decimal::new(12345, 2).into();
        assert_eq!(val, Value::Decimal(Some(Decimal::new(12345, 2)), 0, 0));
        assert_eq!(
            Value::Decimal(None, 10, 2).logical_type(),
            LogicalType::Decimal {
                precision: 10,
                scale: 2
            }
        );
        assert_eq!(
            Decimal::try_from_value(Value::Int64(Some(-7))).unwrap(),
            Decimal::new(-7, 0)
        );
        assert_eq!(
            Decimal::try_from_value(Value::Float64(Some(0.5))).unwrap(),
            Decimal::new(5, 1)
        );
    }

    #[test]
    fn value_text() {
        let val: Value = "Hello World!".into();
        assert_eq!(val, Value::Varchar(Some("Hello World!".into())));
        assert!(matches!(val, Value::Varchar(Some(Cow::Borrowed(..)))));
        let var: &str = AsValue::try_from_value(val.clone()).unwrap();
        assert_eq!(var, "Hello World!");
        let var: String = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, "Hello World!");
        assert!(<&str>::try_from_value(Value::Varchar(Some(Cow::Owned("owned".into())))).is_err());

        assert_eq!(char::try_from_value("x".into()).unwrap(), 'x');
        assert!(char::try_from_value("xy".into()).is_err());
        assert_eq!(String::try_from_value('ß'.into()).unwrap(), "ß");
        let var: Cow<'_, str> = AsValue::try_from_value(Value::Char(Some('a'))).unwrap();
        assert_eq!(var, "a");
        assert!(<Cow<'static, str>>::try_from_value(Value::Boolean(Some(false))).is_err());
    }

    #[test]
    fn value_blob() {
        let bytes = [1u8, 2, 3];
        let val: Value = bytes.as_slice().into();
        assert_eq!(val, Value::Blob(Some(Cow::Borrowed(&[1, 2, 3]))));
        let var: &[u8] = AsValue::try_from_value(val.clone()).unwrap();
        assert_eq!(var, &[1, 2, 3]);
        let var: Vec<u8> = AsValue::try_from_value(val).unwrap();
        assert_eq!(var, vec![1, 2, 3]);
    }

    #[test]
    fn value_temporal() {
        let val: Value = date!(2025 - 07 - 21).into();
        assert_eq!(val, Value::Date(Some(date!(2025 - 07 - 21))));
        assert_eq!(time::Date::try_from_value(val).unwrap(), date!(2025 - 07 - 21));

        let val: Value = time!(00:57:21).into();
        assert_eq!(time::Time::try_from_value(val).unwrap(), time!(00:57:21));

        let val: Value = datetime!(2025-07-29 13:52:13 +02:00).into();
        assert_eq!(
            time::PrimitiveDateTime::try_from_value(val).unwrap(),
            datetime!(2025-07-29 11:52:13)
        );
        let val: Value = datetime!(2025-07-29 13:52:13).into();
        assert_eq!(
            time::OffsetDateTime::try_from_value(val).unwrap(),
            datetime!(2025-07-29 13:52:13 UTC)
        );
        assert!(time::Time::try_from_value(Value::Varchar(Some("13:22".into()))).is_err());
    }

    #[test]
    fn value_option() {
        let val: Value = Some(5i16).into();
        assert_eq!(val, Value::Int16(Some(5)));
        let val: Value = None::<Uuid>.into();
        assert_eq!(val, Value::Uuid(None));
        assert_eq!(Option::<Uuid>::try_from_value(val).unwrap(), None);
        assert_eq!(
            Option::<i64>::try_from_value(Value::Int32(Some(9))).unwrap(),
            Some(9)
        );
        assert!(Option::<i64>::try_from_value(Value::Varchar(Some("9".into()))).is_err());
    }

    #[test]
    fn into_owned() {
        let text = String::from("borrowed");
        let val = Value::Varchar(Some(Cow::Borrowed(&text)));
        let owned: Value<'static> = val.clone().into_owned();
        assert_eq!(owned, val);
        assert!(matches!(owned, Value::Varchar(Some(Cow::Owned(..)))));
        assert_eq!(Value::Int8(Some(1)).into_owned(), Value::Int8(Some(1)));
    }

    #[test]
    fn literal() {
        assert_eq!(Value::Int32(None).to_string(), "NULL");
        assert_eq!(Value::Boolean(Some(false)).to_string(), "false");
        assert_eq!(Value::Int32(Some(-42)).to_string(), "-42");
        assert_eq!(Value::Float64(Some(f64::NAN)).to_string(), "CAST('NaN' AS DOUBLE)");
        assert_eq!(
            Value::Float32(Some(f32::NEG_INFINITY)).to_string(),
            "CAST('-inf' AS FLOAT)"
        );
        assert_eq!(
            Value::Decimal(Some(Decimal::new(-12345, 2)), 10, 2).to_string(),
            "-123.45"
        );
        assert_eq!(Value::Char(Some('\'')).to_string(), "''''");
        assert_eq!(Value::Varchar(Some("it's\nme".into())).to_string(), "'it''s\\nme'");
        assert_eq!(
            Value::Blob(Some(vec![0x00, 0xAB].into())).to_string(),
            "'\\x00\\xAB'"
        );
        assert_eq!(Value::Date(Some(date!(2024 - 02 - 29))).to_string(), "'2024-02-29'");
        assert_eq!(Value::Time(Some(time!(13:45:07.5))).to_string(), "'13:45:07.5'");
        assert_eq!(Value::Time(Some(time!(12:00))).to_string(), "'12:00:00.0'");
        assert_eq!(
            Value::TimestampWithTimezone(Some(datetime!(2025-10-18 09:30:00.25 +02:00)))
                .to_string(),
            "'2025-10-18T07:30:00.25'"
        );
        assert_eq!(
            Value::Interval(Some(Interval::from_days(3))).to_string(),
            "INTERVAL '3 DAYS'"
        );
        assert_eq!(
            Value::Uuid(Some(Uuid::from_u128(0x5e915574_bb30_4430_98cf_c5854f61fbbd)))
                .to_string(),
            "'5e915574-bb30-4430-98cf-c5854f61fbbd'"
        );
    }
}
