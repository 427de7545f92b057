#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sluice_core::{AsValue, RowLabeled, SelectorValue, Value, column_value};
    use std::{str::FromStr, sync::Arc};
    use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};
    use uuid::Uuid;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert!(Value::Null.is_null());
        assert!(Value::Int64(None).is_null());
        assert!(!Value::Int64(Some(0)).is_null());
        assert_eq!(Value::Int32(None), Value::Int32(None));
        assert_ne!(Value::Int32(None), Value::Int64(None));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(Some(false)));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        assert_eq!(bool::try_from_value(val).unwrap(), true);
        assert_eq!(bool::try_from_value((1 as i8).into()).unwrap(), true);
        assert_eq!(bool::try_from_value((0 as i64).into()).unwrap(), false);
        assert_eq!(bool::try_from_value((2 as u64).into()).unwrap(), true);
        assert!(bool::try_from_value((0.5 as f32).into()).is_err());
    }

    #[test]
    fn value_integers() {
        let val: Value = (-32768 as i16).into();
        assert_eq!(val, Value::Int16(Some(-32768)));
        assert_ne!(val, Value::Int32(Some(-32768)));
        assert_eq!(i16::try_from_value(val).unwrap(), -32768);
        assert_eq!(i8::try_from_value((99 as u8).into()).unwrap(), 99);
        assert_eq!(i64::try_from_value((7 as u32).into()).unwrap(), 7);
        assert_eq!(u64::try_from_value((7 as i32).into()).unwrap(), 7);
        assert!(i8::try_from_value((0.1 as f64).into()).is_err());
        assert!(i8::try_from_value((300 as i32).into()).is_err());
        assert!(u32::try_from_value((-1 as i64).into()).is_err());
        assert!(i32::try_from_value("5".into()).is_err());
    }

    #[test]
    fn value_integer_from_decimal() {
        assert_eq!(
            i64::try_from_value(Decimal::from(1234).into()).unwrap(),
            1234
        );
        assert!(i64::try_from_value(Decimal::from_str("1.5").unwrap().into()).is_err());
        assert!(u8::try_from_value(Decimal::from(256).into()).is_err());
    }

    #[test]
    fn value_floats() {
        let val: Value = 1.5f32.into();
        assert_eq!(val, Value::Float32(Some(1.5)));
        assert_eq!(f64::try_from_value(val).unwrap(), 1.5);
        assert_eq!(f32::try_from_value(0.25f64.into()).unwrap(), 0.25);
        assert!(f32::try_from_value(0.1f64.into()).is_err());
        assert_eq!(
            f64::try_from_value(Decimal::from_str("2.5").unwrap().into()).unwrap(),
            2.5
        );
    }

    #[test]
    fn value_decimal() {
        let val: Value = Decimal::from_str("10.25").unwrap().into();
        assert_eq!(val, Value::Decimal(Some(Decimal::from_str("10.25").unwrap())));
        assert_eq!(
            Decimal::try_from_value((10 as i64).into()).unwrap(),
            Decimal::from(10)
        );
        assert_eq!(
            Decimal::try_from_value("3.14".into()).unwrap(),
            Decimal::from_str("3.14").unwrap()
        );
        assert!(Decimal::try_from_value("pi".into()).is_err());
    }

    #[test]
    fn value_string_and_blob() {
        let val: Value = "hello".into();
        assert_eq!(val, Value::Varchar(Some("hello".into())));
        assert_eq!(String::try_from_value(val).unwrap(), "hello");
        assert_eq!(
            String::try_from_value(Value::Blob(Some(Box::new(*b"abc")))).unwrap(),
            "abc"
        );
        assert!(String::try_from_value(Value::Blob(Some(Box::new([0xff, 0xfe])))).is_err());
        let val: Value = vec![1u8, 2, 3].into();
        assert_eq!(val, Value::Blob(Some(Box::new([1, 2, 3]))));
        assert_eq!(Vec::<u8>::try_from_value(val).unwrap(), [1, 2, 3]);
        assert_eq!(
            Vec::<u8>::try_from_value("ab".into()).unwrap(),
            b"ab".to_vec()
        );
    }

    #[test]
    fn value_time() {
        let date = Date::from_calendar_date(2024, Month::February, 29).unwrap();
        let time = Time::from_hms(23, 59, 58).unwrap();
        let timestamp = PrimitiveDateTime::new(date, time);
        assert_eq!(Date::try_from_value(date.into()).unwrap(), date);
        assert_eq!(Time::try_from_value(time.into()).unwrap(), time);
        assert_eq!(
            PrimitiveDateTime::try_from_value(timestamp.into()).unwrap(),
            timestamp
        );
        assert_eq!(
            OffsetDateTime::try_from_value(timestamp.into()).unwrap(),
            timestamp.assume_utc()
        );
        assert!(Date::try_from_value(time.into()).is_err());
    }

    #[test]
    fn value_uuid() {
        let id = Uuid::from_str("0190c1e4-6a2b-7c3d-8e4f-a5b6c7d8e9f0").unwrap();
        assert_eq!(Uuid::try_from_value(id.into()).unwrap(), id);
        assert_eq!(Uuid::try_from_value(id.to_string().into()).unwrap(), id);
        assert_eq!(
            Uuid::try_from_value(id.as_bytes().to_vec().into()).unwrap(),
            id
        );
        assert!(Uuid::try_from_value("not-a-uuid".into()).is_err());
    }

    #[test]
    fn value_option() {
        assert_eq!(Option::<i32>::None.as_value(), Value::Int32(None));
        assert_eq!(Some(3i32).as_value(), Value::Int32(Some(3)));
        assert_eq!(Option::<String>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::try_from_value(Value::Varchar(None)).unwrap(),
            None
        );
        assert_eq!(
            Option::<i64>::try_from_value(Value::Int8(Some(4))).unwrap(),
            Some(4)
        );
        assert!(i64::try_from_value(Value::Null).is_err());
        assert!(String::try_from_value(Value::Varchar(None)).is_err());
    }

    #[test]
    fn selector_value() {
        assert_eq!(SelectorValue::from(5i64), SelectorValue::Scalar(Value::Int64(Some(5))));
        assert_eq!(
            SelectorValue::from("x"),
            SelectorValue::Scalar(Value::Varchar(Some("x".into())))
        );
        assert!(SelectorValue::from(Value::Null).is_null());
        assert!(SelectorValue::from(Option::<i64>::None).is_null());
        assert!(!SelectorValue::sequence(Vec::<i64>::new()).is_null());
        assert_eq!(
            SelectorValue::sequence([1u16, 2]),
            SelectorValue::Sequence(vec![Value::UInt16(Some(1)), Value::UInt16(Some(2))])
        );
    }

    #[test]
    fn row_column_lookup() {
        let labels: Arc<[String]> = ["id".to_string(), "name".to_string()].into();
        let row = RowLabeled::new(
            labels,
            [Value::Int64(Some(1)), Value::Varchar(Some("Zoe".into()))].into(),
        );
        assert_eq!(row.get_column("name"), Some(&Value::Varchar(Some("Zoe".into()))));
        assert_eq!(row.get_column("missing"), None);
        assert_eq!(column_value::<i64>(&row, "id").unwrap(), 1);
        assert_eq!(column_value::<Option<String>>(&row, "name").unwrap().as_deref(), Some("Zoe"));
        assert!(column_value::<i64>(&row, "missing").is_err());
        assert!(column_value::<i64>(&row, "name").is_err());
    }
}
