#[cfg(test)]
mod tests {
    use sluice::{
        LogicalType, ParameterBuffer, ParameterCache, ParameterInfo, ParameterMap, Placeholder,
        PrepareStatement, Prepared, Result, RuntimeParameters, Value,
    };
    use sluice_tests::{discover_placeholders, init_logs};

    #[test]
    fn reverse_discovery() {
        init_logs();
        let query = "SELECT * FROM t WHERE c1 = ? AND c2 = ?";
        let mut handles = discover_placeholders(query);
        assert_eq!(handles.len(), 2);
        // The parser reaches the second marker first
        handles.reverse();
        for (i, handle) in handles.iter_mut().enumerate() {
            if let Some(placeholder) = handle {
                placeholder.index = i as u32;
            }
        }
        let c1 = query.find("c1 = ?").unwrap() + 5;
        let c2 = query.find("c2 = ?").unwrap() + 5;
        assert_eq!(handles[0].unwrap().source_position, c2);

        let statement = PrepareStatement::new("find", query, handles);
        let placeholders = statement.placeholders();
        assert_eq!(placeholders[0], Placeholder::new(c1, 0));
        assert_eq!(placeholders[1], Placeholder::new(c2, 1));
    }

    #[test]
    fn integer_and_null_varchar() {
        init_logs();
        let map = ParameterMap::new(vec![
            ParameterInfo::new(LogicalType::Integer, false),
            ParameterInfo::new(LogicalType::Varchar, true),
        ]);
        let mut data = 42i32.to_le_bytes().to_vec();
        data.extend([0; 16]);
        let nulls = [0b10u8];
        let mut cache = ParameterCache::new(&map, RuntimeParameters::new(&data, &nulls));

        assert_eq!(cache.get_value(0).unwrap(), &Value::Int32(Some(42)));
        let value = cache.get_value(1).unwrap();
        assert_eq!(value, &Value::Varchar(None));
        assert_eq!(value.logical_type(), LogicalType::Varchar);
        assert_eq!(cache.derived_count(), 2);
        assert_eq!(cache.get_value(1).unwrap(), &Value::Varchar(None));
        assert_eq!(cache.derived_count(), 2);
    }

    #[test]
    fn prepare_bind_derive() -> Result<()> {
        init_logs();
        let query = "INSERT INTO t1 VALUES (?, '?', ?, ?)";
        let statement = PrepareStatement::new("ins_prep", query, discover_placeholders(query));
        assert_eq!(statement.parameters_count(), 3);

        let map = ParameterMap::for_statement(
            &statement,
            ParameterMap::from_type_names([("INT", false), ("TEXT", true), ("UUID", true)])
                .unwrap()
                .iter()
                .copied(),
        )
        .unwrap();
        let mut buffer = ParameterBuffer::new(&map);
        buffer.bind(7)?;
        buffer.bind("seven")?;
        buffer.bind(None::<uuid::Uuid>)?;
        assert!(buffer.is_complete());

        let mut cache = ParameterCache::new(&map, buffer.as_runtime());
        for placeholder in statement.placeholders().iter().rev() {
            cache.get_value(placeholder.index)?;
        }
        assert_eq!(cache.cached(0), Some(&Value::Int32(Some(7))));
        assert_eq!(cache.cached(1), Some(&Value::Varchar(Some("seven".into()))));
        assert_eq!(cache.cached(2), Some(&Value::Uuid(None)));
        assert_eq!(cache.derived_count(), 3);
        Ok(())
    }
}
