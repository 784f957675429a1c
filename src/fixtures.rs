#[cfg(test)]
pub mod test {
    use std::collections::HashMap;
    use std::time::Duration;

    use serde::Deserialize;

    use crate::coerce::Value;
    use crate::schema::{FieldSpec, Schema};
    use crate::types::{FieldKind, Primitive};

    /// Four fields covering every naming combination:
    ///
    /// - `int`: long + secondary, one default
    /// - `time`: secondary only
    /// - `map`: secondary only (from a serialization tag), `;` delimiter
    /// - `slice`: long + explicit env, two defaults
    pub fn options_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::new("int", FieldKind::INT)
                .long("int")
                .secondary("json-int")
                .default_value("1"),
            FieldSpec::new("time", FieldKind::DURATION)
                .secondary("time")
                .default_value("1m"),
            FieldSpec::new("map", FieldKind::Mapping(Primitive::Int))
                .serialization_tag("map,omitempty")
                .default_value("a:1")
                .env_delim(";"),
            FieldSpec::new("slice", FieldKind::Sequence(Primitive::Int))
                .long("slice")
                .default_value("1")
                .default_value("2")
                .env("OVERRIDE_SLICE")
                .env_delim(","),
        ])
        .unwrap()
    }

    /// Typed target for [`options_schema`].
    #[derive(Deserialize, Debug, PartialEq)]
    pub struct Options {
        pub int: i64,
        pub time: Duration,
        pub map: HashMap<String, i64>,
        pub slice: Vec<i64>,
    }

    pub fn ints(items: &[i64]) -> Value {
        Value::Sequence(items.iter().copied().map(Value::Int).collect())
    }

    pub fn int_map(pairs: &[(&str, i64)]) -> Value {
        Value::Mapping(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Value::Int(*v)))
                .collect(),
        )
    }

    #[test]
    fn options_schema_is_valid() {
        let schema = options_schema();
        assert_eq!(schema.fields().len(), 4);
        assert!(schema.fields()[2].omit_empty);
    }
}
