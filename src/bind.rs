//! Convert a [`Resolution`] into a `toml::Table` and from there into any
//! deserializable struct.
//!
//! Each field becomes one top-level key named after its ident. Durations are
//! written as `{ secs, nanos }`, the shape `std::time::Duration` deserializes
//! from.

use serde::de::DeserializeOwned;
use toml::{Table, Value as TomlValue};

use crate::coerce::Value;
use crate::error::FlagbindError;
use crate::resolve::Resolution;

impl Resolution {
    /// Render all resolved values as a table keyed by field ident.
    pub fn to_table(&self) -> Table {
        self.iter()
            .map(|(ident, resolved)| (ident.to_string(), to_toml(&resolved.value)))
            .collect()
    }

    /// Deserialize the resolved values into `T`.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T, FlagbindError> {
        TomlValue::Table(self.to_table())
            .try_into()
            .map_err(FlagbindError::Bind)
    }
}

fn to_toml(value: &Value) -> TomlValue {
    match value {
        Value::Int(i) => TomlValue::Integer(*i),
        Value::Float(x) => TomlValue::Float(*x),
        Value::Str(s) => TomlValue::String(s.clone()),
        Value::Duration(d) => {
            let mut table = Table::new();
            // Durations never exceed u64::MAX nanoseconds, so seconds fit in i64.
            table.insert("secs".into(), TomlValue::Integer(d.as_secs() as i64));
            table.insert("nanos".into(), TomlValue::Integer(i64::from(d.subsec_nanos())));
            TomlValue::Table(table)
        }
        Value::Sequence(items) => TomlValue::Array(items.iter().map(to_toml).collect()),
        Value::Mapping(entries) => TomlValue::Table(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_toml(v)))
                .collect(),
        ),
    }
}
