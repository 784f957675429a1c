//! Turn raw string tokens into typed values.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::duration::parse_duration;
use crate::error::FlagbindError;
use crate::types::{FieldKind, Primitive};

/// A resolved, typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Duration(Duration),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// The value bound when no source supplies one.
    pub fn zero(kind: FieldKind) -> Value {
        match kind {
            FieldKind::Scalar(p) => zero_primitive(p),
            FieldKind::Sequence(_) => Value::Sequence(Vec::new()),
            FieldKind::Mapping(_) => Value::Mapping(BTreeMap::new()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Mapping(entries) => Some(entries),
            _ => None,
        }
    }
}

fn zero_primitive(p: Primitive) -> Value {
    match p {
        Primitive::Int => Value::Int(0),
        Primitive::Float => Value::Float(0.0),
        Primitive::Str => Value::Str(String::new()),
        Primitive::Duration => Value::Duration(Duration::ZERO),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Duration(d) => write!(f, "{d:?}"),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Coerce `tokens` into `kind`. `field` names the field in errors.
///
/// - Scalars take the last token; an empty token list yields the zero value.
/// - Sequences keep every token, in order.
/// - Mappings split each token at its first `:`; a repeated key keeps the
///   later value, distinct keys accumulate.
pub fn coerce(field: &str, tokens: &[String], kind: FieldKind) -> Result<Value, FlagbindError> {
    match kind {
        FieldKind::Scalar(p) => match tokens.last() {
            Some(token) => parse_primitive(field, token, p, kind),
            None => Ok(Value::zero(kind)),
        },
        FieldKind::Sequence(p) => tokens
            .iter()
            .map(|token| parse_primitive(field, token, p, kind))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        FieldKind::Mapping(p) => {
            let mut entries = BTreeMap::new();
            for token in tokens {
                let (key, raw) = token.split_once(':').ok_or_else(|| FlagbindError::Conversion {
                    field: field.to_string(),
                    token: token.clone(),
                    kind,
                    reason: "expected key:value".into(),
                })?;
                entries.insert(key.to_string(), parse_primitive(field, raw, p, kind)?);
            }
            Ok(Value::Mapping(entries))
        }
    }
}

fn parse_primitive(
    field: &str,
    token: &str,
    primitive: Primitive,
    kind: FieldKind,
) -> Result<Value, FlagbindError> {
    let parsed = match primitive {
        Primitive::Int => token.parse::<i64>().map(Value::Int).map_err(|e| e.to_string()),
        Primitive::Float => token
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| e.to_string()),
        Primitive::Str => Ok(Value::Str(token.to_string())),
        Primitive::Duration => parse_duration(token)
            .map(Value::Duration)
            .map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| FlagbindError::Conversion {
        field: field.to_string(),
        token: token.to_string(),
        kind,
        reason,
    })
}
