//! Read raw tokens for one field from one source.
//!
//! Every reader returns `None` when the source has nothing for the field.
//! `Some(vec![])` is a present-but-empty value and is never treated as absent.

use crate::args::ArgSnapshot;
use crate::env::EnvSnapshot;
use crate::schema::FieldSpec;
use crate::types::FieldKind;

/// Every `--name` occurrence, left to right.
pub fn read_args(args: &ArgSnapshot, name: &str) -> Option<Vec<String>> {
    args.tokens(name)
        .filter(|tokens| !tokens.is_empty())
        .map(<[String]>::to_vec)
}

/// A single variable lookup. Compound kinds split the value on `delimiter`
/// (an empty delimiter keeps it whole); an empty value yields no tokens
/// whatever the delimiter. Scalars use the value whole.
pub fn read_env(
    env: &EnvSnapshot,
    key: &str,
    delimiter: &str,
    kind: FieldKind,
    ignore_case: bool,
) -> Option<Vec<String>> {
    let raw = if ignore_case {
        env.get_ignore_case(key)
    } else {
        env.get(key)
    };
    tracing::trace!(key, found = raw.is_some(), "environment lookup");
    let raw = raw?;

    if !kind.is_compound() {
        return Some(vec![raw.to_string()]);
    }
    if raw.is_empty() {
        return Some(Vec::new());
    }
    if delimiter.is_empty() {
        return Some(vec![raw.to_string()]);
    }
    Some(raw.split(delimiter).map(str::to_string).collect())
}

/// Declared defaults, verbatim. No declared default is absent.
pub fn read_defaults(spec: &FieldSpec) -> Option<Vec<String>> {
    if spec.defaults.is_empty() {
        None
    } else {
        Some(spec.defaults.clone())
    }
}
