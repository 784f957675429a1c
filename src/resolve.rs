//! Core resolution pipeline: pick one source per field and coerce its tokens.
//!
//! Operates on pre-captured snapshots (`ResolveInput`) with no I/O, so the
//! whole pipeline is testable with synthetic inputs. Per field, in order:
//!
//! 1. Arguments under the flag name
//! 2. Environment: the explicit env name always; otherwise the flag name,
//!    only when env fallback is enabled
//! 3. Declared defaults
//! 4. The kind's zero value
//!
//! The first source that is present wins outright. Sources are never merged,
//! and a present value that fails to coerce is an error rather than a reason
//! to try the next source.

use std::fmt;

use crate::args::ArgSnapshot;
use crate::coerce::{self, Value};
use crate::env::EnvSnapshot;
use crate::error::FlagbindError;
use crate::names;
use crate::schema::{FieldSpec, Schema};
use crate::source;
use crate::types::{ParserOptions, Source};

/// All captured data needed for one resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    pub args: ArgSnapshot,
    pub env: EnvSnapshot,
}

/// A field's final value and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    pub value: Value,
    pub source: Source,
}

/// Result of resolving every field in a schema, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    fields: Vec<(String, ResolvedValue)>,
    positional: Vec<String>,
}

impl Resolution {
    /// Look up a field by its ident.
    pub fn get(&self, ident: &str) -> Option<&ResolvedValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == ident)
            .map(|(_, resolved)| resolved)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedValue)> {
        self.fields.iter().map(|(name, resolved)| (name.as_str(), resolved))
    }

    /// Non-flag arguments, in command-line order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, resolved)) in self.fields.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{name} = {} ({})", resolved.value, resolved.source)?;
        }
        Ok(())
    }
}

/// Resolve every field of `schema` from `input`. Stops at the first error.
pub fn resolve(
    schema: &Schema,
    input: &ResolveInput,
    options: &ParserOptions,
) -> Result<Resolution, FlagbindError> {
    let fields = schema
        .fields()
        .iter()
        .map(|spec| Ok((spec.ident.clone(), resolve_field(spec, input, options)?)))
        .collect::<Result<Vec<_>, FlagbindError>>()?;

    Ok(Resolution {
        fields,
        positional: input.args.positional().to_vec(),
    })
}

/// Resolve a single field.
pub fn resolve_field(
    spec: &FieldSpec,
    input: &ResolveInput,
    options: &ParserOptions,
) -> Result<ResolvedValue, FlagbindError> {
    let flag = names::resolve_primary(spec)?;
    let env_key = names::resolve_env(spec)?;

    let (tokens, source) = if let Some(tokens) = source::read_args(&input.args, flag) {
        (tokens, Source::Argument)
    } else if let Some(tokens) = read_env_for(spec, env_key, input, options) {
        (tokens, Source::Environment)
    } else if let Some(tokens) = source::read_defaults(spec) {
        (tokens, Source::Default)
    } else {
        tracing::debug!(field = %spec.ident, "no source, binding zero value");
        return Ok(ResolvedValue {
            value: coerce::Value::zero(spec.kind),
            source: Source::Unset,
        });
    };

    tracing::debug!(field = %spec.ident, %source, ?tokens, "resolved field");
    let value = coerce::coerce(&spec.ident, &tokens, spec.kind)?;
    Ok(ResolvedValue { value, source })
}

/// Environment step, gated by the fallback policy. An explicit env name that
/// is missing from the environment is absent; the flag name is not retried.
fn read_env_for(
    spec: &FieldSpec,
    env_key: &str,
    input: &ResolveInput,
    options: &ParserOptions,
) -> Option<Vec<String>> {
    let ignore_case = match spec.env {
        Some(_) => false,
        None if options.env_fallback => options.env_ignore_case,
        None => return None,
    };
    source::read_env(
        &input.env,
        env_key,
        &spec.env_delimiter,
        spec.kind,
        ignore_case,
    )
}
