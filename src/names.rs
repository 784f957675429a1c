//! Effective flag and environment names for a field.
//!
//! ```text
//! flag name:  long → secondary
//! env key:    env → long → secondary
//! ```
//!
//! Each hop is taken only when the previous tag is missing from the
//! declaration. Whether the environment actually holds a value is never
//! considered here.

use crate::error::FlagbindError;
use crate::schema::FieldSpec;

/// The name a field answers to on the command line.
pub fn resolve_primary(spec: &FieldSpec) -> Result<&str, FlagbindError> {
    spec.long
        .as_deref()
        .or(spec.secondary.as_deref())
        .ok_or_else(|| FlagbindError::UnnamedField {
            ident: spec.ident.clone(),
        })
}

/// The environment key consulted for a field: the explicit env name when
/// declared, otherwise the flag name.
pub fn resolve_env(spec: &FieldSpec) -> Result<&str, FlagbindError> {
    match spec.env.as_deref() {
        Some(env) => Ok(env),
        None => resolve_primary(spec),
    }
}
