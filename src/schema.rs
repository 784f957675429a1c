//! Field declarations: the input boundary of a resolution pass.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`] records, built once and
//! never mutated while values are resolved. How the records are produced
//! (derive macros, hand-written tables, reflection) is up to the caller.

use std::collections::{HashMap, HashSet};

use crate::error::FlagbindError;
use crate::names;
use crate::types::FieldKind;

/// Environment delimiter used when a field doesn't declare one.
pub const DEFAULT_ENV_DELIMITER: &str = ",";

/// Declaration of one configurable field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field identity, used in diagnostics and as the key when binding.
    pub ident: String,
    /// Explicit long flag name.
    pub long: Option<String>,
    /// Fallback name, typically shared with a serialization format.
    pub secondary: Option<String>,
    /// Explicit environment variable name.
    pub env: Option<String>,
    /// Splits one environment string into several tokens for compound kinds.
    /// An empty delimiter keeps the whole value as a single token.
    pub env_delimiter: String,
    /// Default tokens in declaration order.
    pub defaults: Vec<String>,
    pub kind: FieldKind,
    /// Serialization-side only. Never consulted during resolution.
    pub omit_empty: bool,
}

impl FieldSpec {
    pub fn new(ident: &str, kind: FieldKind) -> Self {
        Self {
            ident: ident.to_string(),
            long: None,
            secondary: None,
            env: None,
            env_delimiter: DEFAULT_ENV_DELIMITER.to_string(),
            defaults: Vec::new(),
            kind,
            omit_empty: false,
        }
    }

    pub fn long(mut self, name: &str) -> Self {
        self.long = Some(name.to_string());
        self
    }

    pub fn secondary(mut self, name: &str) -> Self {
        self.secondary = Some(name.to_string());
        self
    }

    /// Take the secondary name and `omit_empty` from a serialization tag such
    /// as `"map,omitempty"`. A name of `-` or an empty name clears the
    /// secondary name.
    pub fn serialization_tag(mut self, tag: &str) -> Self {
        let mut parts = tag.split(',');
        let name = parts.next().unwrap_or_default();
        self.secondary = match name {
            "" | "-" => None,
            other => Some(other.to_string()),
        };
        self.omit_empty = parts.any(|opt| opt.trim() == "omitempty");
        self
    }

    pub fn env(mut self, name: &str) -> Self {
        self.env = Some(name.to_string());
        self
    }

    pub fn env_delim(mut self, delimiter: &str) -> Self {
        self.env_delimiter = delimiter.to_string();
        self
    }

    /// Append one default token. Call repeatedly for multi-valued defaults.
    pub fn default_value(mut self, token: &str) -> Self {
        self.defaults.push(token.to_string());
        self
    }

    pub fn omit_empty(mut self, omit: bool) -> Self {
        self.omit_empty = omit;
        self
    }
}

/// A validated, ordered set of field declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Validate and wrap `fields`.
    ///
    /// Fails if a field has no derivable name, if two fields share an ident,
    /// or if two fields resolve to the same flag name.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, FlagbindError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        let mut idents: HashSet<&str> = HashSet::new();
        for spec in &fields {
            if !idents.insert(&spec.ident) {
                return Err(FlagbindError::DuplicateIdent {
                    ident: spec.ident.clone(),
                });
            }
            let name = names::resolve_primary(spec)?;
            if let Some(first) = seen.insert(name, &spec.ident) {
                return Err(FlagbindError::DuplicateFlag {
                    name: name.to_string(),
                    first: first.to_string(),
                    second: spec.ident.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up the field whose effective flag name is `name`.
    pub fn find_flag(&self, name: &str) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|spec| names::resolve_primary(spec).is_ok_and(|n| n == name))
    }
}
