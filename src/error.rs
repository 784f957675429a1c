use thiserror::Error;

use crate::types::FieldKind;

#[derive(Debug, Error)]
pub enum FlagbindError {
    #[error("Field '{ident}' has neither a long name nor a secondary name")]
    UnnamedField { ident: String },

    #[error("Flag '--{name}' is declared by both '{first}' and '{second}'")]
    DuplicateFlag {
        name: String,
        first: String,
        second: String,
    },

    #[error("Field ident '{ident}' is declared more than once")]
    DuplicateIdent { ident: String },

    #[error("Argument is not valid UTF-8: {lossy}")]
    InvalidArgument { lossy: String },

    #[error("Invalid value '{token}' for '{field}' (expected {kind}): {reason}")]
    Conversion {
        field: String,
        token: String,
        kind: FieldKind,
        reason: String,
    },

    #[error("Flag '--{name}' expects a value")]
    MissingArgument { name: String },

    #[error("Unknown flag '--{name}'")]
    UnknownFlag { name: String },

    #[error("Failed to bind resolved values: {0}")]
    Bind(#[from] toml::de::Error),
}

impl FlagbindError {
    /// True for errors caused by the schema itself rather than by input values.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            FlagbindError::UnnamedField { .. }
                | FlagbindError::DuplicateFlag { .. }
                | FlagbindError::DuplicateIdent { .. }
        )
    }
}
