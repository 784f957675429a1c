use std::fmt;

/// Element type carried by a field, or by each element of a compound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Raw string, taken verbatim.
    Str,
    /// A [`std::time::Duration`] written as `300ms`, `1m`, `2h45m`.
    Duration,
}

/// Semantic kind of a field. Determines how raw tokens are coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A single value. Repeated flags override: the last token wins.
    Scalar(Primitive),
    /// An ordered list; each token is one element.
    Sequence(Primitive),
    /// A string-keyed map; each token is a `key:value` pair.
    Mapping(Primitive),
}

impl FieldKind {
    /// Integer scalar.
    pub const INT: FieldKind = FieldKind::Scalar(Primitive::Int);
    /// Duration scalar.
    pub const DURATION: FieldKind = FieldKind::Scalar(Primitive::Duration);

    /// Whether environment values are split on the field's delimiter.
    pub fn is_compound(self) -> bool {
        !matches!(self, FieldKind::Scalar(_))
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Int => "integer",
            Primitive::Float => "float",
            Primitive::Str => "string",
            Primitive::Duration => "duration",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Scalar(p) => write!(f, "{p}"),
            FieldKind::Sequence(p) => write!(f, "sequence of {p}"),
            FieldKind::Mapping(p) => write!(f, "mapping of string to {p}"),
        }
    }
}

/// Which value source produced a field's final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Argument,
    Environment,
    Default,
    /// No source had a value; the kind's zero value was bound.
    Unset,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Argument => "argument",
            Source::Environment => "environment",
            Source::Default => "default",
            Source::Unset => "unset",
        };
        f.write_str(name)
    }
}

/// Behavior switches for a resolution pass. Owned by the caller and passed
/// by reference into [`resolve`](crate::resolve::resolve).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Let fields without an explicit env name read the environment variable
    /// named after their long name (or, lacking one, their secondary name).
    pub env_fallback: bool,
    /// Match fallback-derived env keys case-insensitively. An exact match is
    /// still preferred. Explicit env names are always matched exactly.
    pub env_ignore_case: bool,
    /// Keep unknown `--flags` as positional arguments instead of failing.
    pub ignore_unknown: bool,
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env_fallback(mut self, enabled: bool) -> Self {
        self.env_fallback = enabled;
        self
    }

    pub fn env_ignore_case(mut self, enabled: bool) -> Self {
        self.env_ignore_case = enabled;
        self
    }

    pub fn ignore_unknown(mut self, enabled: bool) -> Self {
        self.ignore_unknown = enabled;
        self
    }
}
