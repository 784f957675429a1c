//! Resolve option values from command-line flags, environment variables, and
//! declared defaults, with a fixed precedence and a predictable naming
//! fallback.
//!
//! Describe each field once as a [`FieldSpec`], collect them into a
//! [`Schema`], and resolve:
//!
//! ```ignore
//! let schema = Schema::new(vec![
//!     FieldSpec::new("port", FieldKind::INT).long("port").default_value("8080"),
//!     FieldSpec::new("timeout", FieldKind::DURATION).secondary("timeout").default_value("30s"),
//! ])?;
//!
//! let opts: MyOptions = Flagbind::builder(schema).env_fallback(true).load()?;
//! ```
//!
//! # Source precedence
//!
//! ```text
//! Arguments             --name=value, --name value
//!        ↓ absent
//! Environment           explicit env name, or (with env fallback) the flag name
//!        ↓ absent
//! Defaults              declared default tokens
//!        ↓ absent
//! Zero value            0, 0s, "", [], {}
//! ```
//!
//! Resolution is **per field** and the first source that has a value wins
//! outright. Sources never merge: if `--slice=3` is given, an environment
//! value or a default for `slice` is ignored entirely.
//!
//! "Absent" and "zero" are different things. `--int=0` binds `0` even when the
//! environment and the defaults say otherwise, and an environment variable set
//! to the empty string gives a compound field an empty (but present) value.
//!
//! # Naming
//!
//! Every field has up to three names:
//!
//! | Tag | Used for |
//! |-----|----------|
//! | `long` | the command-line flag |
//! | `secondary` | fallback when `long` is missing (usually a serialization name) |
//! | `env` | the environment variable |
//!
//! The flag name is `long`, else `secondary`. A field with neither is a
//! schema error. The environment key is `env` when declared; otherwise it is
//! the flag name, and it is only consulted when env fallback is enabled.
//!
//! Fallback follows the *declaration*, never the environment's contents: a
//! field declaring both `long = "int"` and `secondary = "json-int"` only ever
//! reads `int`, even when only `json-int` is set. Likewise, a field with an
//! explicit `env` name that is missing from the environment goes straight to
//! its defaults without trying the flag name.
//!
//! Implicit env keys match the flag name exactly. Set
//! [`ParserOptions::env_ignore_case`] to also accept a differently cased
//! variable (`Int` for flag `int`), matching go-flags style parsers.
//!
//! # Field kinds
//!
//! - **Scalar**: one value. Repeated flags override; the last one wins.
//! - **Sequence**: every token becomes an element, in order. Environment
//!   values are split on the field's delimiter (default `,`).
//! - **Mapping**: every token is a `key:value` pair, split at the first `:`.
//!   Later tokens overwrite earlier ones for the same key; distinct keys
//!   accumulate. The empty key is valid (`:0`).
//!
//! Elements are integers, floats, strings, or durations (`300ms`, `1m`,
//! `2h45m`). Multiple [`default_value`](FieldSpec::default_value) calls build
//! a multi-valued default.
//!
//! # Snapshots
//!
//! Arguments and environment are captured once per pass into
//! [`ArgSnapshot`] and [`EnvSnapshot`]. The core resolver
//! ([`resolve`](resolve::resolve)) does no I/O, so tests inject synthetic
//! snapshots instead of touching the process environment.
//!
//! # Error handling
//!
//! All fallible operations return [`FlagbindError`]. Resolution is fail-fast:
//! a malformed value from a higher-priority source is an error, never a
//! reason to fall through to a lower one.

pub mod error;
pub mod resolve;
pub mod types;

mod args;
mod bind;
mod builder;
mod coerce;
mod duration;
mod env;
mod names;
mod schema;
mod source;

#[cfg(test)]
mod fixtures;

pub use args::ArgSnapshot;
pub use builder::{Flagbind, FlagbindBuilder};
pub use coerce::{Value, coerce};
pub use duration::{DurationError, parse_duration};
pub use env::EnvSnapshot;
pub use error::FlagbindError;
pub use names::{resolve_env, resolve_primary};
pub use resolve::{ResolveInput, Resolution, ResolvedValue};
pub use schema::{DEFAULT_ENV_DELIMITER, FieldSpec, Schema};
pub use types::{FieldKind, ParserOptions, Primitive, Source};
