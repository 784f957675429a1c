//! Split raw invocation arguments into per-flag token lists.
//!
//! Accepted syntax is deliberately small:
//!
//! - `--name=value` (the value may be empty)
//! - `--name value`
//! - `--` ends flag parsing; everything after it is positional
//!
//! Anything else is a positional argument and is preserved in order.

use std::collections::BTreeMap;

use crate::error::FlagbindError;
use crate::schema::Schema;
use crate::types::ParserOptions;

/// Tokens collected from the command line, keyed by flag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgSnapshot {
    tokens: BTreeMap<String, Vec<String>>,
    positional: Vec<String>,
}

impl ArgSnapshot {
    /// Tokenize `args` (without the program name) against the flag names
    /// declared in `schema`.
    pub fn parse<I, S>(
        args: I,
        schema: &Schema,
        options: &ParserOptions,
    ) -> Result<Self, FlagbindError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut snapshot = ArgSnapshot::default();
        let mut iter = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = iter.next() {
            if arg == "--" {
                snapshot.positional.extend(iter.by_ref());
                break;
            }
            if !arg.starts_with("--") {
                snapshot.positional.push(arg);
                continue;
            }
            let body = &arg[2..];

            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            if schema.find_flag(name).is_none() {
                if options.ignore_unknown {
                    tracing::trace!(flag = name, "keeping unknown flag as positional");
                    snapshot.positional.push(arg.clone());
                    continue;
                }
                return Err(FlagbindError::UnknownFlag {
                    name: name.to_string(),
                });
            }

            let value = match inline {
                Some(value) => value.to_string(),
                None => match iter.next() {
                    Some(next) if !next.starts_with("--") => next,
                    _ => {
                        return Err(FlagbindError::MissingArgument {
                            name: name.to_string(),
                        });
                    }
                },
            };

            tracing::trace!(flag = name, token = %value, "argument token");
            snapshot.push(name, value);
        }

        Ok(snapshot)
    }

    fn push(&mut self, name: &str, value: String) {
        self.tokens.entry(name.to_string()).or_default().push(value);
    }

    /// All tokens given for `name`, in command-line order.
    pub fn tokens(&self, name: &str) -> Option<&[String]> {
        self.tokens.get(name).map(Vec::as_slice)
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }
}
