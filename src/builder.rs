use std::ffi::OsString;

use serde::de::DeserializeOwned;

use crate::args::ArgSnapshot;
use crate::env::EnvSnapshot;
use crate::error::FlagbindError;
use crate::resolve::{self, ResolveInput, Resolution};
use crate::schema::Schema;
use crate::types::ParserOptions;

/// Entry point for resolving a schema against the command line and environment.
pub struct Flagbind;

impl Flagbind {
    pub fn builder(schema: Schema) -> FlagbindBuilder {
        FlagbindBuilder::new(schema)
    }
}

/// Builder that captures inputs and runs a resolution pass.
///
/// Without [`args()`](Self::args) the process arguments (minus the program
/// name) are used; without [`env_vars()`](Self::env_vars) the process
/// environment is snapshotted once when resolving.
pub struct FlagbindBuilder {
    schema: Schema,
    options: ParserOptions,
    args: Option<Vec<String>>,
    env_vars: Option<Vec<(String, String)>>,
}

impl FlagbindBuilder {
    fn new(schema: Schema) -> Self {
        Self {
            schema,
            options: ParserOptions::default(),
            args: None,
            env_vars: None,
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Enable or disable the environment fallback policy (default: `false`).
    pub fn env_fallback(mut self, enabled: bool) -> Self {
        self.options.env_fallback = enabled;
        self
    }

    /// Match fallback-derived env keys ignoring ASCII case (default: `false`).
    pub fn env_ignore_case(mut self, enabled: bool) -> Self {
        self.options.env_ignore_case = enabled;
        self
    }

    /// Keep unknown flags as positional arguments (default: `false`).
    pub fn ignore_unknown(mut self, enabled: bool) -> Self {
        self.options.ignore_unknown = enabled;
        self
    }

    /// Use these arguments instead of the process arguments.
    /// Do not include the program name.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Use these variables instead of the process environment.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Capture the argument and environment snapshots.
    fn build_input(&self) -> Result<ResolveInput, FlagbindError> {
        let args = match &self.args {
            Some(args) => ArgSnapshot::parse(args.iter().cloned(), &self.schema, &self.options)?,
            None => ArgSnapshot::parse(
                utf8_args(std::env::args_os().skip(1))?,
                &self.schema,
                &self.options,
            )?,
        };
        let env = match &self.env_vars {
            Some(vars) => EnvSnapshot::from_vars(vars.iter().cloned()),
            None => EnvSnapshot::capture(),
        };
        Ok(ResolveInput { args, env })
    }

    /// Resolve every field, keeping per-field source information.
    pub fn resolve(self) -> Result<Resolution, FlagbindError> {
        let input = self.build_input()?;
        tracing::debug!(
            fields = self.schema.fields().len(),
            env_vars = input.env.len(),
            env_fallback = self.options.env_fallback,
            "resolving options"
        );
        resolve::resolve(&self.schema, &input, &self.options)
    }

    /// Resolve and bind straight into a typed struct.
    pub fn load<T: DeserializeOwned>(self) -> Result<T, FlagbindError> {
        self.resolve()?.bind()
    }
}

/// Decode process arguments, failing on the first one that is not UTF-8.
/// Skipping it instead would shift `--name value` pairs.
fn utf8_args(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>, FlagbindError> {
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| FlagbindError::InvalidArgument {
                lossy: raw.to_string_lossy().into_owned(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::fixtures::test::{Options, options_schema};
    use crate::types::Source;

    struct Case {
        msg: &'static str,
        args: &'static [&'static str],
        env: &'static [(&'static str, &'static str)],
        expected: Options,
    }

    fn options(int: i64, time: Duration, map: &[(&str, i64)], slice: &[i64]) -> Options {
        Options {
            int,
            time,
            map: map.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            slice: slice.to_vec(),
        }
    }

    const ENV_DEFAULTS: &[(&str, &str)] = &[
        ("Int", "2"),
        ("Time", "2m"),
        ("Map", "a:2;b:3"),
        ("OVERRIDE_SLICE", "4,5,6"),
    ];

    const NON_ZERO_ARGS: &[&str] = &[
        "--int=3",
        "--time=3ms",
        "--map=c:3",
        "--slice=3",
        "--map=d:4",
        "--slice=1",
    ];

    const ZERO_ARGS: &[&str] = &["--int=0", "--time=0ms", "--map=:0", "--slice=0"];

    const NAMED_ENV: &[(&str, &str)] = &[
        ("json-int", "4"),
        ("int", "23"),
        ("time", "3m"),
        ("map", "key1:1"),
        ("slice", "3,2,1"),
        ("OVERRIDE_SLICE", "3,4,5"),
    ];

    fn run(cases: Vec<Case>, configure: impl Fn(FlagbindBuilder) -> FlagbindBuilder) {
        for case in cases {
            let builder = Flagbind::builder(options_schema())
                .args(case.args.iter().copied())
                .env_vars(case.env.iter().copied());
            let got: Options = configure(builder)
                .load()
                .unwrap_or_else(|e| panic!("{}: unexpected error: {e}", case.msg));
            assert_eq!(got, case.expected, "{}", case.msg);
        }
    }

    #[test]
    fn with_env_fallback() {
        let cases = vec![
            Case {
                msg: "long name wins over secondary name, explicit env over long",
                args: &[],
                env: NAMED_ENV,
                expected: options(23, Duration::from_secs(180), &[("key1", 1)], &[3, 4, 5]),
            },
            Case {
                msg: "no arguments, no env",
                args: &[],
                env: &[],
                expected: options(1, Duration::from_secs(60), &[("a", 1)], &[1, 2]),
            },
            Case {
                msg: "non-zero arguments override env",
                args: NON_ZERO_ARGS,
                env: ENV_DEFAULTS,
                expected: options(3, Duration::from_millis(3), &[("c", 3), ("d", 4)], &[3, 1]),
            },
            Case {
                msg: "zero arguments override env",
                args: ZERO_ARGS,
                env: ENV_DEFAULTS,
                expected: options(0, Duration::ZERO, &[("", 0)], &[0]),
            },
        ];
        run(cases, |b| b.env_fallback(true));
    }

    #[test]
    fn with_env_fallback_ignoring_case() {
        let cases = vec![Case {
            msg: "differently cased env names are matched",
            args: &[],
            env: ENV_DEFAULTS,
            expected: options(
                2,
                Duration::from_secs(120),
                &[("a", 2), ("b", 3)],
                &[4, 5, 6],
            ),
        }];
        run(cases, |b| b.env_fallback(true).env_ignore_case(true));
    }

    #[test]
    fn without_env_fallback() {
        let cases = vec![
            Case {
                msg: "implicit env names ignored, explicit env still read",
                args: &[],
                env: NAMED_ENV,
                expected: options(1, Duration::from_secs(60), &[("a", 1)], &[3, 4, 5]),
            },
            Case {
                msg: "no arguments, no env",
                args: &[],
                env: &[],
                expected: options(1, Duration::from_secs(60), &[("a", 1)], &[1, 2]),
            },
            Case {
                msg: "defaults except explicitly named env",
                args: &[],
                env: ENV_DEFAULTS,
                expected: options(1, Duration::from_secs(60), &[("a", 1)], &[4, 5, 6]),
            },
            Case {
                msg: "non-zero arguments",
                args: NON_ZERO_ARGS,
                env: ENV_DEFAULTS,
                expected: options(3, Duration::from_millis(3), &[("c", 3), ("d", 4)], &[3, 1]),
            },
            Case {
                msg: "zero arguments",
                args: ZERO_ARGS,
                env: ENV_DEFAULTS,
                expected: options(0, Duration::ZERO, &[("", 0)], &[0]),
            },
        ];
        run(cases, |b| b.env_fallback(false));
    }

    #[test]
    fn options_replace_toggles() {
        let builder = Flagbind::builder(options_schema())
            .env_fallback(true)
            .options(ParserOptions::new().ignore_unknown(true));
        assert!(!builder.options.env_fallback);
        assert!(builder.options.ignore_unknown);
    }

    #[test]
    fn resolve_reports_sources() {
        let resolution = Flagbind::builder(options_schema())
            .env_fallback(true)
            .args(["--int=9"])
            .env_vars([("time", "5s")])
            .resolve()
            .unwrap();
        assert_eq!(resolution.get("int").unwrap().source, Source::Argument);
        assert_eq!(resolution.get("time").unwrap().source, Source::Environment);
        assert_eq!(resolution.get("map").unwrap().source, Source::Default);
    }

    #[test]
    fn unknown_flag_fails_by_default() {
        let err = Flagbind::builder(options_schema())
            .args(["--nope=1"])
            .env_vars(Vec::<(String, String)>::new())
            .resolve()
            .unwrap_err();
        assert!(matches!(err, FlagbindError::UnknownFlag { .. }));
    }

    #[test]
    fn unknown_flag_ignored_when_enabled() {
        let resolution = Flagbind::builder(options_schema())
            .ignore_unknown(true)
            .args(["--nope=1", "--int=4"])
            .env_vars(Vec::<(String, String)>::new())
            .resolve()
            .unwrap();
        assert_eq!(resolution.positional(), ["--nope=1"]);
        assert_eq!(resolution.get("int").unwrap().value.as_int(), Some(4));
    }

    #[test]
    fn conversion_error_surfaces_from_load() {
        let err = Flagbind::builder(options_schema())
            .args(["--map=oops"])
            .env_vars(Vec::<(String, String)>::new())
            .load::<Options>()
            .unwrap_err();
        assert!(matches!(err, FlagbindError::Conversion { field, .. } if field == "map"));
    }

    #[test]
    fn explicit_inputs_are_used_instead_of_process_state() {
        let builder = Flagbind::builder(options_schema())
            .args(["--int=4"])
            .env_vars([("int", "5")]);
        let input = builder.build_input().unwrap();
        assert_eq!(input.args.tokens("int").unwrap(), ["4"]);
        assert_eq!(input.env.get("int"), Some("5"));
        assert_eq!(input.env.len(), 1);
    }

    #[test]
    fn utf8_process_args_decode() {
        let args = utf8_args([OsString::from("--int=3"), OsString::from("run")]).unwrap();
        assert_eq!(args, ["--int=3", "run"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_process_arg_is_an_error() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![b'-', b'-', b'i', b'n', b't', b'=', 0xff]);
        let err = utf8_args([OsString::from("run"), bad]).unwrap_err();
        match err {
            FlagbindError::InvalidArgument { lossy } => assert!(lossy.starts_with("--int=")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn bound_map_matches_hashmap() {
        let opts: Options = Flagbind::builder(options_schema())
            .args(["--map=x:1", "--map=y:2"])
            .env_vars(Vec::<(String, String)>::new())
            .load()
            .unwrap();
        assert_eq!(
            opts.map,
            HashMap::from([("x".to_string(), 1), ("y".to_string(), 2)])
        );
    }
}
