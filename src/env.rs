use std::collections::BTreeMap;

/// Immutable capture of environment variables, taken once per resolution
/// pass so every field sees the same view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment. Variables whose name or value
    /// is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        Self::from_vars(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build a snapshot from synthetic pairs. Later duplicates win.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Exact match first, then the first key (in sorted order) equal to
    /// `name` ignoring ASCII case.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.get(name).or_else(|| {
            self.vars
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_lookup() {
        let env = EnvSnapshot::from_vars([("int", "23"), ("json-int", "4")]);
        assert_eq!(env.get("int"), Some("23"));
        assert_eq!(env.get("Int"), None);
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn empty_value_is_present() {
        let env = EnvSnapshot::from_vars([("EMPTY", "")]);
        assert_eq!(env.get("EMPTY"), Some(""));
    }

    #[test]
    fn ignore_case_prefers_exact() {
        let env = EnvSnapshot::from_vars([("INT", "1"), ("int", "2")]);
        assert_eq!(env.get_ignore_case("int"), Some("2"));
    }

    #[test]
    fn ignore_case_falls_back_to_sorted_first() {
        let env = EnvSnapshot::from_vars([("iNT", "3"), ("Int", "2")]);
        assert_eq!(env.get_ignore_case("int"), Some("2"));
    }

    #[test]
    fn later_duplicate_wins() {
        let env = EnvSnapshot::from_vars([("A", "1"), ("A", "2")]);
        assert_eq!(env.get("A"), Some("2"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn capture_sees_process_environment() {
        // PATH is set in any sane test environment; only assert consistency.
        let env = EnvSnapshot::capture();
        assert_eq!(env.get("PATH").map(str::to_string), std::env::var("PATH").ok());
    }
}
