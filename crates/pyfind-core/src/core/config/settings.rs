use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Default interpreter request when `--python` is not given.
pub const PYTHON_ENV: &str = "PYFIND_PYTHON";
/// Interpreter that stands in for "the running runtime".
pub const HOST_PYTHON_ENV: &str = "PYFIND_HOST_PYTHON";

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) discovery: DiscoveryConfig,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_snapshot(&EnvSnapshot::capture())
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        let non_empty = |key: &str| {
            snapshot
                .var(key)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };
        Self {
            discovery: DiscoveryConfig {
                default_spec: non_empty(PYTHON_ENV).map(ToOwned::to_owned),
                host_python: non_empty(HOST_PYTHON_ENV).map(PathBuf::from),
            },
        }
    }

    #[must_use]
    pub fn discovery(&self) -> &DiscoveryConfig {
        &self.discovery
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    pub default_spec: Option<String>,
    pub host_python: Option<PathBuf>,
}
