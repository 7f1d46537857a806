use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use pyfind_domain::PythonInfo;

use crate::config::DiscoveryConfig;
use crate::python::launcher::{host_launcher, PlatformLauncher};
use crate::python::probe::{detect_host_interpreter, probe_interpreter};

/// Runs candidate executables to learn what they are.
pub trait InterpreterProber: Send + Sync {
    /// Identifies the interpreter at `path`. A path that is not a runnable
    /// Python yields `None`.
    fn probe(&self, path: &Path) -> Option<PythonInfo>;

    /// The interpreter standing in for the running runtime, if any.
    fn current(&self) -> Option<PythonInfo>;
}

/// Resolves bare command names the way the host shell would.
pub trait ExecutableLocator: Send + Sync {
    fn find(&self, name: &str) -> Option<PathBuf>;
}

pub trait Effects: Send + Sync {
    fn prober(&self) -> &dyn InterpreterProber;
    fn locator(&self) -> &dyn ExecutableLocator;
    fn launcher(&self) -> &dyn PlatformLauncher;
    fn case_sensitive_fs(&self) -> bool;
}

pub type SharedEffects = Arc<dyn Effects>;

pub struct SystemEffects {
    prober: SystemProber,
    locator: SystemLocator,
    launcher: Box<dyn PlatformLauncher>,
    case_sensitive: OnceLock<bool>,
}

impl SystemEffects {
    #[must_use]
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            prober: SystemProber::new(config.host_python.clone()),
            locator: SystemLocator,
            launcher: host_launcher(),
            case_sensitive: OnceLock::new(),
        }
    }
}

impl Effects for SystemEffects {
    fn prober(&self) -> &dyn InterpreterProber {
        &self.prober
    }

    fn locator(&self) -> &dyn ExecutableLocator {
        &self.locator
    }

    fn launcher(&self) -> &dyn PlatformLauncher {
        self.launcher.as_ref()
    }

    fn case_sensitive_fs(&self) -> bool {
        *self.case_sensitive.get_or_init(fs_is_case_sensitive)
    }
}

struct SystemProber {
    host_override: Option<PathBuf>,
    current: OnceLock<Option<PythonInfo>>,
}

impl SystemProber {
    fn new(host_override: Option<PathBuf>) -> Self {
        Self {
            host_override,
            current: OnceLock::new(),
        }
    }
}

impl InterpreterProber for SystemProber {
    fn probe(&self, path: &Path) -> Option<PythonInfo> {
        match probe_interpreter(path) {
            Ok(info) => {
                tracing::debug!(
                    path = %path.display(),
                    version = %info.version,
                    "probed interpreter"
                );
                Some(info)
            }
            Err(err) => {
                tracing::debug!(%err, "interpreter probe failed");
                None
            }
        }
    }

    fn current(&self) -> Option<PythonInfo> {
        self.current
            .get_or_init(|| {
                let Some(path) = detect_host_interpreter(self.host_override.as_deref()) else {
                    tracing::debug!("no host interpreter on PATH");
                    return None;
                };
                let path = absolutize(&path);
                self.probe(&path)
            })
            .clone()
    }
}

struct SystemLocator;

impl ExecutableLocator for SystemLocator {
    fn find(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        match which::which(name) {
            Ok(path) => {
                tracing::trace!(name, path = %path.display(), "found on PATH");
                Some(absolutize(&path))
            }
            Err(_) => {
                tracing::trace!(name, "not on PATH");
                None
            }
        }
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.into())
}

/// Whether file names differ by case on the temp filesystem.
pub fn fs_is_case_sensitive() -> bool {
    let fallback = !cfg!(any(windows, target_os = "macos"));
    let probe = match tempfile::Builder::new().prefix("PyFindCase").tempfile() {
        Ok(file) => file,
        Err(err) => {
            tracing::debug!(%err, "case sensitivity check failed; assuming platform default");
            return fallback;
        }
    };
    let Some(name) = probe.path().file_name() else {
        return fallback;
    };
    let lowered = probe
        .path()
        .with_file_name(name.to_string_lossy().to_lowercase());
    let sensitive = !lowered.exists();
    tracing::trace!(sensitive, "filesystem case sensitivity");
    sensitive
}
