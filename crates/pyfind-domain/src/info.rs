use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use pep440_rs::Version;
use serde::{Deserialize, Serialize};

use crate::spec::PythonSpec;

/// Identity of one interpreter installation, as reported by the interpreter
/// itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonInfo {
    /// Absolute path that was probed.
    pub executable: PathBuf,
    /// `sys.executable` as seen from inside the interpreter.
    pub system_executable: PathBuf,
    pub implementation: String,
    pub version: String,
    pub version_info: VersionInfo,
    pub architecture: u8,
    pub platform: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
}

impl VersionInfo {
    /// Extracts `major.minor.micro` from a PEP 440 version string such as
    /// `3.13.0rc1`.
    ///
    /// # Errors
    /// Returns an error when `raw` is not a PEP 440 version.
    pub fn from_version_str(raw: &str) -> Result<Self> {
        let version = Version::from_str(raw)
            .map_err(|err| anyhow!("invalid python version `{raw}`: {err}"))?;
        let release = version.release();
        let component = |idx: usize| release.get(idx).copied().unwrap_or(0);
        if release.is_empty() {
            return Err(anyhow!("python version `{raw}` has no release segment"));
        }
        Ok(Self {
            major: component(0),
            minor: component(1),
            micro: component(2),
        })
    }

    fn component(&self, idx: usize) -> u64 {
        match idx {
            0 => self.major,
            1 => self.minor,
            _ => self.micro,
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

/// The first rule of the satisfaction check a candidate failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum Mismatch {
    Path { requested: PathBuf },
    Implementation { requested: String, found: String },
    Architecture { requested: u8, found: u8 },
    Version { requested: String, found: String },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path { requested } => write!(f, "not the interpreter at {}", requested.display()),
            Self::Implementation { requested, found } => {
                write!(f, "implementation {found} is not {requested}")
            }
            Self::Architecture { requested, found } => {
                write!(f, "{found}-bit interpreter, {requested}-bit requested")
            }
            Self::Version { requested, found } => {
                write!(f, "version {found} does not match {requested}")
            }
        }
    }
}

impl PythonInfo {
    /// Checks this interpreter against `spec`.
    ///
    /// `strict_implementation_match` records that the way this candidate was
    /// found already pins the interpreter family, so the implementation name
    /// is not compared.
    #[must_use]
    pub fn mismatch(
        &self,
        spec: &PythonSpec,
        strict_implementation_match: bool,
    ) -> Option<Mismatch> {
        if let Some(path) = &spec.path {
            return if self.is_at(path) {
                None
            } else {
                Some(Mismatch::Path {
                    requested: path.clone(),
                })
            };
        }

        if !strict_implementation_match {
            if let Some(requested) = &spec.implementation {
                if !requested.eq_ignore_ascii_case(&self.implementation) {
                    return Some(Mismatch::Implementation {
                        requested: requested.clone(),
                        found: self.implementation.clone(),
                    });
                }
            }
        }

        if let Some(requested) = spec.architecture {
            if requested != self.architecture {
                return Some(Mismatch::Architecture {
                    requested,
                    found: self.architecture,
                });
            }
        }

        let prefix = spec.version_prefix();
        let differs = [spec.major, spec.minor, spec.micro]
            .iter()
            .enumerate()
            .any(|(idx, req)| req.is_some_and(|req| req != self.version_info.component(idx)));
        if differs {
            return Some(Mismatch::Version {
                requested: prefix
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join("."),
                found: self.version_info.to_string(),
            });
        }
        None
    }

    #[must_use]
    pub fn satisfies(&self, spec: &PythonSpec, strict_implementation_match: bool) -> bool {
        self.mismatch(spec, strict_implementation_match).is_none()
    }

    fn is_at(&self, path: &Path) -> bool {
        self.executable == path || self.system_executable == path
    }
}

impl fmt::Display for PythonInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}-bit) at {}",
            self.implementation,
            self.version,
            self.architecture,
            self.executable.display()
        )
    }
}
