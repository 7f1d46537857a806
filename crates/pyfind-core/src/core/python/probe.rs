use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pyfind_domain::{PythonInfo, VersionInfo};
use serde::Deserialize;
use which::which;

const INFO_SCRIPT: &str = r#"import json, platform, sys
data = {
    "implementation": platform.python_implementation(),
    "version": platform.python_version(),
    "architecture": 64 if sys.maxsize > 2**32 else 32,
    "executable": sys.executable,
    "platform": sys.platform,
}
print(json.dumps(data))
"#;

/// Why an executable could not be identified as a Python interpreter.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to start {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} exited with {code} while probing: {stderr}", .path.display())]
    Exit {
        path: PathBuf,
        code: i32,
        stderr: String,
    },
    #[error("{} printed an invalid interpreter payload", .path.display())]
    Payload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} reported an unusable version: {reason}", .path.display())]
    Version { path: PathBuf, reason: String },
}

#[derive(Deserialize)]
struct InfoPayload {
    implementation: String,
    version: String,
    architecture: u8,
    #[serde(default)]
    executable: Option<String>,
    platform: String,
}

/// Runs `path` as a Python interpreter and decodes its self-description.
///
/// # Errors
///
/// Returns a [`ProbeError`] when the executable cannot be started, exits
/// unsuccessfully, or does not print the expected payload.
pub fn probe_interpreter(path: &Path) -> Result<PythonInfo, ProbeError> {
    let output = Command::new(path)
        .arg("-c")
        .arg(INFO_SCRIPT)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| ProbeError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;
    if !output.status.success() {
        return Err(ProbeError::Exit {
            path: path.to_path_buf(),
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    let payload: InfoPayload = serde_json::from_slice(&output.stdout)
        .map_err(|source| ProbeError::Payload {
            path: path.to_path_buf(),
            source,
        })?;
    let version_info = VersionInfo::from_version_str(&payload.version)
        .map_err(|err| ProbeError::Version {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    let system_executable = payload
        .executable
        .filter(|exe| !exe.is_empty())
        .map_or_else(|| path.to_path_buf(), PathBuf::from);
    Ok(PythonInfo {
        executable: path.to_path_buf(),
        system_executable,
        implementation: payload.implementation,
        version: payload.version,
        version_info,
        architecture: payload.architecture,
        platform: payload.platform,
    })
}

/// Locates the interpreter that stands in for the running runtime: an
/// explicit override, else the first `python3`/`python` on `PATH`. An
/// override given as a bare command name is looked up on `PATH` as well.
pub fn detect_host_interpreter(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(name) if is_bare_name(name) => match which(name) {
            Ok(found) => Some(found),
            Err(err) => {
                tracing::debug!(
                    name = %name.display(),
                    %err,
                    "host interpreter override not found on PATH"
                );
                None
            }
        },
        Some(path) => Some(path.to_path_buf()),
        None => ["python3", "python"]
            .into_iter()
            .find_map(|candidate| which(candidate).ok()),
    }
}

fn is_bare_name(path: &Path) -> bool {
    !path.is_absolute() && path.components().count() == 1
}
