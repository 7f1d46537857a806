#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::assert::Assert;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

/// A scratch `PATH` directory populated with shell scripts that answer the
/// interpreter probe like a real Python would.
pub struct FakeHost {
    pub temp: TempDir,
    pub bin: PathBuf,
}

impl FakeHost {
    pub fn new(prefix: &str) -> Self {
        let temp = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .expect("tempdir");
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).expect("bin dir");
        Self { temp, bin }
    }

    /// Writes an executable named `name` that reports `implementation` and
    /// `version` when probed.
    #[cfg(unix)]
    pub fn interpreter(&self, name: &str, implementation: &str, version: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.join(name);
        let payload = json!({
            "implementation": implementation,
            "version": version,
            "architecture": 64,
            "executable": path.display().to_string(),
            "platform": "linux",
        });
        fs::write(&path, format!("#!/bin/sh\necho '{payload}'\n"))
            .expect("write interpreter");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("chmod");
        path
    }

    /// `pyfind` confined to this host: only the scratch directory is on
    /// `PATH` and `host` stands in for the running interpreter.
    pub fn command(&self, host: Option<&Path>) -> Command {
        let mut cmd = cargo_bin_cmd!("pyfind");
        cmd.env("PATH", &self.bin)
            .env_remove("PYFIND_PYTHON")
            .env_remove("PYFIND_HOST_PYTHON")
            .env("NO_COLOR", "1");
        if let Some(host) = host {
            cmd.env("PYFIND_HOST_PYTHON", host);
        }
        cmd
    }
}

pub fn parse_json(assert: &Assert) -> Value {
    serde_json::from_slice(&assert.get_output().stdout)
        .expect("valid json")
}

pub fn stdout(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout)
        .into_owned()
}
