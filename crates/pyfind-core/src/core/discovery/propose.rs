use pyfind_domain::{NameCandidates, PythonInfo, PythonSpec};
use serde::Serialize;
use tracing::{debug, trace};

use crate::effects::Effects;
use crate::python::launcher::LauncherEntry;

/// Where a candidate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    Current,
    AbsolutePath,
    Launcher,
    ExactName,
    GeneratedName,
}

/// An interpreter proposed for a spec, with whether its provenance already
/// guarantees the interpreter family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub info: PythonInfo,
    pub strict_implementation_match: bool,
    pub source: CandidateSource,
}

impl Candidate {
    #[must_use]
    pub fn new(
        info: PythonInfo,
        strict_implementation_match: bool,
        source: CandidateSource,
    ) -> Self {
        Self {
            info,
            strict_implementation_match,
            source,
        }
    }
}

enum Stage {
    Current,
    AbsolutePath,
    LauncherStart,
    Launcher(std::vec::IntoIter<LauncherEntry>),
    ExactName,
    GeneratedNames(NameCandidates),
    Done,
}

/// Pull-based candidate sequence. Each call to `next` does only the lookup
/// and probing needed to produce one more candidate, so stages past the one
/// that satisfied the request never run.
pub struct ProposeInterpreters<'a> {
    spec: &'a PythonSpec,
    effects: &'a dyn Effects,
    stage: Stage,
}

impl<'a> ProposeInterpreters<'a> {
    #[must_use]
    pub fn new(spec: &'a PythonSpec, effects: &'a dyn Effects) -> Self {
        Self {
            spec,
            effects,
            stage: Stage::Current,
        }
    }

    fn find_on_path(&self, name: &str) -> Option<PythonInfo> {
        let path = self.effects.locator().find(name)?;
        self.effects.prober().probe(&path)
    }
}

impl Iterator for ProposeInterpreters<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            match std::mem::replace(&mut self.stage, Stage::Done) {
                Stage::Current => {
                    self.stage = Stage::AbsolutePath;
                    if let Some(info) = self.effects.prober().current() {
                        return Some(Candidate::new(info, true, CandidateSource::Current));
                    }
                    debug!("host interpreter unavailable");
                }
                Stage::AbsolutePath => {
                    self.stage = Stage::LauncherStart;
                    let Some(path) = &self.spec.path else {
                        continue;
                    };
                    if !path.exists() {
                        debug!(
                            path = %path.display(),
                            "requested interpreter path does not exist"
                        );
                        continue;
                    }
                    if let Some(info) = self.effects.prober().probe(path) {
                        return Some(Candidate::new(info, true, CandidateSource::AbsolutePath));
                    }
                }
                Stage::LauncherStart => {
                    let launcher = self.effects.launcher();
                    self.stage = if launcher.is_available() {
                        let entries = launcher.entries();
                        debug!(count = entries.len(), "launcher entries");
                        Stage::Launcher(entries.into_iter())
                    } else {
                        Stage::ExactName
                    };
                }
                Stage::Launcher(mut entries) => {
                    let Some(entry) = entries.next() else {
                        self.stage = Stage::ExactName;
                        continue;
                    };
                    self.stage = Stage::Launcher(entries);
                    if !entry.could_satisfy(self.spec) {
                        trace!(tag = %entry.tag, "launcher entry cannot satisfy spec");
                        continue;
                    }
                    if let Some(info) = self.effects.prober().probe(&entry.path) {
                        return Some(Candidate::new(info, true, CandidateSource::Launcher));
                    }
                }
                Stage::ExactName => {
                    self.stage = Stage::GeneratedNames(
                        self.spec.generate_names(self.effects.case_sensitive_fs()),
                    );
                    // A literal name such as `python` may point at any
                    // implementation, so identity is re-checked.
                    if let Some(info) = self.find_on_path(&self.spec.raw) {
                        return Some(Candidate::new(info, false, CandidateSource::ExactName));
                    }
                }
                Stage::GeneratedNames(mut names) => {
                    let (name, strict) = names.next()?;
                    self.stage = Stage::GeneratedNames(names);
                    trace!(name, strict, "trying generated name");
                    if let Some(info) = self.find_on_path(&name) {
                        return Some(Candidate::new(info, strict, CandidateSource::GeneratedName));
                    }
                }
                Stage::Done => return None,
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use pyfind_domain::{PythonInfo, VersionInfo};

    use crate::effects::{Effects, ExecutableLocator, InterpreterProber};
    use crate::python::launcher::{LauncherEntry, PlatformLauncher};

    pub(crate) fn python(path: &str, implementation: &str, version: &str) -> PythonInfo {
        PythonInfo {
            executable: PathBuf::from(path),
            system_executable: PathBuf::from(path),
            implementation: implementation.to_string(),
            version: version.to_string(),
            version_info: VersionInfo::from_version_str(version).expect("version"),
            architecture: 64,
            platform: "linux".to_string(),
        }
    }

    /// In-memory host: a map of PATH names, a map of probeable interpreters,
    /// and a log of every lookup and probe performed.
    #[derive(Default)]
    pub(crate) struct FakeHost {
        pub current: Option<PythonInfo>,
        pub on_path: HashMap<String, PathBuf>,
        pub interpreters: HashMap<PathBuf, PythonInfo>,
        pub launcher: Option<Vec<LauncherEntry>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeHost {
        pub(crate) fn with_current(info: PythonInfo) -> Self {
            Self {
                current: Some(info),
                ..Self::default()
            }
        }

        pub(crate) fn install(&mut self, names: &[&str], info: PythonInfo) {
            for name in names {
                self.on_path
                    .insert((*name).to_string(), info.executable.clone());
            }
            self.interpreters.insert(info.executable.clone(), info);
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls").clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().expect("calls").push(call);
        }
    }

    impl InterpreterProber for FakeHost {
        fn probe(&self, path: &Path) -> Option<PythonInfo> {
            self.record(format!("probe {}", path.display()));
            self.interpreters.get(path).cloned()
        }

        fn current(&self) -> Option<PythonInfo> {
            self.record("current".to_string());
            self.current.clone()
        }
    }

    impl ExecutableLocator for FakeHost {
        fn find(&self, name: &str) -> Option<PathBuf> {
            self.record(format!("find {name}"));
            self.on_path.get(name).cloned()
        }
    }

    impl PlatformLauncher for FakeHost {
        fn is_available(&self) -> bool {
            self.launcher.is_some()
        }

        fn entries(&self) -> Vec<LauncherEntry> {
            self.record("launcher".to_string());
            self.launcher.clone().unwrap_or_default()
        }
    }

    impl Effects for FakeHost {
        fn prober(&self) -> &dyn InterpreterProber {
            self
        }

        fn locator(&self) -> &dyn ExecutableLocator {
            self
        }

        fn launcher(&self) -> &dyn PlatformLauncher {
            self
        }

        fn case_sensitive_fs(&self) -> bool {
            true
        }
    }
}
