use std::fmt;

use pyfind_domain::{Mismatch, PythonInfo, PythonSpec};
use serde::Serialize;

use super::propose::{CandidateSource, ProposeInterpreters};
use super::resolve::{get_interpreter, Resolver, Step};
use crate::config::DiscoveryConfig;
use crate::effects::Effects;

/// Fallback request when no host interpreter can be located.
pub const FALLBACK_SPEC: &str = "python3";

/// A pluggable interpreter discovery strategy.
pub trait Discover: fmt::Display {
    fn run(&self) -> Option<PythonInfo>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub python: String,
}

impl DiscoveryOptions {
    /// Picks the request string: an explicit value, then the configured
    /// default, then the host interpreter's own path.
    pub fn resolve(
        explicit: Option<&str>,
        config: &DiscoveryConfig,
        host_executable: impl FnOnce() -> Option<String>,
    ) -> Self {
        let python = explicit
            .map(ToOwned::to_owned)
            .or_else(|| config.default_spec.clone())
            .or_else(host_executable)
            .unwrap_or_else(|| FALLBACK_SPEC.to_string());
        Self { python }
    }
}

/// Resolution through the built-in candidate order: running interpreter,
/// explicit path, platform launcher, then `PATH`.
pub struct Builtin<'a> {
    python_spec: String,
    effects: &'a dyn Effects,
}

impl<'a> Builtin<'a> {
    #[must_use]
    pub fn new(options: &DiscoveryOptions, effects: &'a dyn Effects) -> Self {
        Self {
            python_spec: options.python.clone(),
            effects,
        }
    }

    #[must_use]
    pub fn python_spec(&self) -> &str {
        &self.python_spec
    }

    /// Walks the same candidate order as [`Discover::run`], recording the
    /// verdict for every candidate up to and including the accepted one.
    #[must_use]
    pub fn explain(&self) -> Explanation {
        let spec = PythonSpec::parse(&self.python_spec);
        let mut evaluated = Vec::new();
        let mut selected = None;
        {
            let mut resolver = Resolver::new(&spec, ProposeInterpreters::new(&spec, self.effects));
            loop {
                match resolver.step() {
                    Step::Rejected {
                        candidate,
                        mismatch,
                    } => evaluated.push(EvaluatedCandidate {
                        source: candidate.source,
                        strict_implementation_match: candidate.strict_implementation_match,
                        info: candidate.info,
                        rejected: Some(mismatch),
                    }),
                    Step::Found(candidate) => {
                        selected = Some(candidate.info.clone());
                        evaluated.push(EvaluatedCandidate {
                            source: candidate.source,
                            strict_implementation_match: candidate.strict_implementation_match,
                            info: candidate.info,
                            rejected: None,
                        });
                        break;
                    }
                    Step::Exhausted => break,
                }
            }
        }
        Explanation {
            spec,
            evaluated,
            selected,
        }
    }
}

impl Discover for Builtin<'_> {
    fn run(&self) -> Option<PythonInfo> {
        get_interpreter(&self.python_spec, self.effects)
    }
}

impl fmt::Display for Builtin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin discover of python_spec='{}'", self.python_spec)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct EvaluatedCandidate {
    pub source: CandidateSource,
    pub strict_implementation_match: bool,
    pub info: PythonInfo,
    pub rejected: Option<Mismatch>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Explanation {
    pub spec: PythonSpec,
    pub evaluated: Vec<EvaluatedCandidate>,
    pub selected: Option<PythonInfo>,
}
