#![deny(clippy::all, warnings)]

//! Resolves interpreter requests to concrete Python installations on the
//! host.

mod core;

pub(crate) use crate::core::{config, discovery, effects, python};

pub use crate::core::commands::{
    explain_interpreter, find_interpreter, interpreter_names, ExplainRequest, FindRequest,
    NamesRequest,
};
pub use crate::core::config::context::CommandContext;
pub use crate::core::config::{Config, DiscoveryConfig, HOST_PYTHON_ENV, PYTHON_ENV};
pub use crate::core::discovery::{
    get_interpreter, Builtin, Candidate, CandidateSource, Discover, DiscoveryOptions,
    EvaluatedCandidate, Explanation, ProposeInterpreters, Resolver, ResolverState, Step,
    FALLBACK_SPEC,
};
pub use crate::core::effects::{
    fs_is_case_sensitive, Effects, ExecutableLocator, InterpreterProber, SharedEffects,
    SystemEffects,
};
pub use crate::core::python::launcher::{
    host_launcher, parse_launcher_listing, LauncherEntry, NoLauncher, PlatformLauncher, PyLauncher,
};
pub use crate::core::python::probe::{detect_host_interpreter, probe_interpreter, ProbeError};
pub use crate::core::tooling::outcome::{to_json_response, CommandStatus, ExecutionOutcome};

pub use pyfind_domain::{Mismatch, PythonInfo, PythonSpec, VersionInfo};
