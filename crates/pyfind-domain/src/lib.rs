#![deny(clippy::all, warnings)]
#![allow(clippy::must_use_candidate)]

//! Interpreter requests and interpreter identities, with no I/O.

pub mod info;
pub mod spec;

pub use info::{Mismatch, PythonInfo, VersionInfo};
pub use spec::{NameCandidates, PythonSpec, GENERIC_ALIAS};
