//! Talking to interpreters and the host's interpreter registries.

pub mod launcher;
pub mod probe;
