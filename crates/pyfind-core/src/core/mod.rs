//! Internal implementation modules for `pyfind-core`.
//!
//! Most callers should go through the re-exports at the crate root rather
//! than importing these modules directly.

pub mod commands;
pub mod config;
pub mod discovery;
pub mod effects;
pub mod python;
pub mod tooling;
