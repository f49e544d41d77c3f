//! # Data Models
//!
//! Transient, per-invocation descriptions of what an engine reported for one
//! molecular configuration.
//!
//! - [`term`] - The canonical energy term vocabulary shared by all engines
//! - [`decomposition`] - An engine's labeled breakdown of the potential energy
//! - [`forces`] - Per-particle force vectors, index-aligned between engines

pub mod decomposition;
pub mod forces;
pub mod term;
