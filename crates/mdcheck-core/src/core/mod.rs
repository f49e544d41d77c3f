//! # Core Module
//!
//! Data models and inputs shared by the comparison engine.
//!
//! - **Units** ([`units`]) - Energy and force units with their conversion factors
//! - **Data Models** ([`models`]) - Canonical terms, energy decompositions and force arrays
//! - **Term Maps** ([`terms`]) - Engine label to canonical term mappings, including presets
//! - **File I/O** ([`io`]) - Engine-neutral energy and force files, and the source contract
//!
//! Nothing in this layer compares anything; it only describes what each engine reported.

pub mod io;
pub mod models;
pub mod terms;
pub mod units;
