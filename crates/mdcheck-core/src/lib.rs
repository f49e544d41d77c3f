//! # mdcheck Core Library
//!
//! Cross-engine validation of molecular mechanics energies and forces. Given the
//! potential-energy decomposition (and optionally the per-particle forces) reported by
//! two simulation engines for the same configuration, the library reconciles the
//! engine-native term labels into a shared canonical vocabulary, compares the results
//! term by term, and summarizes how well the force vectors agree.
//!
//! ## Architectural Philosophy
//!
//! The library mirrors a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`EnergyDecomposition`,
//!   `ForceField`, `CanonicalTerm`), units, canonical term maps with the built-in
//!   engine presets, and readers for the engine-neutral input files.
//!
//! - **[`engine`]: The Logic Core.** The term reconciler and reporter: canonicalization,
//!   energy comparison with total-consistency checks, force agreement statistics, and
//!   report rendering. Every operation is a pure function of its inputs.
//!
//! - **[`workflows`]: The Public API.** Ties sources, term maps and the engine together
//!   into a single comparison run.

pub mod core;
pub mod engine;
pub mod workflows;
