//! # Engine Module
//!
//! The term reconciler and reporter. Given two engines' decompositions (and
//! optionally their per-particle forces) this layer aligns them into canonical
//! terms, compares them, and renders the result.
//!
//! - **Canonicalization** ([`canonicalize`]) - Sums native labels into canonical buckets
//! - **Energy Comparison** ([`energy`]) - Per-term rows, totals and total-consistency checks
//! - **Force Comparison** ([`forces`]) - Projection and relative-error agreement per particle
//! - **Statistics** ([`stats`]) - Mean, min, max and median summaries
//! - **Reporting** ([`report`]) - Fixed-width textual comparison tables
//! - **Configuration** ([`config`]) - Tolerances and rendering options
//! - **Error Handling** ([`error`]) - Typed failures carrying the offending label or index
//!
//! Every operation is a pure function of its inputs and holds no shared state.

pub mod canonicalize;
pub mod config;
pub mod energy;
pub mod error;
pub mod forces;
pub mod report;
pub mod stats;
