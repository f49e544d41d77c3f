//! # Workflows Module
//!
//! High-level entry points that drive a full comparison between two engines.
//!
//! ## Overview
//!
//! A workflow pulls decompositions (and optionally forces) from two
//! [`EnergySource`](crate::core::io::traits::EnergySource)s, reconciles them
//! through their term maps, aligns units, and returns a renderable
//! [`ComparisonReport`](crate::engine::report::ComparisonReport).
//!
//! - **Compare Workflow** ([`compare`]) - Energy decomposition and force agreement between two engines

pub mod compare;
