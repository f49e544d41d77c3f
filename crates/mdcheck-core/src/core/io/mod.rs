//! # Input/Output Module
//!
//! Readers for the engine-neutral files this library consumes, and the
//! [`traits::EnergySource`] contract every engine adapter implements.
//!
//! - [`energies`] - Energy decompositions as TOML (`[[term]]` tables) or CSV (`label,value`)
//! - [`forces`] - Per-particle forces as CSV (`x,y,z`)
//! - [`source`] - File-backed and in-memory sources
//!
//! Parsing an engine's own log or trajectory format is left to the engine's tooling;
//! these readers expect values that have already been exported.

pub mod energies;
pub mod error;
pub mod forces;
pub mod source;
pub mod traits;
