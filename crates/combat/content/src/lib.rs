//! Data-driven spell definitions and engine configuration.
//!
//! This crate turns content files into values the engine can run:
//! - Spell definitions (data-driven via RON), built into shared [`Spell`]s
//! - Engine configuration (data-driven via TOML)
//!
//! A handful of standard spells ship embedded in the crate so servers and
//! tests can start without a content directory.
//!
//! Definitions use combat-core types directly with serde for RON/TOML
//! deserialization; nothing here adds rules of its own.

pub mod spell;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use spell::{Spell, SpellDefinition};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, SpellLoader, SpellRegistry};
