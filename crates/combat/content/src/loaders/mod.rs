//! Content loaders for reading combat data from files.
//!
//! Spells come from RON, engine configuration from TOML. Loaders only parse
//! and validate; the engine never sees file paths.

pub mod config;
pub mod spells;

pub use config::ConfigLoader;
pub use spells::{SpellLoader, SpellRegistry};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
