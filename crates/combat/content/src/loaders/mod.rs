//! Content loaders for reading combat data from files.
//!
//! Every loader parses, then validates, and reports failures with the file
//! path and the offending field.

pub mod arena;
pub mod bindings;
pub mod config;
pub mod factory;

pub use arena::ArenaLoader;
pub use bindings::BindingsLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

use combat_core::{CombatConfig, InputBindings};

use crate::ArenaSpec;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// The bundled combat tuning.
pub fn bundled_config() -> LoadResult<CombatConfig> {
    ConfigLoader::parse(crate::BUNDLED_CONFIG_TOML)
}

/// The bundled input bindings.
pub fn bundled_bindings() -> LoadResult<InputBindings> {
    BindingsLoader::parse(crate::BUNDLED_BINDINGS_RON)
}

/// The bundled arena layout.
pub fn bundled_arena() -> LoadResult<ArenaSpec> {
    ArenaLoader::parse(crate::BUNDLED_ARENA_RON)
}
