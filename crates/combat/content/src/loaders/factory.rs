//! Content factory for loading an encounter from a data directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, InputBindings};

use crate::ArenaSpec;
use crate::loaders::{ArenaLoader, BindingsLoader, ConfigLoader, LoadResult};

/// Loads encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── bindings.ron
/// └── arena.ron
/// ```
///
/// A missing file falls back to the bundled copy; a present but invalid
/// file is an error.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            super::bundled_config()
        }
    }

    pub fn load_bindings(&self) -> LoadResult<InputBindings> {
        let path = self.data_dir.join("bindings.ron");
        if path.exists() {
            BindingsLoader::load(&path)
        } else {
            super::bundled_bindings()
        }
    }

    pub fn load_arena(&self) -> LoadResult<ArenaSpec> {
        let path = self.data_dir.join("arena.ron");
        if path.exists() {
            ArenaLoader::load(&path)
        } else {
            super::bundled_arena()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_uses_bundled_content() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), CombatConfig::default());
        assert_eq!(factory.load_bindings().unwrap(), InputBindings::default());
        assert_eq!(factory.load_arena().unwrap(), ArenaSpec::default());
    }

    #[test]
    fn files_override_bundled_content() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("combat.toml"), "tick_rate = 30\n").unwrap();
        std::fs::write(dir.path().join("arena.ron"), "(bounds: Circle(center: (0.0, 0.0), radius: 0.0), player_spawn: (0.0, 0.0, 0.0), boss_spawn: (0.0, 0.0, 0.0))").unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().tick_rate, 30);
        assert!(factory.load_arena().is_err());
    }
}
