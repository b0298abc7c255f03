//! Arena layout loader.

use std::path::Path;

use crate::ArenaSpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for arena layouts from RON files.
pub struct ArenaLoader;

impl ArenaLoader {
    pub fn load(path: &Path) -> LoadResult<ArenaSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid arena at {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ArenaSpec> {
        let spec: ArenaSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse arena RON: {}", e))?;
        spec.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(spec)
    }
}
