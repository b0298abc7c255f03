//! Input bindings loader.

use std::path::Path;

use combat_core::InputBindings;

use crate::loaders::{LoadResult, read_file};

/// Loader for input bindings from RON files.
pub struct BindingsLoader;

impl BindingsLoader {
    /// Load and validate `InputBindings` from a RON file.
    ///
    /// File format:
    /// ```ron
    /// (
    ///     actions: { Jump: [Key("Space"), GamepadButton(0)] },
    ///     movement: (forward: [Key("W")], back: [Key("S")], left: [Key("A")], right: [Key("D")]),
    ///     deadzone: 0.2,
    /// )
    /// ```
    pub fn load(path: &Path) -> LoadResult<InputBindings> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid bindings at {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<InputBindings> {
        let bindings: InputBindings = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bindings RON: {}", e))?;
        bindings.validate()?;
        Ok(bindings)
    }
}
