//! Data-driven combat content and loaders.
//!
//! This crate houses the bundled encounter data and loaders for RON/TOML files:
//! - Combat tuning (`CombatConfig`, TOML)
//! - Input bindings (`InputBindings`, RON)
//! - Arena layout (bounds shape and spawn points, RON)
//!
//! Loaded values are validated before they are returned, so a malformed file
//! fails at load time rather than when the arena is built.

pub mod arena;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use arena::{ArenaSpec, BoundsSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    ArenaLoader, BindingsLoader, ConfigLoader, ContentFactory, LoadResult, bundled_arena,
    bundled_bindings, bundled_config,
};

/// Bundled `combat.toml`.
pub const BUNDLED_CONFIG_TOML: &str = include_str!("../data/combat.toml");

/// Bundled `bindings.ron`.
pub const BUNDLED_BINDINGS_RON: &str = include_str!("../data/bindings.ron");

/// Bundled `arena.ron`.
pub const BUNDLED_ARENA_RON: &str = include_str!("../data/arena.ron");
