//! Core types shared across the crate

pub mod types;

pub use self::types::{
    Address, MemoryError, MemoryResult, ModuleEntry, Protection, RegionInfo, RegionState,
};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
