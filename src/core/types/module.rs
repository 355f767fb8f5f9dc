//! Loaded-module descriptors and name matching

use super::address::Address;
use serde::{Deserialize, Serialize};

/// A module loaded in the target process: base file name plus load address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Module file name as reported by the target, possibly with a path prefix
    pub name: String,
    /// Load base address within the target's address space
    pub base: Address,
    /// Image size in bytes, zero if unknown
    pub size: u32,
}

impl ModuleEntry {
    pub fn new(name: impl Into<String>, base: Address, size: u32) -> Self {
        ModuleEntry {
            name: name.into(),
            base,
            size,
        }
    }

    /// File name with any directory prefix stripped.
    pub fn file_name(&self) -> &str {
        base_file_name(&self.name)
    }
}

/// Returns the substring after the final path separator.
pub fn base_file_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}

/// Finds a module by base file name. Case-sensitive exact match after
/// stripping any path prefix from the enumerated name.
pub fn find_module<'a>(modules: &'a [ModuleEntry], name: &str) -> Option<&'a ModuleEntry> {
    modules.iter().find(|m| m.file_name() == name)
}
