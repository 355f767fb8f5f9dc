//! Safe remote process memory access for Windows
//!
//! Attaches to a target process by window title or executable name and
//! performs bounds- and protection-checked typed reads and writes against
//! its address space, including variable-length string extraction that never
//! reads past a caller-specified limit or an unmapped page boundary. An
//! entity scanner sits on top as a consumer of those guarantees.
//!
//! The validated access path ([`memory`]) is generic over the
//! [`ProcessMemory`] capability and is platform-independent; the live
//! backend ([`process::RemoteProcess`]) is Windows-only.

pub mod config;
pub mod core;
pub mod memory;
#[cfg(windows)]
pub mod process;
pub mod scanner;
#[cfg(windows)]
mod win32;

pub use crate::config::{ConfigError, Offsets, SonarConfig};
pub use crate::core::types::{
    Address, MemoryError, MemoryResult, ModuleEntry, Protection, RegionInfo, RegionState,
};
pub use crate::memory::{validate_range, MemoryReader, MemoryWriter, ProcessMemory};
#[cfg(windows)]
pub use crate::process::RemoteProcess;
#[cfg(windows)]
pub use crate::scanner::Sonar;
