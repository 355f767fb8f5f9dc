//! Type definitions for remote memory access

mod address;
mod error;
mod module;
mod region;

pub use self::address::Address;
pub use self::error::{MemoryError, MemoryResult};
pub use self::module::{base_file_name, find_module, ModuleEntry};
pub use self::region::{Protection, RegionInfo, RegionState};
