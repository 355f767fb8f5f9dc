//! Validated typed memory access over an abstract process capability
//!
//! The raw capability is the [`ProcessMemory`] trait; the validator and the
//! typed reader/writer are generic over it so the same code path runs against
//! a live process handle and against synthetic memory maps in tests.

mod reader;
mod validate;
mod writer;

pub use self::reader::MemoryReader;
pub use self::validate::validate_range;
pub use self::writer::MemoryWriter;

use crate::core::types::{Address, MemoryResult, RegionInfo};

/// Raw access to one target process's address space.
///
/// Implementations perform unchecked transfers; bounds and protection
/// checking happens in [`validate_range`] before any transfer is issued.
pub trait ProcessMemory {
    /// Reads exactly `buf.len()` bytes starting at `address`.
    fn read_raw(&self, address: Address, buf: &mut [u8]) -> MemoryResult<()>;

    /// Writes all of `data` starting at `address`.
    fn write_raw(&self, address: Address, data: &[u8]) -> MemoryResult<()>;

    /// Queries the region descriptor covering `address`.
    fn query_region(&self, address: Address) -> MemoryResult<RegionInfo>;
}
