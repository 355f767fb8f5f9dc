//! Typed validated writes

use super::{validate_range, ProcessMemory};
use crate::core::types::{Address, MemoryResult};
use std::{mem, slice};

/// Typed writer over a process memory capability.
///
/// Symmetric contract to [`MemoryReader`](super::MemoryReader): the full byte
/// range is validated before the raw transfer, and a transfer that still
/// fails afterwards surfaces as `WriteFailed`.
pub struct MemoryWriter<'a, M: ?Sized> {
    mem: &'a M,
}

impl<'a, M: ProcessMemory + ?Sized> MemoryWriter<'a, M> {
    pub fn new(mem: &'a M) -> Self {
        MemoryWriter { mem }
    }

    /// Writes one value of `T` at `address`.
    pub fn write<T: Copy>(&self, address: Address, value: T) -> MemoryResult<()> {
        // SAFETY: T is Copy and the slice borrows value for the duration of
        // the call.
        let bytes = unsafe {
            slice::from_raw_parts(&value as *const T as *const u8, mem::size_of::<T>())
        };
        self.write_bytes(address, bytes)
    }

    /// Writes all of `values` consecutively starting at `address`.
    pub fn write_array<T: Copy>(&self, address: Address, values: &[T]) -> MemoryResult<()> {
        // SAFETY: values is a contiguous initialized slice of Copy elements.
        let bytes = unsafe {
            slice::from_raw_parts(values.as_ptr() as *const u8, mem::size_of_val(values))
        };
        self.write_bytes(address, bytes)
    }

    /// Writes raw bytes starting at `address`.
    pub fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        validate_range(self.mem, address, data.len())?;
        self.mem.write_raw(address, data)
    }
}
