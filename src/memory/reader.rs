//! Typed validated reads

use super::{validate_range, ProcessMemory};
use crate::core::types::{Address, MemoryError, MemoryResult};
use std::mem;

/// Typed reader over a process memory capability.
///
/// Every read validates the full byte range before the raw transfer, so a
/// range touching unmapped or protected memory fails cleanly. Validation is
/// best-effort against a live target: a region can still change between the
/// check and the transfer, which surfaces as `ReadFailed`.
pub struct MemoryReader<'a, M: ?Sized> {
    mem: &'a M,
}

impl<'a, M: ProcessMemory + ?Sized> MemoryReader<'a, M> {
    pub fn new(mem: &'a M) -> Self {
        MemoryReader { mem }
    }

    /// Reads one value of `T` at `address`.
    pub fn read<T: Copy>(&self, address: Address) -> MemoryResult<T> {
        let size = mem::size_of::<T>();
        validate_range(self.mem, address, size)?;

        let mut buf = vec![0u8; size];
        self.mem.read_raw(address, &mut buf)?;

        // SAFETY: buf holds exactly size_of::<T>() bytes and T is Copy;
        // the read is unaligned because buf has no alignment guarantee.
        Ok(unsafe { (buf.as_ptr() as *const T).read_unaligned() })
    }

    /// Reads `count` consecutive values of `T` starting at `address`.
    pub fn read_array<T: Copy>(&self, address: Address, count: usize) -> MemoryResult<Vec<T>> {
        let elem = mem::size_of::<T>();
        if count == 0 || elem == 0 {
            return Ok(Vec::new());
        }

        let total = elem.checked_mul(count).ok_or_else(|| {
            MemoryError::invalid_memory(address, format!("length overflow: {count} x {elem} bytes"))
        })?;
        validate_range(self.mem, address, total)?;

        let mut buf = vec![0u8; total];
        self.mem.read_raw(address, &mut buf)?;

        let mut out = Vec::with_capacity(count);
        for chunk in buf.chunks_exact(elem) {
            // SAFETY: each chunk holds exactly size_of::<T>() bytes.
            out.push(unsafe { (chunk.as_ptr() as *const T).read_unaligned() });
        }
        Ok(out)
    }

    /// Reads `len` raw bytes starting at `address`.
    pub fn read_bytes(&self, address: Address, len: usize) -> MemoryResult<Vec<u8>> {
        validate_range(self.mem, address, len)?;
        let mut buf = vec![0u8; len];
        self.mem.read_raw(address, &mut buf)?;
        Ok(buf)
    }

    /// Reads a NUL-terminated byte string of at most `max_len` characters.
    ///
    /// Each byte goes through the validated path individually, so a string
    /// walking off the end of committed memory fails cleanly. If `max_len`
    /// bytes pass without a terminator the read fails with `StringTooLong`;
    /// an empty result always means the string was genuinely empty.
    pub fn read_string(&self, address: Address, max_len: usize) -> MemoryResult<String> {
        let mut bytes = Vec::new();
        let mut cursor = address;

        loop {
            let b: u8 = self.read(cursor)?;
            if b == 0 {
                break;
            }
            bytes.push(b);
            if bytes.len() > max_len {
                return Err(MemoryError::StringTooLong { address, max_len });
            }
            cursor = cursor.checked_add(1).ok_or_else(|| {
                MemoryError::invalid_memory(cursor, "string runs past the top of the address space")
            })?;
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads a NUL-terminated UTF-16 string of at most `max_len` units.
    ///
    /// Same contract as [`read_string`](Self::read_string), with two-byte
    /// character units.
    pub fn read_wide_string(&self, address: Address, max_len: usize) -> MemoryResult<String> {
        let mut units = Vec::new();
        let mut cursor = address;

        loop {
            let u: u16 = self.read(cursor)?;
            if u == 0 {
                break;
            }
            units.push(u);
            if units.len() > max_len {
                return Err(MemoryError::StringTooLong { address, max_len });
            }
            cursor = cursor.checked_add(2).ok_or_else(|| {
                MemoryError::invalid_memory(cursor, "string runs past the top of the address space")
            })?;
        }

        Ok(String::from_utf16_lossy(&units))
    }

    /// Validation-only probe; true iff the whole range is accessible.
    pub fn is_readable(&self, address: Address, len: usize) -> bool {
        validate_range(self.mem, address, len).is_ok()
    }
}
