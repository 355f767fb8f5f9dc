//! Memory region descriptors used during address validation

use super::address::Address;
use std::fmt;

/// Page protection flags for a memory region.
///
/// Wraps the raw platform protection value. The low byte carries the base
/// protection; modifier bits such as the guard flag live above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protection(pub u32);

impl Protection {
    pub const NOACCESS: Self = Self(0x01);
    pub const READONLY: Self = Self(0x02);
    pub const READWRITE: Self = Self(0x04);
    pub const WRITECOPY: Self = Self(0x08);
    pub const EXECUTE: Self = Self(0x10);
    pub const EXECUTE_READ: Self = Self(0x20);
    pub const EXECUTE_READWRITE: Self = Self(0x40);
    pub const EXECUTE_WRITECOPY: Self = Self(0x80);
    pub const GUARD_FLAG: u32 = 0x100;

    /// Creates a protection value from the raw platform flags.
    pub const fn new(raw: u32) -> Self {
        Protection(raw)
    }

    /// Returns the raw platform value.
    pub const fn raw(&self) -> u32 {
        self.0
    }

    const fn base(&self) -> u32 {
        self.0 & 0xFF
    }

    /// Checks whether data reads are permitted.
    pub const fn is_readable(&self) -> bool {
        matches!(self.base(), 0x02 | 0x04 | 0x08 | 0x20 | 0x40 | 0x80)
    }

    /// Checks whether data writes are permitted.
    pub const fn is_writable(&self) -> bool {
        matches!(self.base(), 0x04 | 0x08 | 0x40 | 0x80)
    }

    /// Checks whether execution is permitted.
    pub const fn is_executable(&self) -> bool {
        matches!(self.base(), 0x10 | 0x20 | 0x40 | 0x80)
    }

    /// Checks whether the guard modifier is set.
    pub const fn is_guarded(&self) -> bool {
        self.0 & Self::GUARD_FLAG != 0
    }

    /// Conservative data-access policy: the region must permit read or
    /// write and must not be a guard page. No-access and execute-only
    /// pages are rejected even for read-only callers.
    pub const fn allows_data_access(&self) -> bool {
        !self.is_guarded() && (self.is_readable() || self.is_writable())
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl From<u32> for Protection {
    fn from(raw: u32) -> Self {
        Protection(raw)
    }
}

/// Commit state of a memory region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Committed,
    Reserved,
    Free,
}

impl RegionState {
    /// Maps the raw platform state value.
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0x1000 => RegionState::Committed,
            0x2000 => RegionState::Reserved,
            _ => RegionState::Free,
        }
    }
}

/// Transient description of one allocation span in the target.
///
/// Produced by a region query during validation; never stored.
#[derive(Debug, Clone, Copy)]
pub struct RegionInfo {
    /// Base address of the region
    pub base: Address,
    /// Size of the region in bytes, counted from `base`
    pub size: u32,
    /// Commit state
    pub state: RegionState,
    /// Protection flags
    pub protection: Protection,
}

impl RegionInfo {
    /// One-past-the-end address, widened so a region ending at the top of
    /// the 32-bit space does not overflow.
    pub fn end(&self) -> u64 {
        self.base.as_u64() + self.size as u64
    }

    /// Checks whether an address falls inside this region.
    pub fn contains(&self, address: Address) -> bool {
        address >= self.base && address.as_u64() < self.end()
    }

    /// Committed with a protection that permits data access.
    pub fn is_accessible(&self) -> bool {
        self.state == RegionState::Committed && self.protection.allows_data_access()
    }
}
