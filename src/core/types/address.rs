//! Target-space address type with checked arithmetic and hex parsing

use super::error::MemoryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An address in the target process's virtual address space.
///
/// The target is assumed to be a 32-bit process, so addresses are 32 bits
/// wide. A 64-bit port must widen this type end-to-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub u32);

impl Address {
    /// Creates a new address from a raw value.
    pub const fn new(value: u32) -> Self {
        Address(value)
    }

    /// Creates a null address (0x0).
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks if the address is null.
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Returns the raw 32-bit value.
    pub const fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns the value widened to 64 bits for range arithmetic.
    pub const fn as_u64(&self) -> u64 {
        self.0 as u64
    }

    /// Adds an offset, returning `None` if the result would wrap past the
    /// top of the 32-bit address space.
    pub const fn checked_add(&self, offset: u32) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(value) => Some(Address(value)),
            None => None,
        }
    }
}

impl FromStr for Address {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let value = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            u32::from_str_radix(hex, 16)
        } else if s.chars().any(|c| c.is_ascii_alphabetic()) {
            // Assume hex if it contains letters
            u32::from_str_radix(s, 16)
        } else {
            s.parse::<u32>()
        };

        value.map(Address::new).map_err(|_| MemoryError::InvalidMemory {
            address: Address::null(),
            reason: format!("unparseable address: {s:?}"),
        })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parsing() {
        assert_eq!(Address::from_str("0x1000").unwrap(), Address::new(0x1000));
        assert_eq!(Address::from_str("0X1000").unwrap(), Address::new(0x1000));
        assert_eq!(
            Address::from_str("DEADBEEF").unwrap(),
            Address::new(0xDEAD_BEEF)
        );
        assert_eq!(Address::from_str("4096").unwrap(), Address::new(4096));
        assert!(Address::from_str("not an address").is_err());
    }

    #[test]
    fn test_checked_add() {
        let addr = Address::new(0x1000);
        assert_eq!(addr.checked_add(0x10), Some(Address::new(0x1010)));
        assert_eq!(Address::new(u32::MAX).checked_add(1), None);
        assert_eq!(
            Address::new(0xFFFF_FFF0).checked_add(0x10),
            None
        );
    }

    #[test]
    fn test_null() {
        assert!(Address::null().is_null());
        assert!(!Address::new(1).is_null());
    }

    #[test]
    fn test_display() {
        let addr = Address::new(0xDEAD_BEEF);
        assert_eq!(format!("{}", addr), "0xDEADBEEF");
        assert_eq!(format!("{:x}", addr), "0xdeadbeef");
        assert_eq!(format!("{}", Address::new(0x10)), "0x00000010");
    }
}
