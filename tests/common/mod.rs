//! Synthetic target memory map for exercising the validated access path
#![allow(dead_code)]

use memsonar::{
    Address, MemoryError, MemoryResult, ProcessMemory, Protection, RegionInfo, RegionState,
};
use std::cell::{Cell, RefCell};

struct MockRegion {
    base: u32,
    state: RegionState,
    protection: Protection,
    data: RefCell<Vec<u8>>,
}

impl MockRegion {
    fn size(&self) -> u32 {
        self.data.borrow().len() as u32
    }

    fn end(&self) -> u64 {
        self.base as u64 + self.size() as u64
    }

    fn contains(&self, addr: u64) -> bool {
        addr >= self.base as u64 && addr < self.end()
    }
}

/// In-memory stand-in for a target process: a set of regions with
/// individual commit state and protection, plus toggles to simulate a
/// transfer that fails after validation passed.
pub struct MockProcessMemory {
    regions: Vec<MockRegion>,
    fail_next_read: Cell<bool>,
    fail_next_write: Cell<bool>,
}

impl MockProcessMemory {
    pub fn new() -> Self {
        MockProcessMemory {
            regions: Vec::new(),
            fail_next_read: Cell::new(false),
            fail_next_write: Cell::new(false),
        }
    }

    /// Adds a committed region of zeroed bytes.
    pub fn with_region(self, base: u32, size: usize, protection: Protection) -> Self {
        self.with_region_state(base, size, protection, RegionState::Committed)
    }

    pub fn with_region_state(
        mut self,
        base: u32,
        size: usize,
        protection: Protection,
        state: RegionState,
    ) -> Self {
        self.regions.push(MockRegion {
            base,
            state,
            protection,
            data: RefCell::new(vec![0u8; size]),
        });
        self
    }

    /// Makes the next raw read fail, simulating a region change between
    /// validation and transfer.
    pub fn fail_next_read(&self) {
        self.fail_next_read.set(true);
    }

    pub fn fail_next_write(&self) {
        self.fail_next_write.set(true);
    }

    fn region_at(&self, addr: u64) -> Option<&MockRegion> {
        self.regions.iter().find(|r| r.contains(addr))
    }

    /// Pokes bytes straight into the backing store, bypassing all checks.
    /// Panics if the span is not inside one declared region.
    pub fn poke(&self, addr: u32, bytes: &[u8]) {
        let region = self
            .region_at(addr as u64)
            .expect("poke outside any declared region");
        let offset = (addr - region.base) as usize;
        let mut data = region.data.borrow_mut();
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub fn poke_u32(&self, addr: u32, value: u32) {
        self.poke(addr, &value.to_le_bytes());
    }

    pub fn poke_i32(&self, addr: u32, value: i32) {
        self.poke(addr, &value.to_le_bytes());
    }

    pub fn poke_f32(&self, addr: u32, value: f32) {
        self.poke(addr, &value.to_le_bytes());
    }

    /// Peeks bytes straight out of the backing store.
    pub fn peek(&self, addr: u32, len: usize) -> Vec<u8> {
        let region = self
            .region_at(addr as u64)
            .expect("peek outside any declared region");
        let offset = (addr - region.base) as usize;
        region.data.borrow()[offset..offset + len].to_vec()
    }

    pub fn peek_i32(&self, addr: u32) -> i32 {
        i32::from_le_bytes(self.peek(addr, 4).try_into().unwrap())
    }
}

impl ProcessMemory for MockProcessMemory {
    fn read_raw(&self, address: Address, buf: &mut [u8]) -> MemoryResult<()> {
        let len = buf.len();
        if self.fail_next_read.replace(false) {
            return Err(MemoryError::read_failed(
                address,
                len,
                "simulated transfer failure",
            ));
        }

        for (i, out) in buf.iter_mut().enumerate() {
            let addr = address.as_u64() + i as u64;
            let region = self
                .region_at(addr)
                .filter(|r| r.state == RegionState::Committed && r.protection.is_readable())
                .ok_or_else(|| {
                    MemoryError::read_failed(address, len, "unreadable byte in range")
                })?;
            *out = region.data.borrow()[(addr - region.base as u64) as usize];
        }
        Ok(())
    }

    fn write_raw(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        if self.fail_next_write.replace(false) {
            return Err(MemoryError::write_failed(
                address,
                data.len(),
                "simulated transfer failure",
            ));
        }

        for (i, &byte) in data.iter().enumerate() {
            let addr = address.as_u64() + i as u64;
            let region = self
                .region_at(addr)
                .filter(|r| r.state == RegionState::Committed && r.protection.is_writable())
                .ok_or_else(|| {
                    MemoryError::write_failed(address, data.len(), "unwritable byte in range")
                })?;
            region.data.borrow_mut()[(addr - region.base as u64) as usize] = byte;
        }
        Ok(())
    }

    fn query_region(&self, address: Address) -> MemoryResult<RegionInfo> {
        let addr = address.as_u64();

        if let Some(region) = self.region_at(addr) {
            return Ok(RegionInfo {
                base: Address::new(region.base),
                size: region.size(),
                state: region.state,
                protection: region.protection,
            });
        }

        // Synthesize the free gap up to the next declared region, the way
        // a real region query describes unallocated space.
        let gap_end = self
            .regions
            .iter()
            .map(|r| r.base as u64)
            .filter(|&base| base > addr)
            .min()
            .unwrap_or(1 << 32);

        Ok(RegionInfo {
            base: address,
            size: (gap_end - addr).min(u32::MAX as u64) as u32,
            state: RegionState::Free,
            protection: Protection::NOACCESS,
        })
    }
}
