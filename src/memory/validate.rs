//! Region-walking address validation

use super::ProcessMemory;
use crate::core::types::{Address, MemoryError, MemoryResult, RegionState};
use tracing::trace;

/// Validates that every byte of `[address, address + len)` lies in committed
/// memory whose protection permits data access.
///
/// A request that extends past the end of the region covering `address` does
/// not assume uniform protection: the walk advances to the first address past
/// the current region and queries again, so a range crossing several
/// allocations is confirmed region by region. Any sub-region failing its
/// check rejects the whole request.
pub fn validate_range<M: ProcessMemory + ?Sized>(
    mem: &M,
    address: Address,
    len: usize,
) -> MemoryResult<()> {
    if len == 0 {
        return Ok(());
    }

    let end = address
        .as_u64()
        .checked_add(len as u64)
        .filter(|&end| end <= u32::MAX as u64 + 1)
        .ok_or_else(|| {
            MemoryError::invalid_memory(
                address,
                format!("range of {len} bytes wraps past the top of the address space"),
            )
        })?;

    let mut cursor = address.as_u64();
    while cursor < end {
        let at = Address::new(cursor as u32);
        let region = mem.query_region(at)?;

        if region.state != RegionState::Committed {
            return Err(MemoryError::invalid_memory(
                at,
                format!("region at {} is not committed", region.base),
            ));
        }
        if !region.protection.allows_data_access() {
            return Err(MemoryError::invalid_memory(
                at,
                format!(
                    "protection {} of region at {} denies data access",
                    region.protection, region.base
                ),
            ));
        }

        let region_end = region.end();
        if region_end <= cursor {
            // A descriptor that does not cover the queried address would
            // loop forever; treat it as a failed query.
            return Err(MemoryError::invalid_memory(
                at,
                "region query returned a descriptor below the queried address",
            ));
        }

        trace!(
            address = %at,
            region_base = %region.base,
            region_end,
            "validated sub-region"
        );
        cursor = region_end;
    }

    Ok(())
}
