//! The entity scan pass, generic over the memory capability
//!
//! Interprets entity records through the offset table: a linear walk over a
//! bounded pointer table, reading team/health/position fields and setting a
//! flag on matching entries. All safety comes from the validated accessor.

use crate::config::Offsets;
use crate::core::types::{Address, MemoryError, MemoryResult};
use crate::memory::{MemoryReader, MemoryWriter, ProcessMemory};
use tracing::debug;

/// One in-world actor as read from the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub team: i32,
    pub health: i32,
    pub origin: [f32; 3],
}

fn field(base: Address, offset: u32) -> MemoryResult<Address> {
    base.checked_add(offset).ok_or_else(|| {
        MemoryError::invalid_memory(base, format!("field offset 0x{offset:X} wraps the address"))
    })
}

/// Reads one entity record at `base`.
pub fn read_entity<M: ProcessMemory + ?Sized>(
    mem: &M,
    base: Address,
    offsets: &Offsets,
) -> MemoryResult<Entity> {
    let reader = MemoryReader::new(mem);
    let origin = reader.read_array::<f32>(field(base, offsets.origin)?, 3)?;
    Ok(Entity {
        team: reader.read(field(base, offsets.team)?)?,
        health: reader.read(field(base, offsets.health)?)?,
        origin: [origin[0], origin[1], origin[2]],
    })
}

/// One pointer-chain hop plus one flag read: follows the client-state
/// pointer at `engine_base + client_state` and reads the in-game flag.
/// A null client-state pointer means "not ready".
pub fn ready_state<M: ProcessMemory + ?Sized>(
    mem: &M,
    engine_base: Address,
    offsets: &Offsets,
) -> MemoryResult<bool> {
    let reader = MemoryReader::new(mem);

    let client_state: u32 = reader.read(field(engine_base, offsets.client_state)?)?;
    if client_state == 0 {
        return Ok(false);
    }

    let state: i32 = reader.read(field(Address::new(client_state), offsets.client_state_in_game)?)?;
    Ok(state != 0)
}

/// Runs one scan pass over the entity table at `client_base + entity_list`.
///
/// Walks slots `1..=max_entities`, skipping null slots; every entity with
/// positive health on a team different from the local player's gets its flag
/// field set to 1 and is counted. Any read or write failure mid-scan rejects
/// the pass and propagates.
pub fn scan_entities<M: ProcessMemory + ?Sized>(
    mem: &M,
    client_base: Address,
    offsets: &Offsets,
) -> MemoryResult<u32> {
    let reader = MemoryReader::new(mem);
    let writer = MemoryWriter::new(mem);

    let local_ptr: u32 = reader.read(field(client_base, offsets.local_player)?)?;
    let local = read_entity(mem, Address::new(local_ptr), offsets)?;

    let list = field(client_base, offsets.entity_list)?;
    let mut matched = 0u32;

    for slot in 1..=offsets.max_entities {
        let slot_offset = slot.checked_mul(offsets.entity_stride).ok_or_else(|| {
            MemoryError::invalid_memory(list, format!("entity slot {slot} offset overflows"))
        })?;
        let entity_ptr: u32 = reader.read(field(list, slot_offset)?)?;
        if entity_ptr == 0 {
            continue;
        }

        let base = Address::new(entity_ptr);
        let entity = read_entity(mem, base, offsets)?;
        if entity.health > 0 && entity.team != local.team {
            writer.write::<i32>(field(base, offsets.spotted)?, 1)?;
            matched += 1;
        }
    }

    debug!(matched, local_team = local.team, "scan pass complete");
    Ok(matched)
}
