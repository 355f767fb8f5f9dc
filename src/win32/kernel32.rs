//! Kernel32 wrappers for process handles and memory transfer

use super::last_error;
use crate::core::types::{Address, MemoryError, MemoryResult, Protection, RegionInfo, RegionState};
use std::mem;
use winapi::shared::minwindef::{FALSE, LPCVOID, LPVOID};
use winapi::um::handleapi::CloseHandle;
use winapi::um::memoryapi::{ReadProcessMemory, VirtualQueryEx, WriteProcessMemory};
use winapi::um::processthreadsapi::OpenProcess;
use winapi::um::winnt::{HANDLE, MEMORY_BASIC_INFORMATION, PROCESS_ALL_ACCESS};

/// Opens a full-access capability on `pid`.
pub fn open_process_all_access(pid: u32) -> MemoryResult<HANDLE> {
    let handle = unsafe { OpenProcess(PROCESS_ALL_ACCESS, FALSE, pid) };
    if handle.is_null() {
        Err(MemoryError::OpenFailed {
            pid,
            message: windows::core::Error::from_win32().message().to_string(),
        })
    } else {
        Ok(handle)
    }
}

/// Closes a kernel handle. Null handles are a no-op.
///
/// # Safety
/// `handle` must be a valid handle owned by the caller, or null.
pub unsafe fn close_handle(handle: HANDLE) -> MemoryResult<()> {
    if handle.is_null() {
        return Ok(());
    }
    if CloseHandle(handle) == FALSE {
        Err(last_error("CloseHandle"))
    } else {
        Ok(())
    }
}

/// Raw transfer out of the target. Fails on a failed or short transfer.
///
/// # Safety
/// `handle` must be a valid process handle with read access.
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: Address,
    buf: &mut [u8],
) -> MemoryResult<()> {
    let mut bytes_read = 0usize;
    let result = ReadProcessMemory(
        handle,
        address.as_u64() as LPCVOID,
        buf.as_mut_ptr() as LPVOID,
        buf.len(),
        &mut bytes_read,
    );

    if result == FALSE {
        Err(MemoryError::read_failed(
            address,
            buf.len(),
            windows::core::Error::from_win32().message().to_string(),
        ))
    } else if bytes_read != buf.len() {
        Err(MemoryError::read_failed(
            address,
            buf.len(),
            format!("short transfer: {bytes_read} bytes"),
        ))
    } else {
        Ok(())
    }
}

/// Raw transfer into the target. Fails on a failed or short transfer.
///
/// # Safety
/// `handle` must be a valid process handle with write access.
pub unsafe fn write_process_memory(
    handle: HANDLE,
    address: Address,
    data: &[u8],
) -> MemoryResult<()> {
    let mut bytes_written = 0usize;
    let result = WriteProcessMemory(
        handle,
        address.as_u64() as LPVOID,
        data.as_ptr() as LPCVOID,
        data.len(),
        &mut bytes_written,
    );

    if result == FALSE {
        Err(MemoryError::write_failed(
            address,
            data.len(),
            windows::core::Error::from_win32().message().to_string(),
        ))
    } else if bytes_written != data.len() {
        Err(MemoryError::write_failed(
            address,
            data.len(),
            format!("short transfer: {bytes_written} bytes"),
        ))
    } else {
        Ok(())
    }
}

/// Queries the region descriptor covering `address` in the target.
///
/// # Safety
/// `handle` must be a valid process handle with query access.
pub unsafe fn query_region(handle: HANDLE, address: Address) -> MemoryResult<RegionInfo> {
    let mut mbi: MEMORY_BASIC_INFORMATION = mem::zeroed();

    let result = VirtualQueryEx(
        handle,
        address.as_u64() as LPCVOID,
        &mut mbi,
        mem::size_of::<MEMORY_BASIC_INFORMATION>(),
    );

    if result == 0 {
        return Err(MemoryError::invalid_memory(
            address,
            format!(
                "VirtualQueryEx failed: {}",
                windows::core::Error::from_win32().message()
            ),
        ));
    }

    // The descriptor covers from BaseAddress, which may be below the query
    // address. The target is 32-bit, so both fit in u32.
    Ok(RegionInfo {
        base: Address::new(mbi.BaseAddress as usize as u32),
        size: mbi.RegionSize.min(u32::MAX as usize) as u32,
        state: RegionState::from_raw(mbi.State),
        protection: Protection::new(mbi.Protect),
    })
}
