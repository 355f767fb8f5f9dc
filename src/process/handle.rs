//! RAII process capability

use crate::core::types::{Address, MemoryResult};
use crate::win32::kernel32;
use std::fmt;
use winapi::um::winnt::HANDLE;

/// Owned full-access handle to the target process.
///
/// Acquired once per successful attach and released exactly once, on drop.
pub struct ProcessHandle {
    handle: HANDLE,
    pid: u32,
}

impl ProcessHandle {
    /// Opens a full-access capability on `pid`.
    pub fn open_all_access(pid: u32) -> MemoryResult<Self> {
        let handle = kernel32::open_process_all_access(pid)?;
        Ok(ProcessHandle { handle, pid })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    pub(crate) fn raw(&self) -> HANDLE {
        self.handle
    }

    /// Raw validated-elsewhere read; fails on short transfer.
    pub fn read_memory(&self, address: Address, buf: &mut [u8]) -> MemoryResult<()> {
        unsafe { kernel32::read_process_memory(self.handle, address, buf) }
    }

    /// Raw validated-elsewhere write; fails on short transfer.
    pub fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        unsafe { kernel32::write_process_memory(self.handle, address, data) }
    }

    /// Region descriptor covering `address`.
    pub fn query_region(&self, address: Address) -> MemoryResult<crate::core::types::RegionInfo> {
        unsafe { kernel32::query_region(self.handle, address) }
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // Cleanup errors are not actionable here
        unsafe {
            let _ = kernel32::close_handle(self.handle);
        }
    }
}

// HANDLEs are process-local kernel object references
unsafe impl Send for ProcessHandle {}
unsafe impl Sync for ProcessHandle {}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_pid_zero_fails() {
        // PID 0 is the idle process and cannot be opened
        assert!(ProcessHandle::open_all_access(0).is_err());
    }

    #[test]
    fn test_open_current_process() {
        let pid = std::process::id();
        if let Ok(handle) = ProcessHandle::open_all_access(pid) {
            assert_eq!(handle.pid(), pid);
            assert!(handle.is_valid());
        }
    }
}
