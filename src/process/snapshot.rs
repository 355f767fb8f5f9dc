//! Process enumeration via the ToolHelp32 snapshot API

use crate::core::types::{MemoryError, MemoryResult};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32First, Process32Next, PROCESSENTRY32, TH32CS_SNAPPROCESS,
};
use winapi::um::winnt::HANDLE;

/// One entry from a process snapshot.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    pub pid: u32,
    /// Executable base file name as reported by the snapshot
    pub exe_file: String,
}

/// Iterator over a point-in-time snapshot of all running processes.
pub struct ProcessSnapshot {
    snapshot: HANDLE,
    first_called: bool,
}

impl ProcessSnapshot {
    pub fn new() -> MemoryResult<Self> {
        let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
            return Err(MemoryError::SnapshotFailed {
                message: windows::core::Error::from_win32().message().to_string(),
            });
        }
        Ok(ProcessSnapshot {
            snapshot,
            first_called: false,
        })
    }

    fn next_entry(&mut self) -> Option<ProcessEntry> {
        unsafe {
            let mut entry: PROCESSENTRY32 = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32First(self.snapshot, &mut entry)
            } else {
                Process32Next(self.snapshot, &mut entry)
            };

            if success == FALSE {
                return None;
            }

            let exe_file = {
                let bytes = &entry.szExeFile;
                let null_pos = bytes.iter().position(|&c| c == 0).unwrap_or(bytes.len());
                let raw: Vec<u8> = bytes[..null_pos].iter().map(|&c| c as u8).collect();
                String::from_utf8_lossy(&raw).into_owned()
            };

            Some(ProcessEntry {
                pid: entry.th32ProcessID,
                exe_file,
            })
        }
    }
}

impl Iterator for ProcessSnapshot {
    type Item = ProcessEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }
}

impl Drop for ProcessSnapshot {
    fn drop(&mut self) {
        if !self.snapshot.is_null() && self.snapshot != INVALID_HANDLE_VALUE {
            unsafe {
                let _ = CloseHandle(self.snapshot);
            }
        }
    }
}

/// Finds the first snapshot entry whose executable file name equals `name`
/// exactly (case-sensitive, no path, no extension normalization).
///
/// When several processes share the name, the first one in platform
/// iteration order wins; that order is not deterministic across runs.
pub fn find_process_exact(name: &str) -> MemoryResult<Option<ProcessEntry>> {
    Ok(ProcessSnapshot::new()?.find(|entry| entry.exe_file == name))
}
