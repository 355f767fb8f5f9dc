//! Module enumeration for an attached target

use super::handle::ProcessHandle;
use crate::core::types::{Address, MemoryResult, ModuleEntry};
use crate::win32::{last_error, strings::from_wide};
use std::mem;
use winapi::shared::minwindef::{DWORD, FALSE, HMODULE, MAX_PATH};
use winapi::um::psapi::{
    EnumProcessModules, GetModuleBaseNameW, GetModuleInformation, MODULEINFO,
};

const MAX_MODULES: usize = 1024;

/// Enumerates the target's currently loaded modules.
///
/// Always re-queries the live module list; nothing is cached, because a new
/// target instance may relocate modules across runs.
pub fn enumerate_modules(handle: &ProcessHandle) -> MemoryResult<Vec<ModuleEntry>> {
    unsafe {
        let mut modules = [std::ptr::null_mut::<winapi::ctypes::c_void>() as HMODULE; MAX_MODULES];
        let mut needed: DWORD = 0;

        if EnumProcessModules(
            handle.raw(),
            modules.as_mut_ptr(),
            mem::size_of_val(&modules) as DWORD,
            &mut needed,
        ) == FALSE
        {
            return Err(last_error("EnumProcessModules"));
        }

        let count = (needed as usize / mem::size_of::<HMODULE>()).min(MAX_MODULES);
        let mut result = Vec::with_capacity(count);

        for &module in &modules[..count] {
            let mut name_buf = [0u16; MAX_PATH];
            let len = GetModuleBaseNameW(
                handle.raw(),
                module,
                name_buf.as_mut_ptr(),
                MAX_PATH as DWORD,
            );
            if len == 0 {
                return Err(last_error("GetModuleBaseNameW"));
            }
            let name = from_wide(&name_buf[..len as usize]);

            let mut info: MODULEINFO = mem::zeroed();
            let size = if GetModuleInformation(
                handle.raw(),
                module,
                &mut info,
                mem::size_of::<MODULEINFO>() as DWORD,
            ) != FALSE
            {
                info.SizeOfImage
            } else {
                0
            };

            result.push(ModuleEntry::new(
                name,
                Address::new(module as usize as u32),
                size,
            ));
        }

        Ok(result)
    }
}
