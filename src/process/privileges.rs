//! SeDebugPrivilege acquisition for the calling process

use crate::core::types::{MemoryError, MemoryResult};
use crate::win32::strings::to_wide;
use std::sync::atomic::{AtomicBool, Ordering};
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
use winapi::um::securitybaseapi::AdjustTokenPrivileges;
use winapi::um::winbase::LookupPrivilegeValueW;
use winapi::um::winnt::{
    HANDLE, LUID, LUID_AND_ATTRIBUTES, SE_PRIVILEGE_ENABLED, TOKEN_ADJUST_PRIVILEGES,
    TOKEN_PRIVILEGES, TOKEN_QUERY,
};

static DEBUG_PRIVILEGE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Requests SeDebugPrivilege on the calling process's own token.
///
/// Explicit and idempotent: the first successful call latches, later calls
/// return immediately. Attach treats failure as non-fatal: the caller may
/// already hold sufficient rights, or the later open will fail with a clear
/// error of its own.
pub fn ensure_debug_privilege() -> MemoryResult<()> {
    if DEBUG_PRIVILEGE_ENABLED.load(Ordering::Relaxed) {
        return Ok(());
    }

    unsafe {
        let mut token: HANDLE = std::ptr::null_mut();
        if OpenProcessToken(
            GetCurrentProcess(),
            TOKEN_ADJUST_PRIVILEGES | TOKEN_QUERY,
            &mut token,
        ) == FALSE
        {
            return Err(crate::win32::last_error("OpenProcessToken"));
        }
        let _token = TokenGuard(token);

        let mut luid = LUID {
            LowPart: 0,
            HighPart: 0,
        };
        let name = to_wide("SeDebugPrivilege");
        if LookupPrivilegeValueW(std::ptr::null(), name.as_ptr(), &mut luid) == FALSE {
            return Err(crate::win32::last_error("LookupPrivilegeValueW"));
        }

        let mut privileges = TOKEN_PRIVILEGES {
            PrivilegeCount: 1,
            Privileges: [LUID_AND_ATTRIBUTES {
                Luid: luid,
                Attributes: SE_PRIVILEGE_ENABLED,
            }],
        };

        if AdjustTokenPrivileges(
            token,
            FALSE,
            &mut privileges,
            std::mem::size_of::<TOKEN_PRIVILEGES>() as DWORD,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        ) == FALSE
        {
            return Err(crate::win32::last_error("AdjustTokenPrivileges"));
        }

        // AdjustTokenPrivileges can succeed without assigning the privilege
        // when the token never held it; ERROR_NOT_ALL_ASSIGNED shows up in
        // the last error.
        const ERROR_NOT_ALL_ASSIGNED: u32 = 1300;
        let last = windows::core::Error::from_win32();
        if last.code().0 as u32 & 0xFFFF == ERROR_NOT_ALL_ASSIGNED {
            return Err(MemoryError::system_call(
                "AdjustTokenPrivileges",
                "SeDebugPrivilege is not held by this token",
            ));
        }
    }

    DEBUG_PRIVILEGE_ENABLED.store(true, Ordering::Relaxed);
    Ok(())
}

/// Whether a previous call already acquired the privilege.
pub fn has_debug_privilege() -> bool {
    DEBUG_PRIVILEGE_ENABLED.load(Ordering::Relaxed)
}

struct TokenGuard(HANDLE);

impl Drop for TokenGuard {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe {
                CloseHandle(self.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_is_idempotent() {
        // May fail without admin rights; the second call must agree with
        // the first either way.
        let first = ensure_debug_privilege();
        let second = ensure_debug_privilege();
        assert_eq!(first.is_ok(), second.is_ok());
        if first.is_ok() {
            assert!(has_debug_privilege());
        }
    }
}
