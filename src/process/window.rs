//! Top-level window discovery for target identification

use crate::core::types::{MemoryError, MemoryResult};
use crate::win32::strings::to_wide;
use winapi::shared::minwindef::{BOOL, FALSE, LPARAM, TRUE};
use winapi::shared::windef::HWND;
use winapi::um::winuser::{EnumWindows, FindWindowW, GetWindowThreadProcessId};

/// Platform handle to the target's top-level window.
///
/// Window handles are identifiers, not owned kernel objects; there is
/// nothing to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub(crate) fn new(hwnd: HWND) -> Self {
        WindowHandle(hwnd as isize)
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub fn raw(&self) -> HWND {
        self.0 as HWND
    }
}

/// Locates a top-level window whose title matches exactly.
pub fn find_by_title(title: &str) -> MemoryResult<WindowHandle> {
    let wide = to_wide(title);
    let hwnd = unsafe { FindWindowW(std::ptr::null(), wide.as_ptr()) };
    if hwnd.is_null() {
        Err(MemoryError::WindowNotFound {
            title: title.to_string(),
        })
    } else {
        Ok(WindowHandle::new(hwnd))
    }
}

/// Derives the owning process identifier of a window.
pub fn owning_pid(window: WindowHandle) -> MemoryResult<u32> {
    let mut pid: u32 = 0;
    let thread = unsafe { GetWindowThreadProcessId(window.raw(), &mut pid) };
    if thread == 0 || pid == 0 {
        Err(MemoryError::OwnerLookupFailed {
            message: windows::core::Error::from_win32().message().to_string(),
        })
    } else {
        Ok(pid)
    }
}

struct EnumData {
    pid: u32,
    found: HWND,
}

unsafe extern "system" fn enum_windows_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let data = &mut *(lparam as *mut EnumData);
    let mut pid: u32 = 0;
    GetWindowThreadProcessId(hwnd, &mut pid);

    if pid == data.pid {
        data.found = hwnd;
        return FALSE; // stop enumeration
    }
    TRUE
}

/// Enumerates all top-level windows and returns the first one owned by
/// `pid`, if any. Windowless targets are legitimate; `None` is not an error.
pub fn find_by_pid(pid: u32) -> Option<WindowHandle> {
    let mut data = EnumData {
        pid,
        found: std::ptr::null_mut(),
    };
    unsafe {
        // Returns FALSE when the callback stops early; that is the success
        // path here, so the return value is not checked.
        EnumWindows(
            Some(enum_windows_callback),
            &mut data as *mut EnumData as LPARAM,
        );
    }
    if data.found.is_null() {
        None
    } else {
        Some(WindowHandle::new(data.found))
    }
}
