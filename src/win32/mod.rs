//! Thin safe wrappers over the raw Windows API surface

pub mod kernel32;
pub mod strings;

use crate::core::types::MemoryError;

/// Captures the calling thread's last platform error for `call`.
pub fn last_error(call: &'static str) -> MemoryError {
    MemoryError::system_call(call, windows::core::Error::from_win32().message())
}
