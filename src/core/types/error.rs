//! Error taxonomy for remote memory access

use super::address::Address;
use std::fmt;
use thiserror::Error;

/// Main error type for attachment and memory operations.
///
/// Every variant that originates in a platform call carries the failing call
/// site and the platform error message captured at the moment of failure.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("no process is attached")]
    NotAttached,

    #[error("no top-level window titled {title:?}")]
    WindowNotFound { title: String },

    #[error("could not resolve the owning process of the window: {message}")]
    OwnerLookupFailed { message: String },

    #[error("process snapshot failed: {message}")]
    SnapshotFailed { message: String },

    #[error("failed to open process {pid}: {message}")]
    OpenFailed { pid: u32, message: String },

    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("invalid memory at {address}: {reason}")]
    InvalidMemory { address: Address, reason: String },

    #[error("failed to read {len} bytes at {address}: {reason}")]
    ReadFailed {
        address: Address,
        len: usize,
        reason: String,
    },

    #[error("failed to write {len} bytes at {address}: {reason}")]
    WriteFailed {
        address: Address,
        len: usize,
        reason: String,
    },

    #[error("string at {address} exceeded {max_len} units without a terminator")]
    StringTooLong { address: Address, max_len: usize },

    #[error("{call} failed: {message}")]
    SystemCall {
        call: &'static str,
        message: String,
    },
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates an invalid-memory error for an address range.
    pub fn invalid_memory(address: Address, reason: impl Into<String>) -> Self {
        MemoryError::InvalidMemory {
            address,
            reason: reason.into(),
        }
    }

    /// Creates a read failed error.
    pub fn read_failed(address: Address, len: usize, reason: impl Into<String>) -> Self {
        MemoryError::ReadFailed {
            address,
            len,
            reason: reason.into(),
        }
    }

    /// Creates a write failed error.
    pub fn write_failed(address: Address, len: usize, reason: impl Into<String>) -> Self {
        MemoryError::WriteFailed {
            address,
            len,
            reason: reason.into(),
        }
    }

    /// Creates an error for a failed platform call.
    pub fn system_call(call: &'static str, message: impl fmt::Display) -> Self {
        MemoryError::SystemCall {
            call,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MemoryError::NotAttached;
        assert_eq!(err.to_string(), "no process is attached");

        let err = MemoryError::WindowNotFound {
            title: "Counter-Strike".to_string(),
        };
        assert_eq!(err.to_string(), "no top-level window titled \"Counter-Strike\"");

        let err = MemoryError::OpenFailed {
            pid: 1234,
            message: "Access is denied.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to open process 1234: Access is denied."
        );

        let err = MemoryError::ModuleNotFound("engine.dll".to_string());
        assert_eq!(err.to_string(), "module not found: engine.dll");
    }

    #[test]
    fn test_helper_constructors() {
        let err = MemoryError::invalid_memory(Address::new(0x1000), "not committed");
        assert_eq!(
            err.to_string(),
            "invalid memory at 0x00001000: not committed"
        );

        let err = MemoryError::read_failed(Address::new(0x2000), 4, "short transfer");
        match err {
            MemoryError::ReadFailed { address, len, reason } => {
                assert_eq!(address, Address::new(0x2000));
                assert_eq!(len, 4);
                assert_eq!(reason, "short transfer");
            }
            _ => panic!("wrong error variant"),
        }

        let err = MemoryError::write_failed(Address::new(0x3000), 8, "protected");
        assert!(matches!(err, MemoryError::WriteFailed { len: 8, .. }));

        let err = MemoryError::system_call("EnumWindows", "The handle is invalid.");
        assert_eq!(err.to_string(), "EnumWindows failed: The handle is invalid.");
    }

    #[test]
    fn test_string_too_long_display() {
        let err = MemoryError::StringTooLong {
            address: Address::new(0x4000),
            max_len: 32,
        };
        assert_eq!(
            err.to_string(),
            "string at 0x00004000 exceeded 32 units without a terminator"
        );
    }
}
