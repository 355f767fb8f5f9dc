//! UTF-16 conversion helpers for Windows API calls

use std::ffi::{OsStr, OsString};
use std::os::windows::ffi::{OsStrExt, OsStringExt};

/// Converts a Rust string to a NUL-terminated UTF-16 buffer.
pub fn to_wide(s: &str) -> Vec<u16> {
    OsStr::new(s)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Converts a UTF-16 buffer, stopping at the first NUL if present.
pub fn from_wide(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    OsString::from_wide(&wide[..len])
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_wide() {
        assert_eq!(to_wide("Hi"), vec![72, 105, 0]);
        assert_eq!(to_wide(""), vec![0]);
    }

    #[test]
    fn test_from_wide() {
        assert_eq!(from_wide(&[72, 105, 0, 33]), "Hi");
        assert_eq!(from_wide(&[72, 105]), "Hi");
    }

    #[test]
    fn test_round_trip_unicode() {
        let s = "engine 世界.dll";
        assert_eq!(from_wide(&to_wide(s)), s);
    }
}
