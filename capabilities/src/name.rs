//! Fixed-size capability names.
//!
//! A name lives in a 256-byte buffer and is always followed by a NUL, so
//! the usable length is 255 bytes. Lengths are counted in UTF-8 bytes, not
//! characters.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{CapabilityError, CapabilityResult};
use crate::{CAPABILITY_FUNCTION_NAME_LEN, MAX_NAME_LEN};

/// Validated, NUL-terminated capability name stored inline.
#[derive(Clone, Copy)]
pub struct CapabilityName {
    buf: [u8; CAPABILITY_FUNCTION_NAME_LEN],
    len: usize,
}

impl CapabilityName {
    /// The empty name, all bytes zero.
    pub const fn empty() -> Self {
        Self {
            buf: [0; CAPABILITY_FUNCTION_NAME_LEN],
            len: 0,
        }
    }

    pub fn new(name: &str) -> CapabilityResult<Self> {
        let bytes = name.as_bytes();
        if bytes.len() > MAX_NAME_LEN {
            return Err(CapabilityError::NameTooLong {
                len: bytes.len(),
                max: MAX_NAME_LEN,
            });
        }
        if let Some(offset) = bytes.iter().position(|&b| b == 0) {
            return Err(CapabilityError::InteriorNul(offset));
        }

        let mut buf = [0; CAPABILITY_FUNCTION_NAME_LEN];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            buf,
            len: bytes.len(),
        })
    }

    /// Parse a C name buffer. The name ends at the first NUL; bytes after it
    /// are ignored.
    pub fn from_nul_terminated(bytes: &[u8]) -> CapabilityResult<Self> {
        let window = &bytes[..bytes.len().min(CAPABILITY_FUNCTION_NAME_LEN)];
        let len = window
            .iter()
            .position(|&b| b == 0)
            .ok_or(CapabilityError::UnterminatedName)?;
        let name = std::str::from_utf8(&window[..len]).map_err(|_| CapabilityError::InvalidUtf8)?;
        Self::new(name)
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: `buf[..len]` is only ever filled from a `&str` in `new`.
        unsafe { std::str::from_utf8_unchecked(&self.buf[..self.len]) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Name bytes including the trailing NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// The whole backing buffer, padding included.
    pub fn as_buffer(&self) -> &[u8; CAPABILITY_FUNCTION_NAME_LEN] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for CapabilityName {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for CapabilityName {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for CapabilityName {}

impl Hash for CapabilityName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialEq<str> for CapabilityName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for CapabilityName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl AsRef<str> for CapabilityName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for CapabilityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CapabilityName {
    type Error = CapabilityError;

    fn try_from(name: &str) -> CapabilityResult<Self> {
        Self::new(name)
    }
}

impl FromStr for CapabilityName {
    type Err = CapabilityError;

    fn from_str(name: &str) -> CapabilityResult<Self> {
        Self::new(name)
    }
}
