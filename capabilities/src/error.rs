//! Error type shared by every capability table operation.

use thiserror::Error;

/// Failures raised while building, filling or decoding a capability table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("Capability name is {len} bytes, at most {max} fit the name buffer")]
    NameTooLong { len: usize, max: usize },

    #[error("Capability name contains a NUL byte at offset {0}")]
    InteriorNul(usize),

    #[error("Capability name is not NUL-terminated")]
    UnterminatedName,

    #[error("Capability name is not valid UTF-8")]
    InvalidUtf8,

    #[error("Capability table is full ({capacity} entries)")]
    CapacityExceeded { capacity: usize },

    #[error("Capability '{0}' has no function attached")]
    NullFunction(String),

    #[error("Capability count {count} is outside 0..={max}")]
    InvalidCount { count: i64, max: usize },

    #[error("Invalid capability in slot {slot}: {source}")]
    Slot {
        slot: usize,
        #[source]
        source: Box<CapabilityError>,
    },
}

pub type CapabilityResult<T> = Result<T, CapabilityError>;

impl CapabilityError {
    #[cfg_attr(not(feature = "ffi"), allow(dead_code))]
    pub(crate) fn in_slot(self, slot: usize) -> Self {
        CapabilityError::Slot {
            slot,
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_errors_keep_their_cause() {
        let err = CapabilityError::UnterminatedName.in_slot(3);
        assert_eq!(
            err.to_string(),
            "Invalid capability in slot 3: Capability name is not NUL-terminated"
        );
        let source = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(
            source.as_deref(),
            Some("Capability name is not NUL-terminated")
        );
    }

    #[test]
    fn capacity_message_names_the_limit() {
        let err = CapabilityError::CapacityExceeded { capacity: 20 };
        assert_eq!(err.to_string(), "Capability table is full (20 entries)");
    }
}
