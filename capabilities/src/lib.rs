// Capability tables
// A bounded list of named, non-owning function references that can be
// handed to plugin code either as Rust values or as a C struct.

pub mod capability;
pub mod error;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod function;
pub mod name;
pub mod table;

pub use capability::Capability;
pub use error::{CapabilityError, CapabilityResult};
#[cfg(feature = "ffi")]
pub use ffi::{RawCapabilities, RawCapability};
pub use function::{FnPtr, Function, RawFunction};
pub use name::CapabilityName;
pub use table::{Capabilities, Iter};

/// Size of a capability name buffer, NUL terminator included.
pub const CAPABILITY_FUNCTION_NAME_LEN: usize = 256;

/// Number of slots in a [`Capabilities`] table.
pub const CAPABILITY_NUMBER_OF_CAPABILITIES: usize = 20;

/// Longest name, in bytes, that still leaves room for the terminator.
pub const MAX_NAME_LEN: usize = CAPABILITY_FUNCTION_NAME_LEN - 1;
