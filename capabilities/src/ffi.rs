//! C image of a capability table.
//!
//! Layout matches the plugin-facing header:
//!
//! ```c
//! typedef struct capability {
//!     char name[256];
//!     void* function;
//! } Capability;
//!
//! typedef struct capabilities_ {
//!     Capability capability[20];
//!     int n_capabilities;
//! } Capabilities;
//! ```
//!
//! Plugins receive a `*const RawCapabilities` and read it in place. Going
//! back from the C image re-validates every live slot.

use std::ffi::{c_char, c_int, c_void};

use crate::capability::Capability;
use crate::error::{CapabilityError, CapabilityResult};
use crate::function::RawFunction;
use crate::name::CapabilityName;
use crate::table::Capabilities;
use crate::{CAPABILITY_FUNCTION_NAME_LEN, CAPABILITY_NUMBER_OF_CAPABILITIES};

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawCapability {
    pub name: [c_char; CAPABILITY_FUNCTION_NAME_LEN],
    pub function: *mut c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RawCapabilities {
    pub capability: [RawCapability; CAPABILITY_NUMBER_OF_CAPABILITIES],
    pub n_capabilities: c_int,
}

impl RawCapability {
    pub const fn zeroed() -> Self {
        Self {
            name: [0; CAPABILITY_FUNCTION_NAME_LEN],
            function: std::ptr::null_mut(),
        }
    }

    fn name_bytes(&self) -> [u8; CAPABILITY_FUNCTION_NAME_LEN] {
        self.name.map(|c| c as u8)
    }
}

impl Default for RawCapability {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl RawCapabilities {
    pub const fn zeroed() -> Self {
        const EMPTY: RawCapability = RawCapability::zeroed();
        Self {
            capability: [EMPTY; CAPABILITY_NUMBER_OF_CAPABILITIES],
            n_capabilities: 0,
        }
    }

    /// Live slots according to `n_capabilities`, or `None` when the count
    /// is out of range.
    pub fn live(&self) -> Option<&[RawCapability]> {
        let n = usize::try_from(self.n_capabilities).ok()?;
        self.capability.get(..n)
    }
}

impl Default for RawCapabilities {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl From<&Capability> for RawCapability {
    fn from(cap: &Capability) -> Self {
        Self {
            name: cap.capability_name().as_buffer().map(|b| b as c_char),
            function: cap
                .function()
                .map_or(std::ptr::null_mut(), RawFunction::as_ptr),
        }
    }
}

impl TryFrom<&RawCapability> for Capability {
    type Error = CapabilityError;

    fn try_from(raw: &RawCapability) -> CapabilityResult<Self> {
        let name = CapabilityName::from_nul_terminated(&raw.name_bytes())?;
        Ok(Capability::from_parts(name, RawFunction::from_ptr(raw.function)))
    }
}

impl Capabilities {
    /// C image of the table. Unused slots are zeroed.
    pub fn to_raw(&self) -> RawCapabilities {
        let mut raw = RawCapabilities::zeroed();
        for (dst, src) in raw.capability.iter_mut().zip(self.slots()) {
            *dst = RawCapability::from(src);
        }
        // Never above 20, so the cast is lossless.
        raw.n_capabilities = self.len() as c_int;
        raw
    }

    /// Decode a C image. Only slots below `n_capabilities` are read.
    pub fn from_raw(raw: &RawCapabilities) -> CapabilityResult<Self> {
        let live = raw.live().ok_or(CapabilityError::InvalidCount {
            count: i64::from(raw.n_capabilities),
            max: CAPABILITY_NUMBER_OF_CAPABILITIES,
        })?;

        let mut table = Capabilities::new();
        for (slot, entry) in live.iter().enumerate() {
            let cap = Capability::try_from(entry).map_err(|e| e.in_slot(slot))?;
            table.push(cap)?;
        }
        log::debug!("Decoded {} capabilities from C image", table.len());
        Ok(table)
    }
}
