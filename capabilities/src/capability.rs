// A single named function reference

use crate::error::{CapabilityError, CapabilityResult};
use crate::function::{FnPtr, Function, RawFunction};
use crate::name::CapabilityName;

/// One slot of a capability table: a name and the code it refers to.
///
/// The function is not owned; whoever hands it out keeps the code alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capability {
    name: CapabilityName,
    function: Option<RawFunction>,
}

impl Capability {
    pub fn new(name: &str, function: RawFunction) -> CapabilityResult<Self> {
        Ok(Self {
            name: CapabilityName::new(name)?,
            function: Some(function),
        })
    }

    pub fn from_fn<F: FnPtr>(name: &str, f: F) -> CapabilityResult<Self> {
        Self::new(name, RawFunction::from_fn(f))
    }

    pub fn from_parts(name: CapabilityName, function: Option<RawFunction>) -> Self {
        Self { name, function }
    }

    /// Unused slot: empty name, no function.
    pub const fn empty() -> Self {
        Self {
            name: CapabilityName::empty(),
            function: None,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn capability_name(&self) -> &CapabilityName {
        &self.name
    }

    pub fn function(&self) -> Option<RawFunction> {
        self.function
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.function.is_none()
    }

    /// Typed view of the attached function.
    ///
    /// # Safety
    /// `F` must match the signature the provider registered, see
    /// [`RawFunction::cast`].
    pub unsafe fn get<F: FnPtr>(&self) -> CapabilityResult<Function<F>> {
        match self.function {
            Some(raw) => Ok(raw.get()),
            None => Err(CapabilityError::NullFunction(self.name().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(v: u64) -> u64 {
        v * 2
    }

    #[test]
    fn carries_name_and_function() {
        let cap = Capability::from_fn("double", double as fn(u64) -> u64).unwrap();
        assert_eq!(cap.name(), "double");
        assert_eq!(cap.capability_name(), &CapabilityName::new("double").unwrap());
        assert_eq!(
            cap.function(),
            Some(RawFunction::from_fn(double as fn(u64) -> u64))
        );

        let f = unsafe { cap.get::<fn(u64) -> u64>() }.unwrap();
        assert_eq!(f(21), 42);
    }

    #[test]
    fn missing_function_is_reported_by_name() {
        let cap = Capability::from_parts(CapabilityName::new("stop").unwrap(), None);
        let err = unsafe { cap.get::<fn()>() }.unwrap_err();
        assert_eq!(err, CapabilityError::NullFunction("stop".to_string()));
    }

    #[test]
    fn long_names_are_rejected_up_front() {
        let err = Capability::from_fn(&"n".repeat(300), double as fn(u64) -> u64).unwrap_err();
        assert_eq!(err, CapabilityError::NameTooLong { len: 300, max: 255 });
    }

    #[test]
    fn empty_slot() {
        let cap = Capability::empty();
        assert!(cap.is_empty());
        assert_eq!(cap, Capability::default());
        assert_eq!(cap.name(), "");
        assert!(cap.function().is_none());
    }
}
