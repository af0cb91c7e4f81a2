//! Fixed-capacity capability table.
//!
//! Entries live inline in a 20-slot array next to a live-entry count.
//! Slots `[0, len)` are live, every slot past `len` holds
//! [`Capability::empty`]. Appending to a full table is an error, never an
//! overwrite.

use std::fmt;

use crate::capability::Capability;
use crate::error::{CapabilityError, CapabilityResult};
use crate::CAPABILITY_NUMBER_OF_CAPABILITIES;

/// Iterator over the live entries of a [`Capabilities`] table.
pub type Iter<'a> = std::slice::Iter<'a, Capability>;

#[derive(Clone)]
pub struct Capabilities {
    capability: [Capability; CAPABILITY_NUMBER_OF_CAPABILITIES],
    n_capabilities: usize,
}

impl Capabilities {
    pub const CAPACITY: usize = CAPABILITY_NUMBER_OF_CAPABILITIES;

    /// Zero-initialized table with no live entries.
    pub const fn new() -> Self {
        const EMPTY: Capability = Capability::empty();
        Self {
            capability: [EMPTY; CAPABILITY_NUMBER_OF_CAPABILITIES],
            n_capabilities: 0,
        }
    }

    /// Append `cap` and return the index it landed on.
    pub fn push(&mut self, cap: Capability) -> CapabilityResult<usize> {
        if self.is_full() {
            log::warn!(
                "Capability table full, rejecting '{}' ({} entries)",
                cap.name(),
                Self::CAPACITY
            );
            return Err(CapabilityError::CapacityExceeded {
                capacity: Self::CAPACITY,
            });
        }

        let index = self.n_capabilities;
        self.capability[index] = cap;
        self.n_capabilities += 1;
        log::debug!("Capability '{}' stored in slot {}", cap.name(), index);
        Ok(index)
    }

    /// Remove the last live entry and reset its slot.
    pub fn pop(&mut self) -> Option<Capability> {
        if self.n_capabilities == 0 {
            return None;
        }
        self.n_capabilities -= 1;
        let slot = &mut self.capability[self.n_capabilities];
        Some(std::mem::replace(slot, Capability::empty()))
    }

    pub fn get(&self, index: usize) -> Option<&Capability> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Capability> {
        self.capability[..self.n_capabilities].get_mut(index)
    }

    /// First live entry named `name`.
    pub fn find(&self, name: &str) -> Option<&Capability> {
        self.iter().find(|cap| cap.capability_name() == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.iter().position(|cap| cap.capability_name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.as_slice().iter()
    }

    pub fn as_slice(&self) -> &[Capability] {
        &self.capability[..self.n_capabilities]
    }

    pub fn len(&self) -> usize {
        self.n_capabilities
    }

    pub fn is_empty(&self) -> bool {
        self.n_capabilities == 0
    }

    pub fn is_full(&self) -> bool {
        self.n_capabilities == Self::CAPACITY
    }

    pub fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    pub fn remaining(&self) -> usize {
        Self::CAPACITY - self.n_capabilities
    }

    /// Keep the first `len` entries. No-op when `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.n_capabilities {
            return;
        }
        for slot in &mut self.capability[len..self.n_capabilities] {
            *slot = Capability::empty();
        }
        self.n_capabilities = len;
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// All 20 slots, unused ones included.
    pub(crate) fn slots(&self) -> &[Capability; CAPABILITY_NUMBER_OF_CAPABILITIES] {
        &self.capability
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Capabilities {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Capabilities {}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("n_capabilities", &self.n_capabilities)
            .field("capability", &self.as_slice())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Capabilities {
    type Item = &'a Capability;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl TryFrom<&[Capability]> for Capabilities {
    type Error = CapabilityError;

    fn try_from(caps: &[Capability]) -> CapabilityResult<Self> {
        if caps.len() > Self::CAPACITY {
            return Err(CapabilityError::CapacityExceeded {
                capacity: Self::CAPACITY,
            });
        }
        let mut table = Self::new();
        table.capability[..caps.len()].copy_from_slice(caps);
        table.n_capabilities = caps.len();
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop() {}

    fn cap(name: &str) -> Capability {
        Capability::from_fn(name, noop as fn()).unwrap()
    }

    fn filled(n: usize) -> Capabilities {
        let mut table = Capabilities::new();
        for i in 0..n {
            table.push(cap(&format!("cap_{}", i))).unwrap();
        }
        table
    }

    #[test]
    fn new_table_is_zeroed() {
        let table = Capabilities::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 20);
        assert_eq!(table.slots().len(), CAPABILITY_NUMBER_OF_CAPABILITIES);
        assert!(table.slots().iter().all(Capability::is_empty));
        assert_eq!(table, Capabilities::default());
    }

    #[test]
    fn push_appends_in_order() {
        let mut table = Capabilities::new();
        assert_eq!(table.push(cap("blackboard_get_string")).unwrap(), 0);
        assert_eq!(table.push(cap("blackboard_set_string")).unwrap(), 1);

        let names: Vec<&str> = table.iter().map(Capability::name).collect();
        assert_eq!(names, vec!["blackboard_get_string", "blackboard_set_string"]);
        assert_eq!(table.remaining(), 18);
    }

    #[test]
    fn twenty_first_push_fails_and_leaves_table_alone() {
        let mut table = filled(20);
        assert!(table.is_full());
        let before = table.clone();

        let err = table.push(cap("one_too_many")).unwrap_err();
        assert_eq!(err, CapabilityError::CapacityExceeded { capacity: 20 });
        assert_eq!(table.len(), 20);
        assert_eq!(table, before);
        assert!(!table.contains("one_too_many"));
    }

    #[test]
    fn find_returns_first_match() {
        let mut table = Capabilities::new();
        let first = Capability::from_fn("dup", noop as fn()).unwrap();
        let second = Capability::from_parts(*first.capability_name(), None);
        table.push(first).unwrap();
        table.push(second).unwrap();

        assert_eq!(table.position("dup"), Some(0));
        assert!(table.find("dup").unwrap().function().is_some());
        assert!(table.find("missing").is_none());
    }

    #[test]
    fn lookups_ignore_dead_slots() {
        let mut table = filled(3);
        table.pop();
        assert!(!table.contains("cap_2"));
        assert!(table.get(2).is_none());
        assert!(table.slots()[2].is_empty());
    }

    #[test]
    fn truncate_and_clear_reset_slots() {
        let mut table = filled(5);
        table.truncate(2);
        assert_eq!(table.len(), 2);
        assert!(table.slots()[2..].iter().all(Capability::is_empty));

        table.truncate(10);
        assert_eq!(table.len(), 2);

        table.clear();
        assert!(table.is_empty());
        assert!(table.slots().iter().all(Capability::is_empty));
    }

    #[test]
    fn get_mut_only_reaches_live_entries() {
        let mut table = filled(1);
        *table.get_mut(0).unwrap() = cap("renamed");
        assert_eq!(table.get(0).unwrap().name(), "renamed");
        assert!(table.get_mut(1).is_none());
    }

    #[test]
    fn builds_from_slices() {
        let caps: Vec<Capability> = (0..3).map(|i| cap(&format!("c{}", i))).collect();
        let table = Capabilities::try_from(caps.as_slice()).unwrap();
        assert_eq!(table.as_slice(), caps.as_slice());

        let too_many: Vec<Capability> = (0..21).map(|i| cap(&format!("c{}", i))).collect();
        assert_eq!(
            Capabilities::try_from(too_many.as_slice()).unwrap_err(),
            CapabilityError::CapacityExceeded { capacity: 20 }
        );
    }

    #[test]
    fn equality_only_looks_at_live_entries() {
        let mut a = filled(2);
        let b = filled(1);
        a.pop();
        assert_eq!(a, b);
    }
}
