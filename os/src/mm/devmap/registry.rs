//! Live dynamic mapping tracking

use super::{DevMapError, DevMapResult};
use crate::mm::address::{Paddr, Vaddr};
use crate::mm::page_table::MemAttr;
use crate::sync::SpinLock;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// A dynamic mapping that has not been unmapped yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveMapping {
    /// Page-aligned physical base
    pub pa: Paddr,
    /// Rounded size in bytes
    pub size: usize,
    /// Memory type the pages were entered with
    pub attr: MemAttr,
}

/// Live dynamic mappings keyed by page-aligned virtual base
pub(super) struct MappingRegistry {
    live: SpinLock<HashMap<Vaddr, LiveMapping>>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self {
            live: SpinLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, va: Vaddr, mapping: LiveMapping) {
        self.live.lock().insert(va, mapping);
    }

    /// Removes the mapping at `va` if its rounded size is `size`.
    ///
    /// An unknown base or a different size leaves the registry untouched.
    pub fn take(&self, va: Vaddr, size: usize) -> DevMapResult<LiveMapping> {
        let mut live = self.live.lock();
        match live.get(&va) {
            None => Err(DevMapError::NotMapped),
            Some(mapping) if mapping.size != size => Err(DevMapError::SizeMismatch),
            Some(_) => live.remove(&va).ok_or(DevMapError::NotMapped),
        }
    }

    pub fn len(&self) -> usize {
        self.live.lock().len()
    }

    pub fn snapshot(&self) -> Vec<(Vaddr, LiveMapping)> {
        let mut all: Vec<_> = self.live.lock().iter().map(|(&va, &m)| (va, m)).collect();
        all.sort_unstable_by_key(|&(va, _)| va);
        all
    }
}
