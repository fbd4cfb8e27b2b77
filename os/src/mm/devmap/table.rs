//! Static device map
//!
//! A boot-installed, read-only table of fixed device regions. Lookups scan the
//! table in order and only match an entry that fully contains the request.

use super::{DevMapEntry, DevMapError, DevMapResult};
use crate::mm::address::{Paddr, PaddrRange, Vaddr, VaddrRange};
use crate::mm::page_table::EarlyMapper;
use crate::pr_info;
use spin::Once;

/// Write-once handle to the boot-installed device table
pub struct StaticDevMap {
    table: Once<&'static [DevMapEntry]>,
}

impl StaticDevMap {
    /// Handle with no table installed
    pub const fn new() -> Self {
        Self { table: Once::new() }
    }

    /// Maps every entry of `table` through `early` and publishes the table.
    ///
    /// The handle is write-once: a second call returns
    /// [`DevMapError::AlreadyInstalled`] and maps nothing. All entries are
    /// checked before the first mapping. If `early` fails part way, the table is
    /// not published and a later install may be attempted.
    pub fn install<M: EarlyMapper + ?Sized>(
        &self,
        table: &'static [DevMapEntry],
        early: &mut M,
    ) -> DevMapResult<()> {
        let mut ran = false;
        self.table.try_call_once(|| {
            ran = true;
            let entries = live_prefix(table);
            if let Some(index) = entries.iter().position(|e| !e.is_well_formed()) {
                return Err(DevMapError::MisalignedEntry { index });
            }
            for entry in entries {
                early.map_chunk(entry.va, entry.pa, entry.size, entry.prot, entry.attr)?;
            }
            Ok(table)
        })?;

        if ran {
            Ok(())
        } else {
            Err(DevMapError::AlreadyInstalled)
        }
    }

    /// Whether a table has been published
    pub fn is_installed(&self) -> bool {
        self.table.is_completed()
    }

    /// Installed entries up to the sentinel; empty before install.
    pub fn entries(&self) -> &'static [DevMapEntry] {
        match self.table.get() {
            Some(&table) => live_prefix(table),
            None => &[],
        }
    }

    /// Virtual address of `[pa, pa + size)` if one entry fully contains it
    pub fn ptov(&self, pa: Paddr, size: usize) -> Option<Vaddr> {
        let req = PaddrRange::from_start_len(pa, size)?;
        self.entries()
            .iter()
            .find(|e| e.pa_range().contains_range(&req))
            .map(|e| e.ptov(pa))
    }

    /// Physical address of `[va, va + size)` if one entry fully contains it
    pub fn vtop(&self, va: Vaddr, size: usize) -> Option<Paddr> {
        let req = VaddrRange::from_start_len(va, size)?;
        self.entries()
            .iter()
            .find(|e| e.va_range().contains_range(&req))
            .map(|e| e.vtop(va))
    }

    /// Lowest virtual address used by the static map
    pub fn last_va(&self) -> Option<Vaddr> {
        self.entries().iter().map(|e| e.va).min()
    }

    /// Logs every installed entry at info level
    pub fn print_table(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            pr_info!("devmap: no static device mappings");
            return;
        }
        pr_info!("devmap: static device mappings:");
        for entry in entries {
            pr_info!("  {}", entry);
        }
    }
}

impl Default for StaticDevMap {
    fn default() -> Self {
        Self::new()
    }
}

fn live_prefix(table: &[DevMapEntry]) -> &[DevMapEntry] {
    let len = table
        .iter()
        .position(DevMapEntry::is_sentinel)
        .unwrap_or(table.len());
    &table[..len]
}
